//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod stages;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use scribe_config::{CliSettings, Config};
use scribe_markdown::{Engine, InlineOrder, MarkdownRenderer, Theme};

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use stages::StagesArgs;

/// Rendering engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum EngineArg {
    Staged,
    Tree,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Staged => Self::Staged,
            EngineArg::Tree => Self::Tree,
        }
    }
}

/// Inline span recognition order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum InlineOrderArg {
    Legacy,
    CodeFirst,
}

impl From<InlineOrderArg> for InlineOrder {
    fn from(arg: InlineOrderArg) -> Self {
        match arg {
            InlineOrderArg::Legacy => Self::Legacy,
            InlineOrderArg::CodeFirst => Self::CodeFirst,
        }
    }
}

/// Class theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeArg {
    Plain,
    Tailwind,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Plain => Self::Plain,
            ThemeArg::Tailwind => Self::Tailwind,
        }
    }
}

/// Renderer options shared by all commands.
#[derive(Args, Debug)]
pub(crate) struct OptionsArgs {
    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long, env = "SCRIBE_CONFIG")]
    config: Option<PathBuf>,

    /// Rendering engine (overrides config).
    #[arg(long, value_enum)]
    engine: Option<EngineArg>,

    /// Inline span order (overrides config).
    #[arg(long, value_enum)]
    inline_order: Option<InlineOrderArg>,

    /// Class theme (overrides config).
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl OptionsArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            engine: self.engine.map(Engine::from),
            inline_order: self.inline_order.map(InlineOrder::from),
            theme: self.theme.map(Theme::from),
        }
    }

    /// Load configuration and build a renderer from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub(crate) fn renderer(&self) -> Result<MarkdownRenderer, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "loaded configuration");
        }
        Ok(MarkdownRenderer::with_options(config.render_options()?))
    }
}
