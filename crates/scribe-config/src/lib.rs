//! Configuration management for scribe.
//!
//! Parses `scribe.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! engine = "tree"
//! inline_order = "code-first"
//! theme = "tailwind"
//!
//! [render.classes]
//! link = "underline"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scribe_markdown::{ElementKind, Engine, InlineOrder, RenderOptions, Theme};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override rendering engine.
    pub engine: Option<Engine>,
    /// Override inline span order.
    pub inline_order: Option<InlineOrder>,
    /// Override class theme.
    pub theme: Option<Theme>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "scribe.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Execution engine.
    pub engine: Engine,
    /// Inline span recognition order.
    pub inline_order: InlineOrder,
    /// Base class preset.
    pub theme: Theme,
    /// Per-element class overrides, keyed by element name (e.g. `code-block`).
    pub classes: BTreeMap<String, String>,
}

impl RenderConfig {
    /// Resolve class overrides to element kinds.
    fn class_overrides(&self) -> Result<Vec<(ElementKind, &str)>, ConfigError> {
        self.classes
            .iter()
            .map(|(name, class)| {
                let kind = ElementKind::ALL
                    .into_iter()
                    .find(|kind| kind.name() == name.as_str())
                    .ok_or_else(|| {
                        ConfigError::Validation(format!(
                            "render.classes: unknown element '{name}'"
                        ))
                    })?;
                Ok((kind, class.as_str()))
            })
            .collect()
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a class attribute value free of quotes and angle brackets.
fn require_plain_class(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.contains(['"', '<', '>']) {
        return Err(ConfigError::Validation(format!(
            "{field} must not contain '\"', '<' or '>'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `scribe.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(engine) = settings.engine {
            self.render.engine = engine;
        }
        if let Some(inline_order) = settings.inline_order {
            self.render.inline_order = inline_order;
        }
        if let Some(theme) = settings.theme {
            self.render.theme = theme;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a class override names an unknown
    /// element or carries an empty or unsafe value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, class) in self.render.class_overrides()? {
            let field = format!("render.classes.{}", kind.name());
            require_non_empty(class, &field)?;
            require_plain_class(class, &field)?;
        }
        Ok(())
    }

    /// Build renderer options: the theme's classes with overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a class override names an unknown
    /// element.
    pub fn render_options(&self) -> Result<RenderOptions, ConfigError> {
        let mut classes = self.render.theme.classes();
        for (kind, class) in self.render.class_overrides()? {
            classes.set(kind, class);
        }
        Ok(RenderOptions {
            engine: self.render.engine,
            inline_order: self.render.inline_order,
            classes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;
    use scribe_markdown::ClassMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.engine, Engine::Staged);
        assert_eq!(config.render.inline_order, InlineOrder::Legacy);
        assert_eq!(config.render.theme, Theme::Plain);
        assert!(config.render.classes.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.engine, Engine::Staged);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
engine = "tree"
inline_order = "code-first"
theme = "tailwind"

[render.classes]
link = "underline"
code-block = "code"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.engine, Engine::Tree);
        assert_eq!(config.render.inline_order, InlineOrder::CodeFirst);
        assert_eq!(config.render.theme, Theme::Tailwind);
        assert_eq!(config.render.classes["code-block"], "code");
    }

    #[test]
    fn test_parse_unknown_engine_fails() {
        let result: Result<Config, _> = toml::from_str("[render]\nengine = \"fast\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let settings = CliSettings {
            engine: Some(Engine::Tree),
            inline_order: None,
            theme: Some(Theme::Tailwind),
        };
        config.apply_cli_settings(&settings);
        assert_eq!(config.render.engine, Engine::Tree);
        assert_eq!(config.render.inline_order, InlineOrder::Legacy);
        assert_eq!(config.render.theme, Theme::Tailwind);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config: Config = toml::from_str("[render]\nengine = \"tree\"\n").unwrap();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.render.engine, Engine::Tree);
    }

    #[test]
    fn test_render_options_theme_with_overrides() {
        let toml = r#"
[render]
theme = "tailwind"

[render.classes]
link = "underline"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let options = config.render_options().unwrap();
        assert_eq!(options.classes.get(ElementKind::Link), Some("underline"));
        assert_eq!(
            options.classes.get(ElementKind::Table),
            ClassMap::tailwind().get(ElementKind::Table)
        );
    }

    #[test]
    fn test_render_options_plain() {
        let options = Config::default().render_options().unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    fn config_with_class(name: &str, class: &str) -> Config {
        let mut config = Config::default();
        config
            .render
            .classes
            .insert(name.to_owned(), class.to_owned());
        config
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_element() {
        let config = config_with_class("blockquote", "x");
        assert_validation_error(&config, &["unknown element", "blockquote"]);
    }

    #[test]
    fn test_validate_empty_class() {
        let config = config_with_class("table", "");
        assert_validation_error(&config, &["render.classes.table", "cannot be empty"]);
    }

    #[test]
    fn test_validate_unsafe_class() {
        let config = config_with_class("link", r#"x" onclick="y"#);
        assert_validation_error(&config, &["render.classes.link", "must not contain"]);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[render]\nengine = \"tree\"\n").unwrap();

        let settings = CliSettings {
            inline_order: Some(InlineOrder::CodeFirst),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.render.engine, Engine::Tree);
        assert_eq!(config.render.inline_order, InlineOrder::CodeFirst);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        fs::write(&path, "[render\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        fs::write(&path, "[render.classes]\nlist = \"\"\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
