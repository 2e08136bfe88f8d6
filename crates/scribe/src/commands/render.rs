//! `scribe render` command implementation.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Args;

use super::OptionsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin; `-` also reads stdin).
    input: Option<PathBuf>,

    /// Write the HTML fragment to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub options: OptionsArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, or if the input cannot be read
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let renderer = self.options.renderer()?;

        let markdown = read_input(self.input.as_deref())?;
        if markdown.is_empty() {
            tracing::warn!("input is empty");
        }
        let html = renderer.render(Some(&markdown));

        if let Some(path) = &self.output {
            std::fs::write(path, &html)?;
            output.success(&format!("Wrote {} bytes to {}", html.len(), path.display()));
        } else {
            output.emit(&html)?;
        }
        Ok(())
    }
}

/// Read markdown from a file, or from stdin when no path or `-` is given.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            if path.is_dir() {
                return Err(CliError::Validation(format!(
                    "Input path is a directory: {}",
                    path.display()
                )));
            }
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}
