//! `scribe stages` command implementation.

use clap::Args;

use super::OptionsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the stages command.
#[derive(Args, Debug)]
pub(crate) struct StagesArgs {
    #[command(flatten)]
    pub options: OptionsArgs,
}

impl StagesArgs {
    /// Execute the stages command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let renderer = self.options.renderer()?;
        let options = renderer.options();

        output.highlight(&format!(
            "Engine: {:?}, inline order: {:?}",
            options.engine, options.inline_order
        ));
        for (i, stage) in renderer.stages().iter().enumerate() {
            output.emit(&format!("{}. {stage}", i + 1))?;
        }
        Ok(())
    }
}
