//! Preview command implementation.

use crate::commands::reserve::FieldArgs;
use crate::error::CliError;
use crate::utils::{service_from_globals, GlobalOptions};
use clap::Args;

/// Show the name the next reserve would produce, without reserving it.
#[derive(Args)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub fields: FieldArgs,
}

impl PreviewCommand {
    /// Execute the preview command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let fields = self.fields.to_fields()?;
        let service = service_from_globals(global)?;

        println!("{}", service.preview(&fields)?);

        Ok(())
    }
}
