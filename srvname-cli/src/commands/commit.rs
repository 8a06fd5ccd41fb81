//! Commit command implementation.

use crate::error::CliError;
use crate::utils::{parse_id, service_from_globals, GlobalOptions};
use clap::Args;

/// Mark a reserved name as in use.
#[derive(Args)]
pub struct CommitCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl CommitCommand {
    /// Execute the commit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        let mut service = service_from_globals(global)?;

        let reservation = service.commit(&id)?;
        println!("{}", reservation.server_name());

        if !global.quiet {
            eprintln!("Committed {} ({id})", reservation.server_name());
        }

        Ok(())
    }
}
