//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{parse_id, service_from_globals, GlobalOptions};
use clap::Args;

/// Delete a reservation.
///
/// Committed reservations can only be deleted when the delete policy is
/// `allow-any`.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        let mut service = service_from_globals(global)?;

        let reservation = service.delete(&id)?;
        println!("{}", reservation.server_name());

        if !global.quiet {
            eprintln!("Deleted {} ({id})", reservation.server_name());
        }

        Ok(())
    }
}
