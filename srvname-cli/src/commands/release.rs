//! Release command implementation.
//!
//! This module implements the `release` command, which returns a committed
//! name to the reserved state. The reservation keeps its name.

use crate::error::CliError;
use crate::utils::{parse_id, service_from_globals, GlobalOptions};
use clap::Args;

/// Release a committed reservation.
#[derive(Args)]
pub struct ReleaseCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl ReleaseCommand {
    /// Execute the release command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        let mut service = service_from_globals(global)?;

        let reservation = service.release(&id)?;
        println!("{}", reservation.server_name());

        if !global.quiet {
            eprintln!("Released {} ({id})", reservation.server_name());
        }

        Ok(())
    }
}
