//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which allocates the next
//! server name for a set of naming fields.

use crate::error::CliError;
use crate::utils::{service_from_globals, write_json, GlobalOptions};
use clap::{Args, ValueEnum};
use srvname::NameFields;

/// Naming fields shared by `reserve` and `preview`.
///
/// Empty fields take the configured defaults.
#[derive(Args)]
pub struct FieldArgs {
    /// Unit code (up to 3 characters)
    #[arg(long, value_name = "CODE", default_value = "")]
    pub unit: String,

    /// Server type (1 character)
    #[arg(long = "type", value_name = "CODE", default_value = "")]
    pub server_type: String,

    /// Provider (1 character)
    #[arg(long, value_name = "CODE", default_value = "")]
    pub provider: String,

    /// Region (up to 4 characters)
    #[arg(long, value_name = "CODE", default_value = "")]
    pub region: String,

    /// Environment (1 character)
    #[arg(long = "env", value_name = "CODE", default_value = "")]
    pub environment: String,

    /// Function (up to 2 characters)
    #[arg(long, value_name = "CODE", default_value = "")]
    pub function: String,
}

impl FieldArgs {
    /// Convert to validated naming fields.
    ///
    /// Surrounding whitespace is stripped here; the library keeps it.
    pub fn to_fields(&self) -> Result<NameFields, CliError> {
        let fields = NameFields::new(
            self.unit.trim(),
            self.server_type.trim(),
            self.provider.trim(),
            self.region.trim(),
            self.environment.trim(),
            self.function.trim(),
        );
        fields.validate()?;
        Ok(fields)
    }
}

/// Reserve the next server name.
#[derive(Args)]
pub struct ReserveCommand {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "json", ignore_case = true)]
    pub format: OutcomeFormat,
}

/// Output format for the reserve command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutcomeFormat {
    /// `{"reservationId": ..., "serverName": ...}`
    Json,
    /// Server name and id, tab-separated
    Text,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate input before touching the store
        let fields = self.fields.to_fields()?;

        // 2. Open the service
        let mut service = service_from_globals(global)?;

        // 3. Reserve
        let outcome = service.reserve(&fields)?;

        // 4. Output
        match self.format {
            OutcomeFormat::Json => write_json(&outcome)?,
            OutcomeFormat::Text => println!("{}\t{}", outcome.server_name, outcome.reservation_id),
        }

        if !global.quiet {
            eprintln!("Reserved {}", outcome.server_name);
        }

        Ok(())
    }
}
