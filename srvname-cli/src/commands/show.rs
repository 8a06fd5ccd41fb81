//! Show command implementation.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, parse_id, service_from_globals, write_json, GlobalOptions, ReportFormat,
};
use clap::Args;

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: ReportFormat,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        let service = service_from_globals(global)?;
        let reservation = service.get(&id)?;

        match self.format {
            ReportFormat::Json => write_json(&reservation)?,
            ReportFormat::Table => {
                let fields = reservation.fields();
                println!("ID:          {}", reservation.id());
                println!("Server name: {}", reservation.server_name());
                println!("Status:      {}", reservation.status());
                println!("Unit code:   {}", fields.unit_code());
                println!("Type:        {}", fields.server_type());
                println!("Provider:    {}", fields.provider());
                println!("Region:      {}", fields.region());
                println!("Environment: {}", fields.environment());
                println!("Function:    {}", fields.function());
                println!("Sequence:    {}", reservation.sequence_num());
                println!("Created:     {}", format_timestamp(reservation.created_at()));
                println!("Updated:     {}", format_timestamp(reservation.updated_at()));
            }
        }

        Ok(())
    }
}
