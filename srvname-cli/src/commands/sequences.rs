//! Sequences command implementation.

use crate::error::CliError;
use crate::utils::{format_timestamp, service_from_globals, write_json, GlobalOptions, ReportFormat};
use clap::Args;
use std::io::Write;

/// List sequence counters and the next name each would produce.
#[derive(Args)]
pub struct SequencesCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: ReportFormat,
}

impl SequencesCommand {
    /// Execute the sequences command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = service_from_globals(global)?;
        let counters = service.list_sequences()?;

        if let ReportFormat::Json = self.format {
            return write_json(&counters);
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        writeln!(handle, "BASE_PATTERN\tCURRENT\tNEXT\tUPDATED_AT")?;
        for counter in &counters {
            writeln!(
                handle,
                "{}\t{}\t{}\t{}",
                counter.fields.base_pattern(),
                counter.current_value,
                counter.fields.encode(counter.current_value.saturating_add(1)),
                format_timestamp(counter.updated_at),
            )?;
        }

        Ok(())
    }
}
