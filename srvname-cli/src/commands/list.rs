//! List command implementation.
//!
//! This module implements the `list` command, which displays
//! reservations in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, service_from_globals, write_json, GlobalOptions};
use clap::{Args, ValueEnum};
use srvname::{Reservation, ReservationStatus};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 12] = [
    "id",
    "server_name",
    "status",
    "unit_code",
    "type",
    "provider",
    "region",
    "environment",
    "function",
    "sequence_num",
    "created_at",
    "updated_at",
];

/// List reservations, newest first.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,

    /// Only show reservations in this state
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<StatusFilter>,

    /// Only show names starting with this prefix (case-insensitive)
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

/// Reservation state filter.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Reserved but not committed
    Reserved,
    /// Committed (in use)
    Committed,
}

impl From<StatusFilter> for ReservationStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Reserved => ReservationStatus::Reserved,
            StatusFilter::Committed => ReservationStatus::Committed,
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = service_from_globals(global)?;

        // Query, narrowing in the store where possible
        let mut reservations = match (&self.prefix, self.status) {
            // Names are stored upper-case
            (Some(prefix), _) => service.list_by_prefix(&prefix.to_uppercase())?,
            (None, Some(status)) => service.list_by_status(status.into())?,
            (None, None) => service.list_all()?,
        };

        if let (Some(_), Some(status)) = (&self.prefix, self.status) {
            let status = ReservationStatus::from(status);
            reservations.retain(|r| r.status() == status);
        }

        match self.format {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => write_json(&reservations)?,
            OutputFormat::Csv => format_as_delimited(&reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&reservations, b'\t')?,
        }

        Ok(())
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "SERVER_NAME\tSTATUS\tSEQUENCE\tCREATED_AT\tID")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}",
            res.server_name(),
            res.status(),
            res.sequence_num(),
            format_timestamp(res.created_at()),
            res.id(),
        )?;
    }

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        let fields = res.fields();
        writer
            .write_record([
                res.id().to_string(),
                res.server_name().to_string(),
                res.status().to_string(),
                fields.unit_code().to_string(),
                fields.server_type().to_string(),
                fields.provider().to_string(),
                fields.region().to_string(),
                fields.environment().to_string(),
                fields.function().to_string(),
                res.sequence_num().to_string(),
                format_timestamp(res.created_at()),
                format_timestamp(res.updated_at()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
