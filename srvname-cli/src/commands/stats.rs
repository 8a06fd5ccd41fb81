//! Stats command implementation.
//!
//! This module implements the `stats` command, which summarizes the
//! reservation store: status counts, the busiest environments and regions,
//! a per-day breakdown and the most recent reservations.

use crate::error::CliError;
use crate::utils::{format_timestamp, service_from_globals, write_json, GlobalOptions, ReportFormat};
use clap::Args;
use srvname::database::{FieldCount, DAILY_WINDOW_DAYS};
use srvname::ReservationStats;
use std::io::Write;

/// Show reservation statistics.
#[derive(Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: ReportFormat,
}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = service_from_globals(global)?;
        let stats = service.stats()?;

        match self.format {
            ReportFormat::Json => write_json(&stats),
            ReportFormat::Table => format_as_table(&stats),
        }
    }
}

fn write_counts(
    handle: &mut impl Write,
    title: &str,
    counts: &[FieldCount],
) -> Result<(), CliError> {
    writeln!(handle)?;
    writeln!(handle, "{title}:")?;
    if counts.is_empty() {
        writeln!(handle, "  -")?;
    }
    for count in counts {
        writeln!(handle, "  {}\t{}", count.value, count.count)?;
    }
    Ok(())
}

fn format_as_table(stats: &ReservationStats) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Total:      {}", stats.total)?;
    writeln!(handle, "Committed:  {}", stats.committed)?;
    writeln!(handle, "Reserved:   {}", stats.reserved)?;

    write_counts(&mut handle, "Top environments", &stats.top_environments)?;
    write_counts(&mut handle, "Top regions", &stats.top_regions)?;

    writeln!(handle)?;
    writeln!(handle, "Last {DAILY_WINDOW_DAYS} days:")?;
    if stats.daily.is_empty() {
        writeln!(handle, "  -")?;
    }
    for day in &stats.daily {
        writeln!(
            handle,
            "  {}\treserved={}\tcommitted={}",
            day.date, day.reserved, day.committed
        )?;
    }

    writeln!(handle)?;
    writeln!(handle, "Recent:")?;
    if stats.recent.is_empty() {
        writeln!(handle, "  -")?;
    }
    for res in &stats.recent {
        writeln!(
            handle,
            "  {}\t{}\t{}",
            res.server_name(),
            res.status(),
            format_timestamp(res.created_at())
        )?;
    }

    Ok(())
}
