//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, service construction and output
//! formatting.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use srvname::config::DatabaseSettings;
use srvname::{
    init_logger, Config, ConfigBuilder, Database, Logger, NameService, ReservationId,
    ServiceConfig,
};
use std::io::Write;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in milliseconds).
    pub busy_timeout: Option<u64>,

    /// Read this configuration file instead of `<data dir>/config.yaml`.
    pub config_file: Option<PathBuf>,
}

/// Output format for single records and reports.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    Table,
    /// JSON format
    Json,
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. The configuration file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    if let Some(ref config_file) = global.config_file {
        builder = builder.with_config_file(config_file);
    }
    if let Some(busy_timeout_ms) = global.busy_timeout {
        builder = builder.with_config(Config {
            database: Some(DatabaseSettings {
                path: None,
                busy_timeout_ms: Some(busy_timeout_ms),
            }),
            ..Config::default()
        });
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Build the logger: explicit flags win over the configured mode.
pub fn build_logger(global: &GlobalOptions, config: &Config) -> Logger {
    if global.verbose || global.quiet {
        return init_logger(global.verbose, global.quiet);
    }
    config.log_mode.map_or_else(Logger::default, Logger::new)
}

/// Open the database and wrap it in a service.
pub fn open_service(global: &GlobalOptions, config: &Config) -> Result<NameService, CliError> {
    let db_config = config.database_config(global.data_dir.as_deref())?;
    let db = Database::open(db_config)?;
    Ok(NameService::new(
        db,
        ServiceConfig::from(config),
        build_logger(global, config),
    ))
}

/// Load configuration and open the service in one step.
pub fn service_from_globals(global: &GlobalOptions) -> Result<NameService, CliError> {
    let config = load_configuration(global)?;
    open_service(global, &config)
}

/// Parse a reservation id argument.
pub fn parse_id(value: &str) -> Result<ReservationId, CliError> {
    value.trim().parse().map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Write a value to stdout as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, value).map_err(|e| CliError::Io(e.into()))?;
    writeln!(handle)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(ts), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_parse_id() {
        let id = ReservationId::new();
        assert_eq!(parse_id(&format!(" {id} ")).unwrap(), id);
        assert_eq!(parse_id("nope").unwrap_err().exit_code(), 4);
    }
}
