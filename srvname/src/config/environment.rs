//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `SRVNAME_*` environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::{Config, DatabaseSettings};
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_ENV};

/// Overrides the database file path.
pub const DB_PATH_ENV: &str = "SRVNAME_DB_PATH";
/// Overrides the busy timeout (milliseconds).
pub const BUSY_TIMEOUT_ENV: &str = "SRVNAME_BUSY_TIMEOUT_MS";
/// Overrides the per-operation deadline (milliseconds).
pub const OPERATION_TIMEOUT_ENV: &str = "SRVNAME_OPERATION_TIMEOUT_MS";
/// Overrides the delete policy.
pub const DELETE_POLICY_ENV: &str = "SRVNAME_DELETE_POLICY";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use srvname::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric timeout or an unknown policy).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(path) = env::var(DB_PATH_ENV) {
            let database = config.database.get_or_insert_with(DatabaseSettings::default);
            database.path = Some(PathBuf::from(path));
        }

        if let Ok(value) = env::var(BUSY_TIMEOUT_ENV) {
            let database = config.database.get_or_insert_with(DatabaseSettings::default);
            database.busy_timeout_ms = Some(Self::parse_millis(BUSY_TIMEOUT_ENV, &value)?);
        }

        if let Ok(value) = env::var(OPERATION_TIMEOUT_ENV) {
            config.operation_timeout_ms = Some(Self::parse_millis(OPERATION_TIMEOUT_ENV, &value)?);
        }

        if let Ok(value) = env::var(DELETE_POLICY_ENV) {
            config.delete_policy = Some(value.parse().map_err(|_| Error::Validation {
                field: DELETE_POLICY_ENV.into(),
                message: format!(
                    "Invalid delete policy: '{value}' (expected forbid-committed or allow-any)"
                ),
            })?);
        }

        if let Ok(value) = env::var(LOG_MODE_ENV) {
            config.log_mode = Some(LogLevel::parse(&value).map_err(|message| Error::Validation {
                field: LOG_MODE_ENV.into(),
                message,
            })?);
        }

        Ok(())
    }

    /// Parse a millisecond count.
    fn parse_millis(field: &str, s: &str) -> Result<u64> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer number of milliseconds, got '{s}'"),
        })
    }
}
