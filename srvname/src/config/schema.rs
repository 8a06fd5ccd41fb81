//! Configuration schema definitions.
//!
//! Every field is optional so that partial configurations from different
//! sources can be merged; defaults are applied by the accessor methods.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::{resolve_database_path, DatabaseConfig, DEFAULT_BUSY_TIMEOUT};
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::naming::NamingDefaults;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use srvname::config::{Config, DeletePolicy};
///
/// let config: Config = serde_yaml::from_str("delete_policy: allow-any\n").unwrap();
/// assert_eq!(config.delete_policy(), DeletePolicy::AllowAny);
/// assert!(config.operation_timeout().is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database settings.
    pub database: Option<DatabaseSettings>,

    /// Deadline for a single operation, in milliseconds.
    pub operation_timeout_ms: Option<u64>,

    /// Whether committed reservations may be deleted.
    pub delete_policy: Option<DeletePolicy>,

    /// Log verbosity.
    pub log_mode: Option<LogLevel>,

    /// Naming settings.
    pub naming: Option<NamingConfig>,
}

/// Database settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Explicit database file, overriding `<data dir>/srvname.db`.
    pub path: Option<PathBuf>,

    /// How long to wait for a locked database, in milliseconds.
    pub busy_timeout_ms: Option<u64>,
}

/// Naming settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Values used for empty fields.
    #[serde(default)]
    pub defaults: NamingDefaults,
}

/// Policy applied when deleting a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletePolicy {
    /// Committed reservations must be released before they can be deleted.
    #[default]
    ForbidCommitted,
    /// Any reservation may be deleted.
    AllowAny,
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForbidCommitted => write!(f, "forbid-committed"),
            Self::AllowAny => write!(f, "allow-any"),
        }
    }
}

impl FromStr for DeletePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "forbid-committed" => Ok(Self::ForbidCommitted),
            "allow-any" => Ok(Self::AllowAny),
            _ => Err(Error::Validation {
                field: "delete_policy".into(),
                message: format!("Invalid delete policy: '{s}' (expected forbid-committed or allow-any)"),
            }),
        }
    }
}

impl Config {
    /// Busy timeout, defaulting to 5 seconds.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        self.database
            .as_ref()
            .and_then(|db| db.busy_timeout_ms)
            .map_or(DEFAULT_BUSY_TIMEOUT, Duration::from_millis)
    }

    /// Per-operation deadline, if one is configured.
    #[must_use]
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout_ms.map(Duration::from_millis)
    }

    /// Delete policy, defaulting to [`DeletePolicy::ForbidCommitted`].
    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy.unwrap_or_default()
    }

    /// Naming defaults, falling back to the built-in placeholders.
    #[must_use]
    pub fn naming_defaults(&self) -> NamingDefaults {
        self.naming
            .as_ref()
            .map(|naming| naming.defaults.clone())
            .unwrap_or_default()
    }

    /// Builds the database configuration.
    ///
    /// An explicit `database.path` wins; otherwise the database lives in
    /// the resolved data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the data directory
    /// cannot be resolved.
    pub fn database_config(&self, data_dir: Option<&Path>) -> Result<DatabaseConfig> {
        let path = match self.database.as_ref().and_then(|db| db.path.clone()) {
            Some(path) => path,
            None => resolve_database_path(data_dir)?,
        };
        Ok(DatabaseConfig::new(path).with_busy_timeout(self.busy_timeout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.busy_timeout(), Duration::from_millis(5000));
        assert_eq!(config.operation_timeout(), None);
        assert_eq!(config.delete_policy(), DeletePolicy::ForbidCommitted);
        assert_eq!(config.naming_defaults(), NamingDefaults::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
database:
  path: /var/lib/srvname/names.db
  busy_timeout_ms: 250
operation_timeout_ms: 1000
delete_policy: allow-any
log_mode: verbose
naming:
  defaults:
    environment: D
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
        assert_eq!(config.operation_timeout(), Some(Duration::from_millis(1000)));
        assert_eq!(config.delete_policy(), DeletePolicy::AllowAny);
        assert_eq!(config.log_mode, Some(LogLevel::Verbose));

        let defaults = config.naming_defaults();
        assert_eq!(defaults.environment, "D");
        assert_eq!(defaults.region, "XXXX");

        let db = config.database_config(None).unwrap();
        assert_eq!(db.path, PathBuf::from("/var/lib/srvname/names.db"));
        assert_eq!(db.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("ports: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_database_config_uses_data_dir() {
        let config = Config::default();
        let db = config.database_config(Some(Path::new("/data"))).unwrap();
        assert_eq!(db.path, PathBuf::from("/data/srvname.db"));
    }

    #[test]
    fn test_delete_policy_parse() {
        assert_eq!(
            "allow-any".parse::<DeletePolicy>().unwrap(),
            DeletePolicy::AllowAny
        );
        assert_eq!(
            "FORBID-COMMITTED".parse::<DeletePolicy>().unwrap(),
            DeletePolicy::ForbidCommitted
        );
        assert!("sometimes".parse::<DeletePolicy>().is_err());
        assert_eq!(DeletePolicy::AllowAny.to_string(), "allow-any");
    }
}
