//! Integration tests for configuration loading.
//!
//! Tests that modify environment variables are marked with `#[serial]`;
//! environment variables are process-global.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

use srvname::config::{Config, ConfigBuilder, DeletePolicy};
use srvname::error::Error;
use srvname::{Database, LogLevel, Logger, NameFields, NameService, ServiceConfig};

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

fn clear_srvname_env_vars() -> Vec<EnvGuard> {
    [
        "SRVNAME_DATA_DIR",
        "SRVNAME_DB_PATH",
        "SRVNAME_BUSY_TIMEOUT_MS",
        "SRVNAME_OPERATION_TIMEOUT_MS",
        "SRVNAME_DELETE_POLICY",
        "SRVNAME_LOG_MODE",
    ]
    .iter()
    .map(|k| EnvGuard::remove(k))
    .collect()
}

fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("config.yaml"), content).unwrap();
}

#[test]
#[serial]
fn test_full_config_file() {
    let _env = clear_srvname_env_vars();
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r"
database:
  busy_timeout_ms: 250
operation_timeout_ms: 3000
delete_policy: allow-any
log_mode: verbose
naming:
  defaults:
    unit_code: ZZ
    region: EU
",
    );

    let config = ConfigBuilder::new().with_data_dir(temp.path()).build().unwrap();
    assert_eq!(config.busy_timeout(), Duration::from_millis(250));
    assert_eq!(config.operation_timeout(), Some(Duration::from_secs(3)));
    assert_eq!(config.delete_policy(), DeletePolicy::AllowAny);
    assert_eq!(config.log_mode, Some(LogLevel::Verbose));
    assert_eq!(config.naming_defaults().unit_code, "ZZ");
    assert_eq!(config.naming_defaults().environment, "X");
}

#[test]
#[serial]
fn test_data_dir_from_environment() {
    let _env = clear_srvname_env_vars();
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "delete_policy: allow-any\n");
    let _guard = EnvGuard::new("SRVNAME_DATA_DIR", temp.path().to_str().unwrap());

    let config = ConfigBuilder::new().build().unwrap();
    assert_eq!(config.delete_policy(), DeletePolicy::AllowAny);

    let db_config = config.database_config(None).unwrap();
    assert_eq!(db_config.path, temp.path().join("srvname.db"));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let _env = clear_srvname_env_vars();
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "delete_policy: allow-any\noperation_timeout_ms: 100\n");
    let _policy = EnvGuard::new("SRVNAME_DELETE_POLICY", "forbid-committed");

    let config = ConfigBuilder::new().with_data_dir(temp.path()).build().unwrap();
    assert_eq!(config.delete_policy(), DeletePolicy::ForbidCommitted);
    assert_eq!(config.operation_timeout_ms, Some(100));
}

#[test]
#[serial]
fn test_explicit_db_path_from_environment() {
    let _env = clear_srvname_env_vars();
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("elsewhere.db");
    let _guard = EnvGuard::new("SRVNAME_DB_PATH", db_path.to_str().unwrap());

    let config = ConfigBuilder::new().with_data_dir(temp.path()).build().unwrap();
    let db_config = config.database_config(Some(temp.path())).unwrap();
    assert_eq!(db_config.path, db_path);
}

#[test]
#[serial]
fn test_malformed_environment_value() {
    let _env = clear_srvname_env_vars();
    let temp = TempDir::new().unwrap();
    let _guard = EnvGuard::new("SRVNAME_BUSY_TIMEOUT_MS", "soon");

    let err = ConfigBuilder::new()
        .with_data_dir(temp.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_unknown_key_rejected() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "port_range: 5000\n");

    let err = ConfigBuilder::new()
        .with_data_dir(temp.path())
        .skip_env()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_configured_defaults_reach_service() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "naming:\n  defaults:\n    region: EU\n    environment: P\n",
    );

    let config = ConfigBuilder::new()
        .with_data_dir(temp.path())
        .skip_env()
        .with_config(Config {
            operation_timeout_ms: Some(5000),
            ..Default::default()
        })
        .build()
        .unwrap();

    let db = Database::open(config.database_config(Some(temp.path())).unwrap()).unwrap();
    let mut service = NameService::new(
        db,
        ServiceConfig::from(&config),
        Logger::new(LogLevel::Quiet),
    );

    let outcome = service
        .reserve(&NameFields::new("AB", "V", "X", "", "", "SV"))
        .unwrap();
    assert_eq!(outcome.server_name, "ABVXEUPSV001");
}
