//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into tests.
const HOST_ENV: [&str; 6] = [
    "SRVNAME_DATA_DIR",
    "SRVNAME_DB_PATH",
    "SRVNAME_BUSY_TIMEOUT_MS",
    "SRVNAME_OPERATION_TIMEOUT_MS",
    "SRVNAME_DELETE_POLICY",
    "SRVNAME_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the srvname data directory
    pub data_dir: PathBuf,
}

/// A reservation created through the CLI.
#[allow(dead_code)]
pub struct Reserved {
    pub id: String,
    pub server_name: String,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created yet; srvname creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("srvname-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a command builder without `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("srvname").expect("Failed to find srvname binary");
        for var in HOST_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `<data dir>/config.yaml`.
    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), content)
            .expect("Failed to write config");
    }

    /// Reserve a name for the given fields and return it.
    ///
    /// # Panics
    /// Panics if the reserve command fails or its output is not valid JSON.
    pub fn reserve(&self, fields: &[(&str, &str)]) -> Reserved {
        let mut cmd = self.command();
        cmd.arg("reserve");
        for (flag, value) in fields {
            cmd.arg(format!("--{flag}")).arg(value);
        }
        let output = cmd.output().expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Reserve output is not JSON");
        Reserved {
            id: json["reservationId"].as_str().unwrap().to_string(),
            server_name: json["serverName"].as_str().unwrap().to_string(),
        }
    }

    /// Reserve the `AB V X EU P SV` sample name.
    pub fn reserve_sample(&self) -> Reserved {
        self.reserve(&[
            ("unit", "AB"),
            ("type", "V"),
            ("provider", "X"),
            ("region", "EU"),
            ("env", "P"),
            ("function", "SV"),
        ])
    }
}
