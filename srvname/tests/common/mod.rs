//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};

use srvname::database::{Database, DatabaseConfig};
use srvname::{LogLevel, Logger, NameFields, NameService, ServiceConfig};

/// Creates a temporary directory holding a database path.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn database_dir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    (dir, path)
}

/// Opens (and, the first time, creates) the database at `path`.
#[allow(dead_code)]
pub fn open_database(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Creates a quiet service over the database at `path`.
#[allow(dead_code)]
pub fn service_at(path: &Path, config: ServiceConfig) -> NameService {
    NameService::new(open_database(path), config, Logger::new(LogLevel::Quiet))
}

/// Creates a quiet service over a fresh temporary database.
///
/// Keep the returned `TempDir` alive for as long as the service is used;
/// dropping it removes the database.
#[allow(dead_code)]
pub fn create_test_service(config: ServiceConfig) -> (tempfile::TempDir, NameService) {
    let (dir, path) = database_dir();
    let service = service_at(&path, config);
    (dir, service)
}

/// The `AB V X EU P SV` request used throughout the tests.
#[allow(dead_code)]
pub fn sample_fields() -> NameFields {
    NameFields::new("AB", "V", "X", "EU", "P", "SV")
}
