//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::naming::{NameFields, NamingDefaults, NormalizedFields};

/// Creates a temporary file-backed test database.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Normalized fields for the common `AB V X EU P SV` example.
#[must_use]
pub fn sample_fields() -> NormalizedFields {
    NameFields::new("AB", "V", "X", "EU", "P", "SV").normalize(&NamingDefaults::default())
}

/// Normalized fields with a custom environment and region.
#[must_use]
pub fn fields_in(environment: &str, region: &str) -> NormalizedFields {
    NameFields::new("AB", "V", "X", region, environment, "SV")
        .normalize(&NamingDefaults::default())
}
