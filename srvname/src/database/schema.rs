//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the srvname reservation store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// `server_name` is unique across all rows, so a name produced twice (for
/// example after the three-digit suffix wraps) fails the insert instead of
/// silently duplicating.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id TEXT PRIMARY KEY NOT NULL,
        server_name TEXT NOT NULL UNIQUE,
        unit_code TEXT NOT NULL,
        type TEXT NOT NULL,
        provider TEXT NOT NULL,
        region TEXT NOT NULL,
        environment TEXT NOT NULL,
        function TEXT NOT NULL,
        sequence_num INTEGER NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('reserved', 'committed')),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the sequences table.
///
/// One row per distinct set of normalized naming fields.
pub const CREATE_SEQUENCES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS sequences (
        unit_code TEXT NOT NULL,
        type TEXT NOT NULL,
        provider TEXT NOT NULL,
        region TEXT NOT NULL,
        environment TEXT NOT NULL,
        function TEXT NOT NULL,
        current_value INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        PRIMARY KEY (unit_code, type, provider, region, environment, function)
    )";

/// Index used by status filters and the commit/release guards.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// Index used by listing and statistics, which order by creation time.
pub const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_created_at ON reservations(created_at)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every query that loads full reservations.
///
/// Expected by `row_to_reservation` in exactly this order.
pub const RESERVATION_COLUMNS: &str = "id, server_name, unit_code, type, provider, region, \
     environment, function, sequence_num, status, created_at, updated_at";
