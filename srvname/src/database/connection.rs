//! Opening the reservation store.
//!
//! Every open applies the same pragmas and checks the schema version, so a
//! `Database` handed to the service is always ready for reservations.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// The reservation store.
///
/// Each `Database` owns one `SQLite` connection. Concurrent callers (threads
/// or processes) each open their own `Database` on the same file; the WAL
/// journal and write transactions serialize them.
///
/// # Examples
///
/// ```no_run
/// use srvname::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/srvname.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens (and if allowed, creates) the store at `config.path`.
    ///
    /// Writable stores are switched to WAL so readers never block the
    /// single writer. A fresh file gets the current schema; an existing
    /// one must already be at the current version.
    ///
    /// # Errors
    ///
    /// Fails if the data directory or file cannot be created or opened,
    /// a pragma is rejected, or the schema version does not match.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // busy_timeout goes first so the WAL switch itself waits on a locked file
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // PRAGMA journal_mode returns a row, so it needs query_row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;

        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened database at {}", config.path.display());

        Ok(Self { conn, config })
    }

    /// Opens a private in-memory database.
    ///
    /// Useful for tests and dry runs. The schema is initialized immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if schema initialization fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self {
            conn,
            config: DatabaseConfig::new(":memory:"),
        })
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Raw connection, for the free-standing query helpers.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");

        assert!(!path.parent().unwrap().exists());
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            Database::open(DatabaseConfig::new(&path)).unwrap();
        }

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        let result = db.connection().execute("CREATE TABLE test (id INTEGER)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_database_without_auto_create_fails() {
        let dir = tempdir().unwrap();
        let mut config = DatabaseConfig::new(dir.path().join("absent.db"));
        config.auto_create = false;
        assert!(Database::open(config).is_err());
    }

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let version = super::super::migrations::get_schema_version(db.connection()).unwrap();
        assert_eq!(version, super::super::schema::CURRENT_SCHEMA_VERSION);
    }
}
