//! Per-key sequence counters.
//!
//! Each distinct set of normalized naming fields owns one counter row. The
//! counter is advanced with a single upsert statement, so allocation is
//! atomic even before the surrounding write transaction is considered.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::Result;
use crate::naming::NormalizedFields;

use super::connection::Database;
use super::operations::{datetime_to_unix_secs, unix_secs_to_datetime};

const ALLOCATE_NEXT: &str = r"
    INSERT INTO sequences
    (unit_code, type, provider, region, environment, function, current_value, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)
    ON CONFLICT (unit_code, type, provider, region, environment, function)
    DO UPDATE SET current_value = current_value + 1, updated_at = excluded.updated_at
    RETURNING current_value
";

const SELECT_CURRENT: &str = r"
    SELECT current_value FROM sequences
    WHERE unit_code = ? AND type = ? AND provider = ? AND region = ?
      AND environment = ? AND function = ?
";

const LIST_SEQUENCES: &str = r"
    SELECT unit_code, type, provider, region, environment, function,
           current_value, created_at, updated_at
    FROM sequences
    ORDER BY unit_code, type, provider, region, environment, function
";

/// A stored sequence counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceCounter {
    /// The key the counter belongs to.
    #[serde(flatten)]
    pub fields: NormalizedFields,
    /// The last value handed out.
    pub current_value: u32,
    /// When the counter was first used.
    pub created_at: DateTime<Utc>,
    /// When the counter last advanced.
    pub updated_at: DateTime<Utc>,
}

impl Database {
    /// Advances the counter for `fields` and returns the new value.
    ///
    /// The first allocation for a key returns 1. Must run inside the write
    /// transaction that also inserts the reservation, so that a rollback
    /// returns the number.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn allocate_sequence(conn: &Connection, fields: &NormalizedFields) -> Result<u32> {
        let now = datetime_to_unix_secs(Utc::now());
        let value: u32 = conn.query_row(
            ALLOCATE_NEXT,
            params![
                fields.unit_code(),
                fields.server_type(),
                fields.provider(),
                fields.region(),
                fields.environment(),
                fields.function(),
                now,
            ],
            |row| row.get(0),
        )?;

        log::debug!("allocated sequence {value} for {fields}");
        Ok(value)
    }

    /// Returns the last value handed out for `fields`, or 0 if none was.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn current_sequence(conn: &Connection, fields: &NormalizedFields) -> Result<u32> {
        match conn.query_row(
            SELECT_CURRENT,
            params![
                fields.unit_code(),
                fields.server_type(),
                fields.provider(),
                fields.region(),
                fields.environment(),
                fields.function(),
            ],
            |row| row.get(0),
        ) {
            Ok(value) => Ok(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists every counter, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sequences(conn: &Connection) -> Result<Vec<SequenceCounter>> {
        let mut stmt = conn.prepare(LIST_SEQUENCES)?;
        let counters = stmt
            .query_map([], |row| {
                Ok(SequenceCounter {
                    fields: NormalizedFields {
                        unit_code: row.get(0)?,
                        server_type: row.get(1)?,
                        provider: row.get(2)?,
                        region: row.get(3)?,
                        environment: row.get(4)?,
                        function: row.get(5)?,
                    },
                    current_value: row.get(6)?,
                    created_at: unix_secs_to_datetime(row.get(7)?)?,
                    updated_at: unix_secs_to_datetime(row.get(8)?)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, fields_in, sample_fields};

    #[test]
    fn test_first_allocation_is_one() {
        let db = create_test_database();
        let fields = sample_fields();

        assert_eq!(Database::current_sequence(db.connection(), &fields).unwrap(), 0);
        assert_eq!(Database::allocate_sequence(db.connection(), &fields).unwrap(), 1);
        assert_eq!(Database::allocate_sequence(db.connection(), &fields).unwrap(), 2);
        assert_eq!(Database::current_sequence(db.connection(), &fields).unwrap(), 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let db = create_test_database();
        let prod = fields_in("P", "EU");
        let dev = fields_in("D", "EU");

        assert_eq!(Database::allocate_sequence(db.connection(), &prod).unwrap(), 1);
        assert_eq!(Database::allocate_sequence(db.connection(), &prod).unwrap(), 2);
        assert_eq!(Database::allocate_sequence(db.connection(), &dev).unwrap(), 1);
    }

    #[test]
    fn test_rollback_returns_number() {
        let mut db = create_test_database();
        let fields = sample_fields();

        let result: Result<()> = db.with_transaction(None, |tx| {
            Database::allocate_sequence(tx, &fields)?;
            Err(crate::Error::ReservationConflict {
                details: "forced".into(),
            })
        });
        assert!(result.is_err());

        assert_eq!(Database::current_sequence(db.connection(), &fields).unwrap(), 0);
    }

    #[test]
    fn test_list_sequences() {
        let db = create_test_database();
        Database::allocate_sequence(db.connection(), &fields_in("P", "EU")).unwrap();
        Database::allocate_sequence(db.connection(), &fields_in("D", "EU")).unwrap();
        Database::allocate_sequence(db.connection(), &fields_in("D", "EU")).unwrap();

        let counters = Database::list_sequences(db.connection()).unwrap();
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[0].fields.environment(), "D");
        assert_eq!(counters[0].current_value, 2);
        assert_eq!(counters[1].fields.environment(), "P");
        assert_eq!(counters[1].current_value, 1);
    }
}
