//! Database CRUD operations for reservations.
//!
//! All functions take a plain `&Connection` so they can run either directly
//! against a [`Database`] or inside a transaction opened by
//! [`Database::with_transaction`] (a `Transaction` derefs to a
//! `Connection`).

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::naming::{escape_like, NormalizedFields};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

use super::connection::Database;
use super::schema::RESERVATION_COLUMNS;

/// Converts a timestamp to Unix epoch seconds for database storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a timestamp.
pub(super) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(0, secs))
}

/// Deserializes a reservation from a row selected with
/// [`RESERVATION_COLUMNS`].
pub(super) fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: String = row.get(0)?;
    let id: ReservationId = id
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    let fields = NormalizedFields {
        unit_code: row.get(2)?,
        server_type: row.get(3)?,
        provider: row.get(4)?,
        region: row.get(5)?,
        environment: row.get(6)?,
        function: row.get(7)?,
    };

    let status: String = row.get(9)?;
    let status: ReservationStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;

    Ok(Reservation::builder(fields, row.get(8)?)
        .id(id)
        .server_name(row.get::<_, String>(1)?)
        .status(status)
        .created_at(unix_secs_to_datetime(row.get(10)?)?)
        .updated_at(unix_secs_to_datetime(row.get(11)?)?)
        .build())
}

fn query_reservations(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(sql)?;
    let reservations = stmt
        .query_map(params, row_to_reservation)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(reservations)
}

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (id, server_name, unit_code, type, provider, region, environment, function,
     sequence_num, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const MARK_COMMITTED: &str = r"
    UPDATE reservations
    SET status = 'committed', updated_at = ?
    WHERE id = ? AND status <> 'committed'
";

const MARK_RELEASED: &str = r"
    UPDATE reservations
    SET status = 'reserved', updated_at = ?
    WHERE id = ? AND status = 'committed'
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

const NAME_COMMITTED: &str = r"
    SELECT EXISTS (
        SELECT 1 FROM reservations WHERE server_name = ? AND status = 'committed'
    )
";

impl Database {
    /// Inserts a new reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationConflict`] if the server name or id is
    /// already stored, or a database error if the insert fails otherwise.
    pub fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<()> {
        let fields = reservation.fields();
        let result = conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.id().to_string(),
                reservation.server_name(),
                fields.unit_code(),
                fields.server_type(),
                fields.provider(),
                fields.region(),
                fields.environment(),
                fields.function(),
                reservation.sequence_num(),
                reservation.status().as_str(),
                datetime_to_unix_secs(reservation.created_at()),
                datetime_to_unix_secs(reservation.updated_at()),
            ],
        );

        match result.map_err(Error::from) {
            Ok(_) => Ok(()),
            Err(e) if e.is_unique_violation() => Err(Error::ReservationConflict {
                details: format!(
                    "server name {} is already reserved",
                    reservation.server_name()
                ),
            }),
            Err(e) => Err(e),
        }
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_reservation(conn: &Connection, id: &ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id.to_string()], row_to_reservation)
            .optional()?)
    }

    /// Retrieves a reservation by its encoded server name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn find_by_server_name(conn: &Connection, server_name: &str) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE server_name = ?");
        Ok(conn
            .query_row(&sql, [server_name], row_to_reservation)
            .optional()?)
    }

    /// Returns true if a committed reservation holds `server_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_name_committed(conn: &Connection, server_name: &str) -> Result<bool> {
        Ok(conn.query_row(NAME_COMMITTED, [server_name], |row| row.get(0))?)
    }

    /// Moves a reservation to `committed` unless it already is.
    ///
    /// Returns `false` when no row changed: the reservation is missing or
    /// was committed already.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_committed(conn: &Connection, id: &ReservationId) -> Result<bool> {
        let now = datetime_to_unix_secs(Utc::now());
        let rows = conn.execute(MARK_COMMITTED, params![now, id.to_string()])?;
        Ok(rows > 0)
    }

    /// Moves a committed reservation back to `reserved`.
    ///
    /// Returns `false` when no row changed: the reservation is missing or
    /// was not committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_released(conn: &Connection, id: &ReservationId) -> Result<bool> {
        let now = datetime_to_unix_secs(Utc::now());
        let rows = conn.execute(MARK_RELEASED, params![now, id.to_string()])?;
        Ok(rows > 0)
    }

    /// Deletes a reservation. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation(conn: &Connection, id: &ReservationId) -> Result<bool> {
        let rows = conn.execute(DELETE_RESERVATION, [id.to_string()])?;
        Ok(rows > 0)
    }

    /// Lists all reservations, newest first.
    ///
    /// Rows created in the same second are returned in reverse insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY created_at DESC, rowid DESC"
        );
        query_reservations(conn, &sql, [])
    }

    /// Lists the `limit` most recently created reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_recent_reservations(conn: &Connection, limit: u32) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             ORDER BY created_at DESC, rowid DESC LIMIT ?"
        );
        query_reservations(conn, &sql, [limit])
    }

    /// Lists reservations with the given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_reservations_by_status(
        conn: &Connection,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE status = ? \
             ORDER BY created_at DESC, rowid DESC"
        );
        query_reservations(conn, &sql, [status.as_str()])
    }

    /// Lists reservations whose server name starts with `prefix`, newest
    /// first. Wildcard characters in `prefix` match literally and the
    /// comparison is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_reservations_with_prefix(
        conn: &Connection,
        prefix: &str,
    ) -> Result<Vec<Reservation>> {
        // LIKE ignores ASCII case; the substr comparison restores it
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE server_name LIKE ?1 || '%' ESCAPE '\\' \
               AND substr(server_name, 1, length(?2)) = ?2 \
             ORDER BY created_at DESC, rowid DESC"
        );
        query_reservations(conn, &sql, [escape_like(prefix), prefix.to_string()])
    }
}
