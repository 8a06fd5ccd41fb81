//! Aggregate queries over the reservation table.

use chrono::{Days, NaiveDate};
use rusqlite::types::Type;
use rusqlite::Connection;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::reservation::Reservation;

use super::connection::Database;

/// Number of recent reservations included in statistics.
pub const RECENT_LIMIT: u32 = 10;

/// Number of entries in each top-N breakdown.
pub const TOP_LIMIT: u32 = 5;

/// Number of days covered by the daily breakdown, including today.
pub const DAILY_WINDOW_DAYS: u64 = 7;

const COUNT_BY_STATUS: &str = r"
    SELECT COUNT(*),
           COALESCE(SUM(status = 'committed'), 0),
           COALESCE(SUM(status = 'reserved'), 0)
    FROM reservations
";

const DAILY_COUNTS: &str = r"
    SELECT date(created_at, 'unixepoch') AS day,
           SUM(status = 'reserved'),
           SUM(status = 'committed')
    FROM reservations
    WHERE created_at >= ? AND created_at < ?
    GROUP BY day
    ORDER BY day
";

/// Reservation count for one value of a grouped field.
///
/// Serializes with the field name as key, e.g.
/// `{"environment": "P", "count": 3}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCount {
    /// The grouped column, `environment` or `region`.
    pub field: &'static str,
    /// The field value, such as an environment code.
    pub value: String,
    /// Number of reservations with that value.
    pub count: u64,
}

impl Serialize for FieldCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.field, &self.value)?;
        map.serialize_entry("count", &self.count)?;
        map.end()
    }
}

/// Reservations created on one day, split by current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// The UTC calendar day.
    pub date: NaiveDate,
    /// Reservations created that day that are still reserved.
    pub reserved: u64,
    /// Reservations created that day that are now committed.
    pub committed: u64,
}

/// Summary of the reservation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStats {
    /// Total number of reservations.
    #[serde(rename = "totalReservations")]
    pub total: u64,
    /// Number of committed reservations.
    #[serde(rename = "committedCount")]
    pub committed: u64,
    /// Number of reserved (uncommitted) reservations.
    #[serde(rename = "reservedCount")]
    pub reserved: u64,
    /// The most recently created reservations, newest first.
    #[serde(rename = "recentReservations")]
    pub recent: Vec<Reservation>,
    /// Environments with the most reservations.
    pub top_environments: Vec<FieldCount>,
    /// Regions with the most reservations.
    pub top_regions: Vec<FieldCount>,
    /// Per-day creation counts over the trailing window, oldest first.
    /// Days without reservations are omitted.
    #[serde(rename = "dailyActivity")]
    pub daily: Vec<DailyCount>,
}

fn top_values(conn: &Connection, column: &'static str) -> Result<Vec<FieldCount>> {
    let sql = format!(
        "SELECT {column}, COUNT(*) AS n FROM reservations \
         GROUP BY {column} ORDER BY n DESC, {column} ASC LIMIT ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let counts = stmt
        .query_map([TOP_LIMIT], |row| {
            Ok(FieldCount {
                field: column,
                value: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(counts)
}

fn day_start_secs(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map_or(0, |midnight| midnight.and_utc().timestamp())
}

fn daily_counts(conn: &Connection, today: NaiveDate) -> Result<Vec<DailyCount>> {
    let first_day = today
        .checked_sub_days(Days::new(DAILY_WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    let end_day = today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);

    let mut stmt = conn.prepare(DAILY_COUNTS)?;
    let counts = stmt
        .query_map([day_start_secs(first_day), day_start_secs(end_day)], |row| {
            let day: String = row.get(0)?;
            let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
            })?;
            Ok(DailyCount {
                date,
                reserved: row.get(1)?,
                committed: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(counts)
}

impl Database {
    /// Computes reservation statistics as of `today` (a UTC date).
    ///
    /// All figures come from a single read snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn reservation_stats(&self, today: NaiveDate) -> Result<ReservationStats> {
        self.with_snapshot(|conn| {
            let (total, committed, reserved) = conn.query_row(COUNT_BY_STATUS, [], |row| {
                Ok((
                    row.get::<_, u64>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, u64>(2)?,
                ))
            })?;

            Ok(ReservationStats {
                total,
                committed,
                reserved,
                recent: Self::list_recent_reservations(conn, RECENT_LIMIT)?,
                top_environments: top_values(conn, "environment")?,
                top_regions: top_values(conn, "region")?,
                daily: daily_counts(conn, today)?,
            })
        })
    }
}
