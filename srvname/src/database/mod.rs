//! Database layer for persistent storage of server name reservations.
//!
//! This module provides a SQLite-based reservation store: connection
//! management, schema versioning, reservation CRUD, per-key sequence
//! counters, aggregate statistics and scoped transactions.
//!
//! # Examples
//!
//! ```
//! use srvname::database::Database;
//! use srvname::naming::{NameFields, NamingDefaults};
//! use srvname::Reservation;
//!
//! let mut db = Database::open_in_memory().unwrap();
//! let fields = NameFields::new("AB", "V", "X", "EU", "P", "SV")
//!     .normalize(&NamingDefaults::default());
//!
//! let reservation = db
//!     .with_transaction(None, |tx| {
//!         let sequence = Database::allocate_sequence(tx, &fields)?;
//!         let reservation = Reservation::builder(fields.clone(), sequence).build();
//!         Database::insert_reservation(tx, &reservation)?;
//!         Ok(reservation)
//!     })
//!     .unwrap();
//!
//! assert_eq!(reservation.server_name(), "ABVXEUPSV001");
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod sequence;
mod stats;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV, DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
pub use sequence::SequenceCounter;
pub use stats::{DailyCount, FieldCount, ReservationStats, DAILY_WINDOW_DAYS, RECENT_LIMIT, TOP_LIMIT};
