#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # srvname
//!
//! A library for generating and reserving structured server names.
//!
//! A server name is six short codes (unit, type, provider, region,
//! environment, function) followed by a three-digit sequence number, e.g.
//! `ABVXEUPSV001`. Sequence numbers are allocated per combination of codes,
//! and every name goes through a small lifecycle: it is *reserved* first and
//! *committed* once it is actually in use.
//!
//! ## Core Types
//!
//! - [`NameFields`] and [`naming`]: Field normalization and name encoding
//! - [`Reservation`], [`ReservationId`] and [`ReservationStatus`]: Stored names
//! - [`Database`]: The SQLite reservation store
//! - [`NameService`]: Reserve, commit, release, delete, list and stats
//! - [`Error`], [`ErrorKind`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use srvname::{Database, Logger, NameFields, NameService, ServiceConfig};
//!
//! let db = Database::open_in_memory().unwrap();
//! let mut service = NameService::new(db, ServiceConfig::new(), Logger::default());
//!
//! let fields = NameFields::new("AB", "V", "X", "EU", "P", "SV");
//! let first = service.reserve(&fields).unwrap();
//! let second = service.reserve(&fields).unwrap();
//!
//! assert_eq!(first.server_name, "ABVXEUPSV001");
//! assert_eq!(second.server_name, "ABVXEUPSV002");
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod naming;
pub mod operations;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, DeletePolicy};
pub use database::{Database, DatabaseConfig, ReservationStats, SequenceCounter};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use naming::{NameFields, NamingDefaults, NormalizedFields};
pub use operations::{NameService, ReserveOutcome, ServiceConfig};
pub use reservation::{Reservation, ReservationId, ReservationStatus};
