//! The reservation lifecycle.
//!
//! [`NameService`] owns a [`Database`](crate::Database) and runs each
//! operation in its own transaction. A reservation moves between two
//! states:
//!
//! ```text
//!   reserve ──▶ reserved ──commit──▶ committed
//!                  ▲                    │
//!                  └──────release───────┘
//! ```
//!
//! Delete removes a reservation in either state, subject to the
//! [`DeletePolicy`](crate::config::DeletePolicy).
//!
//! # Examples
//!
//! ```
//! use srvname::{Database, Logger, NameService, ServiceConfig, ReservationStatus};
//! use srvname::naming::NameFields;
//!
//! let db = Database::open_in_memory().unwrap();
//! let mut service = NameService::new(db, ServiceConfig::new(), Logger::default());
//!
//! let fields = NameFields::new("AB", "V", "X", "EU", "P", "SV");
//! let outcome = service.reserve(&fields).unwrap();
//!
//! service.commit(&outcome.reservation_id).unwrap();
//! let released = service.release(&outcome.reservation_id).unwrap();
//! assert_eq!(released.status(), ReservationStatus::Reserved);
//! assert_eq!(released.server_name(), "ABVXEUPSV001");
//! ```

pub mod commit;
pub mod delete;
pub mod list;
pub mod release;
pub mod reserve;
pub mod service;
pub mod stats;

pub use reserve::ReserveOutcome;
pub use service::{NameService, ServiceConfig};
