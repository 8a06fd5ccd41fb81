//! Reserve and preview.
//!
//! A reserve normalizes the request, takes the next sequence number for the
//! resulting base pattern and stores a `reserved` row carrying the encoded
//! name. The counter increment and the insert share one transaction, so a
//! failed reserve leaves the counter untouched.

use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::logging::event;
use crate::naming::{NameFields, NormalizedFields};
use crate::reservation::{Reservation, ReservationId};

use super::service::NameService;

/// Result of a successful reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveOutcome {
    /// Id of the new reservation.
    pub reservation_id: ReservationId,
    /// The encoded server name.
    pub server_name: String,
}

impl NameService {
    /// Reserves the next server name for `fields`.
    ///
    /// Empty fields take the configured defaults; longer values are
    /// upper-cased and truncated. The new reservation starts out
    /// `reserved`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationConflict`] if a committed reservation
    /// already holds the encoded name, [`Error::Timeout`] if the deadline
    /// passes, or a database error if the store fails.
    pub fn reserve(&mut self, fields: &NameFields) -> Result<ReserveOutcome> {
        let normalized = fields.normalize(&self.config.naming_defaults);
        let deadline = self.config.operation_timeout;

        let result = self.db.with_transaction(deadline, |tx| {
            let sequence = Database::allocate_sequence(tx, &normalized)?;
            let reservation = Reservation::builder(normalized.clone(), sequence).build();

            if Database::is_name_committed(tx, reservation.server_name())? {
                return Err(Error::ReservationConflict {
                    details: format!(
                        "server name {} is already committed",
                        reservation.server_name()
                    ),
                });
            }

            Database::insert_reservation(tx, &reservation)?;
            Ok(reservation)
        });
        let reservation = self.observe("reserve", result)?;

        let id = reservation.id().to_string();
        let sequence = reservation.sequence_num().to_string();
        if NormalizedFields::wraps(reservation.sequence_num()) {
            self.logger.warn(&event(
                "sequence_wrapped",
                &[
                    ("base_pattern", &normalized.base_pattern()),
                    ("sequence", &sequence),
                    ("server_name", reservation.server_name()),
                ],
            ));
        }
        self.logger.info(&event(
            "reserved",
            &[
                ("id", &id),
                ("server_name", reservation.server_name()),
                ("sequence", &sequence),
            ],
        ));

        Ok(ReserveOutcome {
            reservation_id: reservation.id(),
            server_name: reservation.server_name().to_string(),
        })
    }

    /// Returns the name the next [`reserve`](Self::reserve) of `fields`
    /// would produce, without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read.
    pub fn preview(&self, fields: &NameFields) -> Result<String> {
        let normalized = fields.normalize(&self.config.naming_defaults);
        let result = self
            .db
            .with_snapshot(|conn| Database::current_sequence(conn, &normalized));
        let current = self.observe("preview", result)?;
        Ok(normalized.encode(current.saturating_add(1)))
    }
}
