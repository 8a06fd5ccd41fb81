//! Commit: marks a reserved name as in use.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::logging::event;
use crate::reservation::{Reservation, ReservationId};

use super::service::{reservation_not_found, NameService};

impl NameService {
    /// Commits a reservation and returns it in its new state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this id and
    /// [`Error::AlreadyCommitted`] if it is already committed, including
    /// when a concurrent commit wins the race.
    pub fn commit(&mut self, id: &ReservationId) -> Result<Reservation> {
        let deadline = self.config.operation_timeout;
        let result = self.db.with_transaction(deadline, |tx| {
            let existing = Database::get_reservation(tx, id)?
                .ok_or_else(|| reservation_not_found(id))?;
            if existing.is_committed() {
                return Err(Error::AlreadyCommitted { id: *id });
            }

            if !Database::mark_committed(tx, id)? {
                return Err(Error::AlreadyCommitted { id: *id });
            }

            Database::get_reservation(tx, id)?.ok_or_else(|| reservation_not_found(id))
        });
        let reservation = self.observe("commit", result)?;

        self.logger.info(&event(
            "committed",
            &[
                ("id", &id.to_string()),
                ("server_name", reservation.server_name()),
            ],
        ));
        Ok(reservation)
    }
}
