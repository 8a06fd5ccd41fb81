//! Release: returns a committed name to the reserved state.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::logging::event;
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

use super::service::{reservation_not_found, NameService};

impl NameService {
    /// Releases a committed reservation. The reservation keeps its name and
    /// goes back to `reserved`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this id and
    /// [`Error::InvalidState`] if it is not committed.
    pub fn release(&mut self, id: &ReservationId) -> Result<Reservation> {
        let deadline = self.config.operation_timeout;
        let result = self.db.with_transaction(deadline, |tx| {
            let existing = Database::get_reservation(tx, id)?
                .ok_or_else(|| reservation_not_found(id))?;
            let not_committed = |status| Error::InvalidState {
                id: *id,
                status,
                operation: "release",
            };
            if !existing.is_committed() {
                return Err(not_committed(existing.status()));
            }

            if !Database::mark_released(tx, id)? {
                return Err(not_committed(ReservationStatus::Reserved));
            }

            Database::get_reservation(tx, id)?.ok_or_else(|| reservation_not_found(id))
        });
        let reservation = self.observe("release", result)?;

        self.logger.info(&event(
            "released",
            &[
                ("id", &id.to_string()),
                ("server_name", reservation.server_name()),
            ],
        ));
        Ok(reservation)
    }
}
