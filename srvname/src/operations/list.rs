//! Read-only queries over reservations and counters.

use crate::database::{Database, SequenceCounter};
use crate::error::Result;
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

use super::service::{reservation_not_found, NameService};

impl NameService {
    /// Returns every reservation, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_all(&self) -> Result<Vec<Reservation>> {
        let result = Database::list_all_reservations(self.db.connection());
        self.observe("list", result)
    }

    /// Returns the reservations in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        let result = Database::list_reservations_by_status(self.db.connection(), status);
        self.observe("list", result)
    }

    /// Returns the reservations whose name starts with `prefix`, newest
    /// first. `%` and `_` match literally and case must match.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_by_prefix(&self, prefix: &str) -> Result<Vec<Reservation>> {
        let result = Database::list_reservations_with_prefix(self.db.connection(), prefix);
        self.observe("list", result)
    }

    /// Returns one reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no reservation
    /// has this id.
    pub fn get(&self, id: &ReservationId) -> Result<Reservation> {
        let result = Database::get_reservation(self.db.connection(), id)
            .and_then(|found| found.ok_or_else(|| reservation_not_found(id)));
        self.observe("get", result)
    }

    /// Looks a reservation up by its encoded name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find_by_server_name(&self, server_name: &str) -> Result<Option<Reservation>> {
        let result = Database::find_by_server_name(self.db.connection(), server_name);
        self.observe("find", result)
    }

    /// Returns every sequence counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_sequences(&self) -> Result<Vec<SequenceCounter>> {
        let result = Database::list_sequences(self.db.connection());
        self.observe("sequences", result)
    }
}
