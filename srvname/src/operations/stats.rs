//! Store statistics.

use chrono::{NaiveDate, Utc};

use crate::database::ReservationStats;
use crate::error::Result;

use super::service::NameService;

impl NameService {
    /// Summarizes the store as of today (UTC).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn stats(&self) -> Result<ReservationStats> {
        self.stats_as_of(Utc::now().date_naive())
    }

    /// Summarizes the store with the daily window ending on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn stats_as_of(&self, today: NaiveDate) -> Result<ReservationStats> {
        let result = self.db.reservation_stats(today);
        self.observe("stats", result)
    }
}
