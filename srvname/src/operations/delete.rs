//! Delete: removes a reservation, subject to the delete policy.

use crate::config::DeletePolicy;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::logging::event;
use crate::reservation::{Reservation, ReservationId};

use super::service::{reservation_not_found, NameService};

impl NameService {
    /// Deletes a reservation and returns the removed row.
    ///
    /// Under [`DeletePolicy::ForbidCommitted`] a committed reservation must
    /// be released first. Deleting never rewinds the sequence counter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this id and
    /// [`Error::InvalidState`] if the policy forbids deleting it.
    pub fn delete(&mut self, id: &ReservationId) -> Result<Reservation> {
        let deadline = self.config.operation_timeout;
        let policy = self.config.delete_policy;
        let result = self.db.with_transaction(deadline, |tx| {
            let existing = Database::get_reservation(tx, id)?
                .ok_or_else(|| reservation_not_found(id))?;

            if policy == DeletePolicy::ForbidCommitted && existing.is_committed() {
                return Err(Error::InvalidState {
                    id: *id,
                    status: existing.status(),
                    operation: "delete",
                });
            }

            if !Database::delete_reservation(tx, id)? {
                return Err(reservation_not_found(id));
            }
            Ok(existing)
        });
        let reservation = self.observe("delete", result)?;

        self.logger.info(&event(
            "deleted",
            &[
                ("id", &id.to_string()),
                ("server_name", reservation.server_name()),
                ("status", reservation.status().as_str()),
            ],
        ));
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::logging::{LogLevel, Logger};
    use crate::naming::NameFields;
    use crate::operations::ServiceConfig;

    fn service(policy: DeletePolicy) -> NameService {
        let db = Database::open_in_memory().unwrap();
        let config = ServiceConfig::new().with_delete_policy(policy);
        NameService::new(db, config, Logger::new(LogLevel::Quiet))
    }

    fn fields() -> NameFields {
        NameFields::new("AB", "V", "X", "EU", "P", "SV")
    }

    #[test]
    fn test_delete_reserved() {
        let mut service = service(DeletePolicy::ForbidCommitted);
        let outcome = service.reserve(&fields()).unwrap();

        let deleted = service.delete(&outcome.reservation_id).unwrap();
        assert_eq!(deleted.server_name(), outcome.server_name);
        assert!(service.get(&outcome.reservation_id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_forbid_committed() {
        let mut service = service(DeletePolicy::ForbidCommitted);
        let outcome = service.reserve(&fields()).unwrap();
        service.commit(&outcome.reservation_id).unwrap();

        let err = service.delete(&outcome.reservation_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        service.release(&outcome.reservation_id).unwrap();
        service.delete(&outcome.reservation_id).unwrap();
    }

    #[test]
    fn test_allow_any_deletes_committed() {
        let mut service = service(DeletePolicy::AllowAny);
        let outcome = service.reserve(&fields()).unwrap();
        service.commit(&outcome.reservation_id).unwrap();

        service.delete(&outcome.reservation_id).unwrap();
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_does_not_reuse_sequence() {
        let mut service = service(DeletePolicy::ForbidCommitted);
        let first = service.reserve(&fields()).unwrap();
        service.delete(&first.reservation_id).unwrap();

        let second = service.reserve(&fields()).unwrap();
        assert_eq!(second.server_name, "ABVXEUPSV002");
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut service = service(DeletePolicy::AllowAny);
        let err = service.delete(&ReservationId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
