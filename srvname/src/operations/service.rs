//! The reservation lifecycle manager.

use std::error::Error as StdError;
use std::time::Duration;

use crate::config::{Config, DeletePolicy};
use crate::database::Database;
use crate::error::{Error, ErrorKind, Result};
use crate::logging::{event, Logger};
use crate::naming::NamingDefaults;
use crate::reservation::ReservationId;

/// Settings that shape how [`NameService`] runs operations.
///
/// # Examples
///
/// ```
/// use srvname::operations::ServiceConfig;
/// use srvname::config::DeletePolicy;
/// use std::time::Duration;
///
/// let config = ServiceConfig::new()
///     .with_operation_timeout(Some(Duration::from_secs(2)))
///     .with_delete_policy(DeletePolicy::AllowAny);
/// assert_eq!(config.delete_policy, DeletePolicy::AllowAny);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Deadline applied to each write transaction.
    pub operation_timeout: Option<Duration>,

    /// Whether committed reservations may be deleted.
    pub delete_policy: DeletePolicy,

    /// Values substituted for empty naming fields.
    pub naming_defaults: NamingDefaults,
}

impl ServiceConfig {
    /// Creates a configuration with no deadline, the default delete policy
    /// and the built-in naming defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-operation deadline.
    #[must_use]
    pub const fn with_operation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Sets the delete policy.
    #[must_use]
    pub const fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Sets the naming defaults.
    #[must_use]
    pub fn with_naming_defaults(mut self, defaults: NamingDefaults) -> Self {
        self.naming_defaults = defaults;
        self
    }
}

impl From<&Config> for ServiceConfig {
    fn from(config: &Config) -> Self {
        Self {
            operation_timeout: config.operation_timeout(),
            delete_policy: config.delete_policy(),
            naming_defaults: config.naming_defaults(),
        }
    }
}

/// Runs the reservation lifecycle against a store.
///
/// Every write runs in its own immediate transaction; nothing is cached
/// between calls. Callers that need concurrency use one service (and one
/// [`Database`]) each.
///
/// # Examples
///
/// ```
/// use srvname::{Database, Logger, NameService, ServiceConfig};
/// use srvname::naming::NameFields;
///
/// let db = Database::open_in_memory().unwrap();
/// let mut service = NameService::new(db, ServiceConfig::new(), Logger::default());
///
/// let fields = NameFields::new("AB", "V", "X", "EU", "P", "SV");
/// let outcome = service.reserve(&fields).unwrap();
/// assert_eq!(outcome.server_name, "ABVXEUPSV001");
///
/// service.commit(&outcome.reservation_id).unwrap();
/// assert!(service.commit(&outcome.reservation_id).is_err());
/// ```
#[derive(Debug)]
pub struct NameService {
    pub(super) db: Database,
    pub(super) config: ServiceConfig,
    pub(super) logger: Logger,
}

impl NameService {
    /// Creates a service over an open database.
    #[must_use]
    pub const fn new(db: Database, config: ServiceConfig, logger: Logger) -> Self {
        Self { db, config, logger }
    }

    /// Returns the underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Passes `result` through, logging a failure with its full cause chain.
    pub(super) fn observe<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            let kind = e.kind().to_string();
            let chain = error_chain(e);
            let line = event(
                "operation_failed",
                &[("operation", operation), ("kind", &kind), ("error", &chain)],
            );
            match e.kind() {
                ErrorKind::Internal => self.logger.error(&line),
                ErrorKind::Transient | ErrorKind::Timeout => self.logger.warn(&line),
                _ => self.logger.info(&line),
            }
        }
        result
    }
}

/// Joins an error and its sources with `": "`.
fn error_chain(error: &Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.ends_with(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }
    format!("\"{chain}\"")
}

pub(super) fn reservation_not_found(id: &ReservationId) -> Error {
    Error::NotFound {
        resource: format!("reservation {id}"),
    }
}
