//! Error types for the srvname library.
//!
//! This module provides the error hierarchy for all operations in the
//! srvname library, using `thiserror` for ergonomic error handling, along
//! with a stable [`ErrorKind`] classification that transports map to their
//! own status codes.

use std::fmt;

use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus};

/// Result type alias for operations that may fail with a srvname error.
///
/// # Examples
///
/// ```
/// use srvname::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the srvname library.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The generated name is already held by another reservation.
    #[error("reservation conflict: {details}")]
    ReservationConflict {
        /// Details about the conflict.
        details: String,
    },

    /// The reservation has already been committed.
    #[error("reservation {id} is already committed")]
    AlreadyCommitted {
        /// The reservation that was committed before.
        id: ReservationId,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The reservation is not in a state that permits the operation.
    #[error("cannot {operation} reservation {id}: status is {status}")]
    InvalidState {
        /// The reservation the operation targeted.
        id: ReservationId,
        /// The status the reservation was found in.
        status: ReservationStatus,
        /// The operation that was rejected.
        operation: &'static str,
    },

    /// The operation did not finish before its deadline.
    #[error("operation timed out after {millis}ms")]
    Timeout {
        /// The deadline that was exceeded, in milliseconds.
        millis: u64,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Stable classification of errors for callers.
///
/// Every [`Error`] maps to exactly one kind. Transports (the CLI exit codes,
/// an HTTP status mapping) should depend on the kind rather than on
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input was rejected before any state was touched.
    Validation,
    /// The request collides with existing state.
    Conflict,
    /// The referenced reservation does not exist.
    NotFound,
    /// The reservation is in the wrong status for the operation.
    InvalidState,
    /// The store was busy or locked; the caller may retry.
    Transient,
    /// The operation exceeded its deadline.
    Timeout,
    /// Anything else. Details are not meant for callers.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Conflict => write!(f, "conflict"),
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidState => write!(f, "invalid_state"),
            Self::Transient => write!(f, "transient"),
            Self::Timeout => write!(f, "timeout"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl Error {
    /// Returns the stable classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use srvname::{Error, ErrorKind};
    ///
    /// let err = Error::NotFound { resource: "reservation".into() };
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::ReservationConflict { .. } | Self::AlreadyCommitted { .. } => {
                ErrorKind::Conflict
            }
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Database(e) => match e.sqlite_error_code() {
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                    ErrorKind::Transient
                }
                Some(rusqlite::ErrorCode::OperationInterrupted) => ErrorKind::Timeout,
                _ => ErrorKind::Internal,
            },
            Self::Configuration(_)
            | Self::Io(_)
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Internal,
        }
    }

    /// Returns a message that is safe to show to callers.
    ///
    /// Internal errors are reduced to a generic message; their details
    /// belong in the server-side log.
    ///
    /// # Examples
    ///
    /// ```
    /// use srvname::Error;
    ///
    /// let err = Error::DatabaseCorruption { details: "page 7".into() };
    /// assert_eq!(err.public_message(), "internal error");
    /// ```
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "internal error".to_string(),
            ErrorKind::Transient => "storage is busy, try again".to_string(),
            ErrorKind::Timeout => "operation timed out".to_string(),
            _ => self.to_string(),
        }
    }

    /// Check if the error was caused by a statement being interrupted.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            Self::Database(e) if e.sqlite_error_code() == Some(rusqlite::ErrorCode::OperationInterrupted)
        )
    }

    /// Check if the error is a unique-constraint violation from the store.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        )
    }

    /// Check if error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use srvname::Error;
    ///
    /// let err = Error::NotFound { resource: "reservation".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
