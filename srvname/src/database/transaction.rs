//! Scoped transaction helpers.
//!
//! Every write in srvname runs inside [`Database::with_transaction`]: the
//! closure receives the open transaction, the transaction commits only when
//! the closure returns `Ok`, and any other exit (an `Err`, an early return
//! through `?`, or a panic unwinding through the closure) rolls it back.

use std::time::{Duration, Instant};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

/// Number of `SQLite` virtual machine steps between deadline checks.
const DEADLINE_CHECK_INTERVAL: i32 = 1000;

/// Installs a progress handler that interrupts statements past a deadline,
/// and removes it again when dropped.
struct DeadlineGuard<'a> {
    conn: &'a Connection,
}

impl<'a> DeadlineGuard<'a> {
    fn install(conn: &'a Connection, deadline: Instant) -> Self {
        conn.progress_handler(
            DEADLINE_CHECK_INTERVAL,
            Some(move || Instant::now() >= deadline),
        );
        Self { conn }
    }
}

impl Drop for DeadlineGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn timeout_error(limit: Duration) -> Error {
    Error::Timeout {
        millis: limit.as_millis() as u64,
    }
}

impl Database {
    /// Runs `f` inside an immediate (write-locking) transaction.
    ///
    /// `BEGIN IMMEDIATE` takes the database write lock up front, so two
    /// callers running this concurrently are fully serialized; the second
    /// waits up to the configured busy timeout for the lock.
    ///
    /// When `deadline` is set, statements still running once it has elapsed
    /// are interrupted, the transaction rolls back, and
    /// [`Error::Timeout`] is returned.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a database error if the transaction
    /// cannot be started or committed.
    ///
    /// # Examples
    ///
    /// ```
    /// use srvname::Database;
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let count: i64 = db
    ///     .with_transaction(None, |tx| {
    ///         Ok(tx.query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))?)
    ///     })
    ///     .unwrap();
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_transaction<T, F>(&mut self, deadline: Option<Duration>, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let started = Instant::now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let guard = deadline.map(|limit| DeadlineGuard::install(&tx, started + limit));
        let result = f(&tx);
        drop(guard);

        match result {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                drop(tx);
                match deadline {
                    Some(limit) if e.is_interrupted() => Err(timeout_error(limit)),
                    _ => Err(e),
                }
            }
        }
    }

    /// Runs `f` against a consistent read snapshot.
    ///
    /// Used by multi-query reads such as statistics, so that all counts
    /// come from the same committed state. Nothing is written; the
    /// transaction is always rolled back.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a database error if the snapshot
    /// cannot be started.
    pub fn with_snapshot<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        f(&tx)
    }
}
