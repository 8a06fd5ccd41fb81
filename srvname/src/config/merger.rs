//! Configuration merging and precedence handling.

use crate::config::schema::{Config, DatabaseSettings};

/// Merges configuration layers.
///
/// # Examples
///
/// ```
/// use srvname::config::{Config, ConfigMerger};
///
/// let low = Config { operation_timeout_ms: Some(100), ..Default::default() };
/// let high = Config { operation_timeout_ms: Some(200), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.operation_timeout_ms, Some(200));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Database settings: field-by-field merge
    /// - Naming settings: complete replacement
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.operation_timeout_ms.is_some() {
            target.operation_timeout_ms = source.operation_timeout_ms;
        }

        if source.delete_policy.is_some() {
            target.delete_policy = source.delete_policy;
        }

        if source.log_mode.is_some() {
            target.log_mode = source.log_mode;
        }

        if let Some(ref source_db) = source.database {
            let target_db = target
                .database
                .get_or_insert_with(DatabaseSettings::default);
            Self::merge_database(target_db, source_db);
        }

        if source.naming.is_some() {
            target.naming.clone_from(&source.naming);
        }
    }

    fn merge_database(target: &mut DatabaseSettings, source: &DatabaseSettings) {
        if source.path.is_some() {
            target.path.clone_from(&source.path);
        }
        if source.busy_timeout_ms.is_some() {
            target.busy_timeout_ms = source.busy_timeout_ms;
        }
    }
}
