//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::naming::NamingDefaults;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use srvname::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { operation_timeout_ms: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid setting.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref database) = config.database {
            if database.busy_timeout_ms == Some(0) {
                return Err(Error::Validation {
                    field: "database.busy_timeout_ms".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if config.operation_timeout_ms == Some(0) {
            return Err(Error::Validation {
                field: "operation_timeout_ms".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if let Some(ref naming) = config.naming {
            Self::validate_naming_defaults(&naming.defaults)?;
        }

        Ok(())
    }

    /// Each default must be non-empty, upper-case alphanumeric, and fit its
    /// field, so a default normalizes to itself.
    fn validate_naming_defaults(defaults: &NamingDefaults) -> Result<()> {
        for (field, value, width) in defaults.entries() {
            let field = format!("naming.defaults.{field}");
            if value.is_empty() {
                return Err(Error::Validation {
                    field,
                    message: "Default must not be empty".into(),
                });
            }
            if !value
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            {
                return Err(Error::Validation {
                    field,
                    message: format!("Default '{value}' must be upper-case letters or digits"),
                });
            }
            if value.chars().count() > width {
                return Err(Error::Validation {
                    field,
                    message: format!("Default '{value}' exceeds field width {width}"),
                });
            }
        }
        Ok(())
    }
}
