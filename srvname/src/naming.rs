//! Server name fields, normalization and encoding.
//!
//! A server name is six fixed-width fields followed by a three-digit
//! sequence suffix:
//!
//! ```text
//!  AB  V  X  EU  P  SV  001
//!  │   │  │  │   │  │   └─ sequence % 1000, zero padded
//!  │   │  │  │   │  └───── function     (2)
//!  │   │  │  │   └──────── environment  (1)
//!  │   │  │  └──────────── region       (4)
//!  │   │  └─────────────── provider     (1)
//!  │   └────────────────── server type  (1)
//!  └────────────────────── unit code    (3)
//! ```
//!
//! Field widths are upper bounds: shorter values are not padded, so the six
//! fields together (the *base pattern*) are the sequence key.
//!
//! # Examples
//!
//! ```
//! use srvname::naming::{NameFields, NamingDefaults};
//!
//! let fields = NameFields::new("ab", "v", "x", "eu", "p", "sv");
//! let normalized = fields.normalize(&NamingDefaults::default());
//! assert_eq!(normalized.base_pattern(), "ABVXEUPSV");
//! assert_eq!(normalized.encode(1), "ABVXEUPSV001");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum width of the unit code field.
pub const UNIT_CODE_WIDTH: usize = 3;
/// Maximum width of the server type field.
pub const SERVER_TYPE_WIDTH: usize = 1;
/// Maximum width of the provider field.
pub const PROVIDER_WIDTH: usize = 1;
/// Maximum width of the region field.
pub const REGION_WIDTH: usize = 4;
/// Maximum width of the environment field.
pub const ENVIRONMENT_WIDTH: usize = 1;
/// Maximum width of the function field.
pub const FUNCTION_WIDTH: usize = 2;

/// Number of distinct sequence suffixes before the encoded suffix wraps.
pub const SEQUENCE_MODULUS: u32 = 1000;

/// Normalizes a single field value.
///
/// An empty value is replaced by `default` verbatim; anything else is
/// upper-cased and truncated to `max_len` characters. Whitespace is kept
/// like any other character.
///
/// # Examples
///
/// ```
/// use srvname::naming::normalize;
///
/// assert_eq!(normalize("eu", 4, "XXXX"), "EU");
/// assert_eq!(normalize("", 4, "XXXX"), "XXXX");
/// assert_eq!(normalize("abcdef", 3, "XXX"), "ABC");
/// assert_eq!(normalize(" a", 2, "XX"), " A");
/// ```
#[must_use]
pub fn normalize(value: &str, max_len: usize, default: &str) -> String {
    if value.is_empty() {
        return default.to_string();
    }
    value.to_uppercase().chars().take(max_len).collect()
}

/// Escapes `LIKE` wildcards so a pattern matches literally.
///
/// The result is intended for use with `LIKE ? ESCAPE '\'`.
///
/// # Examples
///
/// ```
/// use srvname::naming::escape_like;
///
/// assert_eq!(escape_like("AB_1%"), r"AB\_1\%");
/// ```
#[must_use]
pub fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Values substituted for empty fields during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NamingDefaults {
    /// Default unit code.
    pub unit_code: String,
    /// Default server type.
    pub server_type: String,
    /// Default provider.
    pub provider: String,
    /// Default region.
    pub region: String,
    /// Default environment.
    pub environment: String,
    /// Default function.
    pub function: String,
}

impl Default for NamingDefaults {
    fn default() -> Self {
        Self {
            unit_code: "XXX".into(),
            server_type: "X".into(),
            provider: "X".into(),
            region: "XXXX".into(),
            environment: "X".into(),
            function: "XX".into(),
        }
    }
}

impl NamingDefaults {
    /// Returns each default paired with its field name and width.
    pub(crate) fn entries(&self) -> [(&'static str, &str, usize); 6] {
        [
            ("unit_code", &self.unit_code, UNIT_CODE_WIDTH),
            ("server_type", &self.server_type, SERVER_TYPE_WIDTH),
            ("provider", &self.provider, PROVIDER_WIDTH),
            ("region", &self.region, REGION_WIDTH),
            ("environment", &self.environment, ENVIRONMENT_WIDTH),
            ("function", &self.function, FUNCTION_WIDTH),
        ]
    }
}

/// Raw naming fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameFields {
    /// Organizational unit code.
    pub unit_code: String,
    /// Server type code.
    #[serde(rename = "type")]
    pub server_type: String,
    /// Hosting provider code.
    pub provider: String,
    /// Region code.
    pub region: String,
    /// Environment code.
    pub environment: String,
    /// Function code.
    pub function: String,
}

impl NameFields {
    /// Creates a set of raw fields.
    #[must_use]
    pub fn new(
        unit_code: impl Into<String>,
        server_type: impl Into<String>,
        provider: impl Into<String>,
        region: impl Into<String>,
        environment: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            unit_code: unit_code.into(),
            server_type: server_type.into(),
            provider: provider.into(),
            region: region.into(),
            environment: environment.into(),
            function: function.into(),
        }
    }

    /// Rejects fields that are longer than their encoded width.
    ///
    /// Normalization silently truncates; transports that want callers to
    /// know their input was too long call this first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first over-long field.
    ///
    /// # Examples
    ///
    /// ```
    /// use srvname::naming::NameFields;
    ///
    /// assert!(NameFields::new("AB", "V", "X", "EU", "P", "SV").validate().is_ok());
    /// assert!(NameFields::new("ABCD", "V", "X", "EU", "P", "SV").validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("unit_code", "Unit code", &self.unit_code, UNIT_CODE_WIDTH),
            ("type", "Type", &self.server_type, SERVER_TYPE_WIDTH),
            ("provider", "Provider", &self.provider, PROVIDER_WIDTH),
            ("region", "Region", &self.region, REGION_WIDTH),
            ("environment", "Environment", &self.environment, ENVIRONMENT_WIDTH),
            ("function", "Function", &self.function, FUNCTION_WIDTH),
        ];

        for (field, label, value, width) in checks {
            if value.chars().count() > width {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("{label} must be at most {width} characters"),
                });
            }
        }

        Ok(())
    }

    /// Normalizes all six fields.
    #[must_use]
    pub fn normalize(&self, defaults: &NamingDefaults) -> NormalizedFields {
        NormalizedFields {
            unit_code: normalize(&self.unit_code, UNIT_CODE_WIDTH, &defaults.unit_code),
            server_type: normalize(&self.server_type, SERVER_TYPE_WIDTH, &defaults.server_type),
            provider: normalize(&self.provider, PROVIDER_WIDTH, &defaults.provider),
            region: normalize(&self.region, REGION_WIDTH, &defaults.region),
            environment: normalize(&self.environment, ENVIRONMENT_WIDTH, &defaults.environment),
            function: normalize(&self.function, FUNCTION_WIDTH, &defaults.function),
        }
    }
}

/// Naming fields after normalization.
///
/// This is the sequence key: two reservations share a counter exactly when
/// their normalized fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFields {
    pub(crate) unit_code: String,
    #[serde(rename = "type")]
    pub(crate) server_type: String,
    pub(crate) provider: String,
    pub(crate) region: String,
    pub(crate) environment: String,
    pub(crate) function: String,
}

impl NormalizedFields {
    /// Returns the unit code.
    #[must_use]
    pub fn unit_code(&self) -> &str {
        &self.unit_code
    }

    /// Returns the server type.
    #[must_use]
    pub fn server_type(&self) -> &str {
        &self.server_type
    }

    /// Returns the provider.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the environment.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the function.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The six fields concatenated without separators.
    #[must_use]
    pub fn base_pattern(&self) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.unit_code,
            self.server_type,
            self.provider,
            self.region,
            self.environment,
            self.function
        )
    }

    /// Encodes a server name from these fields and a sequence number.
    ///
    /// Only the last three digits of the sequence are kept, so sequence
    /// 1000 encodes as `000`.
    #[must_use]
    pub fn encode(&self, sequence: u32) -> String {
        format!("{}{:03}", self.base_pattern(), sequence % SEQUENCE_MODULUS)
    }

    /// Returns true if encoding `sequence` wraps past the three-digit suffix.
    #[must_use]
    pub const fn wraps(sequence: u32) -> bool {
        sequence >= SEQUENCE_MODULUS
    }
}

impl fmt::Display for NormalizedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_pattern())
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
