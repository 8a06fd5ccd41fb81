//! Reservation types for tracking server names.
//!
//! A [`Reservation`] ties one encoded server name to the naming fields and
//! sequence number that produced it, along with its lifecycle
//! [`ReservationStatus`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::naming::NormalizedFields;

/// Opaque identifier of a reservation.
///
/// # Examples
///
/// ```
/// use srvname::ReservationId;
///
/// let id = ReservationId::new();
/// let parsed: ReservationId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
///
/// assert!("not-a-uuid".parse::<ReservationId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ReservationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| Error::Validation {
                field: "reservationId".into(),
                message: format!("Invalid reservation ID format: {e}"),
            })
    }
}

impl From<Uuid> for ReservationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The name is held but not yet in use.
    Reserved,
    /// The name has been confirmed as in use.
    Committed,
}

impl ReservationStatus {
    /// Returns the storage representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reserved" => Ok(Self::Reserved),
            "committed" => Ok(Self::Committed),
            _ => Err(Error::Validation {
                field: "status".into(),
                message: format!("unknown reservation status: {s}"),
            }),
        }
    }
}

/// A server name reservation.
///
/// Construct new reservations with [`Reservation::builder`]; the builder
/// assigns a fresh id and timestamps unless they are supplied, which the
/// store does when loading rows.
///
/// # Examples
///
/// ```
/// use srvname::naming::{NameFields, NamingDefaults};
/// use srvname::{Reservation, ReservationStatus};
///
/// let fields = NameFields::new("AB", "V", "X", "EU", "P", "SV")
///     .normalize(&NamingDefaults::default());
/// let reservation = Reservation::builder(fields, 1).build();
///
/// assert_eq!(reservation.server_name(), "ABVXEUPSV001");
/// assert_eq!(reservation.status(), ReservationStatus::Reserved);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    id: ReservationId,
    server_name: String,
    #[serde(flatten)]
    fields: NormalizedFields,
    sequence_num: u32,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Starts building a reservation for the given fields and sequence.
    #[must_use]
    pub fn builder(fields: NormalizedFields, sequence_num: u32) -> ReservationBuilder {
        ReservationBuilder::new(fields, sequence_num)
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the encoded server name.
    #[must_use]
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Returns the normalized naming fields.
    #[must_use]
    pub const fn fields(&self) -> &NormalizedFields {
        &self.fields
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub const fn sequence_num(&self) -> u32 {
        self.sequence_num
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns true if the reservation has been committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.status == ReservationStatus::Committed
    }

    /// Returns when the reservation was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the reservation last changed status.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Builder for [`Reservation`].
#[derive(Debug, Clone)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    server_name: Option<String>,
    fields: NormalizedFields,
    sequence_num: u32,
    status: ReservationStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    fn new(fields: NormalizedFields, sequence_num: u32) -> Self {
        Self {
            id: None,
            server_name: None,
            fields,
            sequence_num,
            status: ReservationStatus::Reserved,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets an explicit id.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the stored server name instead of encoding it.
    #[must_use]
    pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the update timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation.
    ///
    /// Timestamps default to now, truncated to whole seconds to match
    /// storage precision. `updated_at` defaults to `created_at`.
    #[must_use]
    pub fn build(self) -> Reservation {
        let created_at = self
            .created_at
            .unwrap_or_else(|| Utc::now().trunc_subsecs(0));
        let server_name = self
            .server_name
            .unwrap_or_else(|| self.fields.encode(self.sequence_num));

        Reservation {
            id: self.id.unwrap_or_default(),
            server_name,
            fields: self.fields,
            sequence_num: self.sequence_num,
            status: self.status,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}
