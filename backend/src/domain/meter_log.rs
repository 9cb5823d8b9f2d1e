//! Meter log entries and their listing projection.

use std::cmp::Reverse;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{PersonName, SwimmerId};

/// Validation errors for meter values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetersValidationError {
    #[error("meters must be greater than zero, got {value}")]
    NotPositive { value: i64 },
}

/// Storage-assigned log entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeterLogEntryId(i64);

impl MeterLogEntryId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MeterLogEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distance swum in one session. Always strictly positive.
///
/// # Examples
/// ```
/// use million_meters::domain::Meters;
///
/// assert_eq!(Meters::new(1).map(Meters::get), Ok(1));
/// assert!(Meters::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Meters(i64);

impl Meters {
    pub fn new(value: i64) -> Result<Self, MetersValidationError> {
        if value <= 0 {
            return Err(MetersValidationError::NotPositive { value });
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<Meters> for i64 {
    fn from(value: Meters) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Meters {
    type Error = MetersValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated log entry awaiting insertion.
///
/// `notes` is `None` when the caller sent nothing or only whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeterLogEntry {
    pub swimmer_id: SwimmerId,
    pub meters: Meters,
    pub session_date: NaiveDate,
    pub notes: Option<String>,
}

/// Stored training session.
///
/// `session_date` serialises as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterLogEntry {
    id: MeterLogEntryId,
    swimmer_id: SwimmerId,
    meters: Meters,
    session_date: NaiveDate,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl MeterLogEntry {
    pub fn new(id: MeterLogEntryId, data: NewMeterLogEntry, created_at: DateTime<Utc>) -> Self {
        let NewMeterLogEntry {
            swimmer_id,
            meters,
            session_date,
            notes,
        } = data;
        Self {
            id,
            swimmer_id,
            meters,
            session_date,
            notes,
            created_at,
        }
    }

    pub fn id(&self) -> MeterLogEntryId {
        self.id
    }

    pub fn swimmer_id(&self) -> SwimmerId {
        self.swimmer_id
    }

    pub fn meters(&self) -> Meters {
        self.meters
    }

    pub fn session_date(&self) -> NaiveDate {
        self.session_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Log entry joined with the owning swimmer's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterLogListing {
    #[serde(flatten)]
    entry: MeterLogEntry,
    first_name: PersonName,
    last_name: PersonName,
}

impl MeterLogListing {
    pub fn new(entry: MeterLogEntry, first_name: PersonName, last_name: PersonName) -> Self {
        Self {
            entry,
            first_name,
            last_name,
        }
    }

    pub fn entry(&self) -> &MeterLogEntry {
        &self.entry
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }
}

/// Newest sessions first: `session_date`, then `created_at`, then `id`, all
/// descending.
pub fn order_meter_log(listings: &mut [MeterLogListing]) {
    listings.sort_by_key(|listing| {
        let entry = &listing.entry;
        Reverse((entry.session_date, entry.created_at, entry.id))
    });
}
