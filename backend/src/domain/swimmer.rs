//! Swimmer data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest accepted share number.
pub const SHARE_NUMBER_MIN: i32 = 1;
/// Largest accepted share number.
pub const SHARE_NUMBER_MAX: i32 = 999;

/// Validation errors returned by the swimmer value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwimmerValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("share number must be between 1 and 999, got {value}")]
    ShareNumberOutOfRange { value: i64 },
}

/// Storage-assigned swimmer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwimmerId(i64);

impl SwimmerId {
    /// Wrap a raw identifier as read from storage or a request path.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SwimmerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First or last name of a swimmer.
///
/// ## Invariants
/// - Stored without surrounding whitespace.
/// - Never empty.
///
/// # Examples
/// ```
/// use million_meters::domain::PersonName;
///
/// let name = PersonName::new("  Ana ").expect("valid name");
/// assert_eq!(name.as_ref(), "Ana");
/// assert!(PersonName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SwimmerValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SwimmerValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = SwimmerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional membership number carried by a swimmer, in `1..=999`.
///
/// Uniqueness is not enforced; two swimmers may share a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct ShareNumber(i32);

impl ShareNumber {
    /// Validate a share number.
    ///
    /// # Examples
    /// ```
    /// use million_meters::domain::ShareNumber;
    ///
    /// assert!(ShareNumber::new(500).is_ok());
    /// assert!(ShareNumber::new(0).is_err());
    /// assert!(ShareNumber::new(1000).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, SwimmerValidationError> {
        let in_range = (i64::from(SHARE_NUMBER_MIN)..=i64::from(SHARE_NUMBER_MAX)).contains(&value);
        match i32::try_from(value) {
            Ok(number) if in_range => Ok(Self(number)),
            _ => Err(SwimmerValidationError::ShareNumberOutOfRange { value }),
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<ShareNumber> for i32 {
    fn from(value: ShareNumber) -> Self {
        value.0
    }
}

impl TryFrom<i64> for ShareNumber {
    type Error = SwimmerValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for a swimmer that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSwimmer {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub share_number: Option<ShareNumber>,
}

/// Registered swimmer.
///
/// Serialises as a flat snake_case object:
/// `{ "id", "first_name", "last_name", "share_number", "created_at" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swimmer {
    id: SwimmerId,
    first_name: PersonName,
    last_name: PersonName,
    share_number: Option<ShareNumber>,
    created_at: DateTime<Utc>,
}

impl Swimmer {
    /// Assemble a stored swimmer from its identifier, data and insertion time.
    pub fn new(id: SwimmerId, data: NewSwimmer, created_at: DateTime<Utc>) -> Self {
        let NewSwimmer {
            first_name,
            last_name,
            share_number,
        } = data;
        Self {
            id,
            first_name,
            last_name,
            share_number,
            created_at,
        }
    }

    pub fn id(&self) -> SwimmerId {
        self.id
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn share_number(&self) -> Option<ShareNumber> {
        self.share_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Sort swimmers by last name, then first name, then id.
///
/// Names compare byte-wise so both storage backends yield the same order
/// regardless of their collation settings.
pub fn order_swimmers(swimmers: &mut [Swimmer]) {
    swimmers.sort_by(|a, b| {
        a.last_name
            .as_ref()
            .as_bytes()
            .cmp(b.last_name.as_ref().as_bytes())
            .then_with(|| {
                a.first_name
                    .as_ref()
                    .as_bytes()
                    .cmp(b.first_name.as_ref().as_bytes())
            })
            .then_with(|| a.id.cmp(&b.id))
    });
}
