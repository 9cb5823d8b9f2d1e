//! Input validation for swimmer and meter log writes.
//!
//! Payload fields arrive as raw JSON values so that wrong types (a string
//! where an integer belongs, a fractional number) are reported with the same
//! error taxonomy as out-of-range values. Nothing is written unless these
//! checks pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    Error, Meters, NewMeterLogEntry, NewSwimmer, PersonName, SHARE_NUMBER_MAX, SHARE_NUMBER_MIN,
    ShareNumber, SwimmerId,
};

const SESSION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw body of a swimmer creation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwimmerInput {
    #[serde(default)]
    pub first_name: Option<Value>,
    #[serde(default)]
    pub last_name: Option<Value>,
    #[serde(default)]
    pub share_number: Option<Value>,
}

/// Raw body of a meter log request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterEntryInput {
    #[serde(default)]
    pub swimmer_id: Option<Value>,
    #[serde(default)]
    pub meters: Option<Value>,
    #[serde(default)]
    pub session_date: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

/// Reasons a write payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("{field} must be an integer between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
    },
    #[error("swimmer_id must be a positive integer")]
    InvalidSwimmerId,
    #[error("meters must be an integer greater than zero")]
    InvalidMeters,
    #[error("session_date must be a calendar date in YYYY-MM-DD format")]
    InvalidDate,
}

impl InputError {
    /// Stable machine-readable code reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidSwimmerId => "invalid_swimmer_id",
            Self::InvalidMeters => "invalid_meters",
            Self::InvalidDate => "invalid_date",
        }
    }

    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::OutOfRange { field, .. } => field,
            Self::InvalidSwimmerId => "swimmer_id",
            Self::InvalidMeters => "meters",
            Self::InvalidDate => "session_date",
        }
    }
}

impl From<InputError> for Error {
    fn from(value: InputError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Validate a swimmer creation payload.
///
/// # Examples
/// ```
/// use million_meters::domain::{SwimmerInput, validate_swimmer_input};
/// use serde_json::json;
///
/// let input = SwimmerInput {
///     first_name: Some(json!(" Ana ")),
///     last_name: Some(json!("López")),
///     share_number: None,
/// };
/// let swimmer = validate_swimmer_input(&input).expect("valid input");
/// assert_eq!(swimmer.first_name.as_ref(), "Ana");
/// assert!(swimmer.share_number.is_none());
/// ```
pub fn validate_swimmer_input(input: &SwimmerInput) -> Result<NewSwimmer, InputError> {
    let first_name = required_name(input.first_name.as_ref(), "first_name")?;
    let last_name = required_name(input.last_name.as_ref(), "last_name")?;
    let share_number = match input.share_number.as_ref() {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) if raw.trim().is_empty() => None,
        Some(value) => Some(
            value
                .as_i64()
                .and_then(|raw| ShareNumber::new(raw).ok())
                .ok_or(InputError::OutOfRange {
                    field: "share_number",
                    min: SHARE_NUMBER_MIN,
                    max: SHARE_NUMBER_MAX,
                })?,
        ),
    };

    Ok(NewSwimmer {
        first_name,
        last_name,
        share_number,
    })
}

/// Validate a meter log payload.
///
/// Swimmer existence is not checked here; the repository reports an unknown
/// swimmer when the insert violates the foreign key.
pub fn validate_meter_entry_input(input: &MeterEntryInput) -> Result<NewMeterLogEntry, InputError> {
    let swimmer_id = required(input.swimmer_id.as_ref(), "swimmer_id")?;
    let meters = required(input.meters.as_ref(), "meters")?;
    let session_date = required(input.session_date.as_ref(), "session_date")?;

    let swimmer_id = swimmer_id
        .as_i64()
        .filter(|id| *id > 0)
        .map(SwimmerId::new)
        .ok_or(InputError::InvalidSwimmerId)?;
    let meters = meters
        .as_i64()
        .and_then(|raw| Meters::new(raw).ok())
        .ok_or(InputError::InvalidMeters)?;
    let session_date = session_date
        .as_str()
        .and_then(parse_session_date)
        .ok_or(InputError::InvalidDate)?;
    let notes = input
        .notes
        .as_ref()
        .and_then(Value::as_str)
        .filter(|notes| !notes.trim().is_empty())
        .map(str::to_owned);

    Ok(NewMeterLogEntry {
        swimmer_id,
        meters,
        session_date,
        notes,
    })
}

fn required<'a>(value: Option<&'a Value>, field: &'static str) -> Result<&'a Value, InputError> {
    match value {
        None | Some(Value::Null) => Err(InputError::MissingField { field }),
        Some(Value::String(raw)) if raw.trim().is_empty() => {
            Err(InputError::MissingField { field })
        }
        Some(value) => Ok(value),
    }
}

fn required_name(value: Option<&Value>, field: &'static str) -> Result<PersonName, InputError> {
    required(value, field)?
        .as_str()
        .and_then(|raw| PersonName::new(raw).ok())
        .ok_or(InputError::MissingField { field })
}

// `%Y-%m-%d` alone accepts unpadded months and days.
fn parse_session_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, SESSION_DATE_FORMAT).ok()
}
