//! Driving port for recording training sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Error, MeterEntryInput, MeterLogEntry, MeterLogEntryId, validate_meter_entry_input,
};

/// Driving port for meter log write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeterLogCommand: Send + Sync {
    /// Validate and store one session.
    ///
    /// An unknown swimmer is reported as an invalid request whose details
    /// carry `"code": "unknown_swimmer"`.
    async fn log_meters(&self, input: MeterEntryInput) -> Result<MeterLogEntry, Error>;
}

/// Fixture command validating input without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMeterLogCommand;

#[async_trait]
impl MeterLogCommand for FixtureMeterLogCommand {
    async fn log_meters(&self, input: MeterEntryInput) -> Result<MeterLogEntry, Error> {
        let data = validate_meter_entry_input(&input)?;
        Ok(MeterLogEntry::new(
            MeterLogEntryId::new(1),
            data,
            DateTime::<Utc>::UNIX_EPOCH,
        ))
    }
}
