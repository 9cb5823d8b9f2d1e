//! Driving port for the meter log listing.

use async_trait::async_trait;

use crate::domain::{Error, MeterLogListing};

/// Driving port for meter log read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeterLogQuery: Send + Sync {
    /// Every entry with its swimmer's name, newest session first.
    async fn list_meter_log(&self) -> Result<Vec<MeterLogListing>, Error>;
}

/// Fixture query returning an empty log.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMeterLogQuery;

#[async_trait]
impl MeterLogQuery for FixtureMeterLogQuery {
    async fn list_meter_log(&self) -> Result<Vec<MeterLogListing>, Error> {
        Ok(Vec::new())
    }
}
