//! Meter log domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    MeterLogCommand, MeterLogQuery, MeterLogRepository, MeterLogRepositoryError,
};
use crate::domain::{
    Error, MeterEntryInput, MeterLogEntry, MeterLogListing, order_meter_log,
    validate_meter_entry_input,
};

fn map_meter_log_repository_error(error: MeterLogRepositoryError) -> Error {
    match error {
        MeterLogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("meter log repository unavailable: {message}"))
        }
        MeterLogRepositoryError::Query { message } => {
            Error::internal(format!("meter log repository error: {message}"))
        }
        MeterLogRepositoryError::UnknownSwimmer { swimmer_id } => {
            Error::invalid_request(format!("swimmer {swimmer_id} does not exist")).with_details(
                json!({
                    "field": "swimmer_id",
                    "code": "unknown_swimmer",
                }),
            )
        }
    }
}

/// Meter log service implementing [`MeterLogCommand`] and [`MeterLogQuery`].
#[derive(Clone)]
pub struct MeterLogService<R> {
    meter_log_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MeterLogService<R> {
    pub fn new(meter_log_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            meter_log_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> MeterLogCommand for MeterLogService<R>
where
    R: MeterLogRepository,
{
    async fn log_meters(&self, input: MeterEntryInput) -> Result<MeterLogEntry, Error> {
        let data = validate_meter_entry_input(&input)?;
        let entry = self
            .meter_log_repo
            .create(&data, self.clock.utc())
            .await
            .map_err(map_meter_log_repository_error)?;
        info!(
            entry_id = %entry.id(),
            swimmer_id = %entry.swimmer_id(),
            meters = entry.meters().get(),
            "meters logged"
        );
        Ok(entry)
    }
}

#[async_trait]
impl<R> MeterLogQuery for MeterLogService<R>
where
    R: MeterLogRepository,
{
    async fn list_meter_log(&self) -> Result<Vec<MeterLogListing>, Error> {
        let mut listings = self
            .meter_log_repo
            .list_with_swimmers()
            .await
            .map_err(map_meter_log_repository_error)?;
        order_meter_log(&mut listings);
        Ok(listings)
    }
}

#[cfg(test)]
#[path = "meter_log_service_tests.rs"]
mod tests;
