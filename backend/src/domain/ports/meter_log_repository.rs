//! Port for meter log persistence and listing reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{MeterLogEntry, MeterLogEntryId, MeterLogListing, NewMeterLogEntry};

use super::define_port_error;

define_port_error! {
    /// Errors raised by meter log repository adapters.
    pub enum MeterLogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "meter log repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "meter log repository query failed: {message}",
        /// The referenced swimmer does not exist.
        UnknownSwimmer { swimmer_id: i64 } =>
            "swimmer {swimmer_id} does not exist",
    }
}

/// Port for recording sessions and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeterLogRepository: Send + Sync {
    /// Insert an entry. Fails with `UnknownSwimmer` when the foreign key is
    /// violated.
    async fn create(
        &self,
        entry: &NewMeterLogEntry,
        created_at: DateTime<Utc>,
    ) -> Result<MeterLogEntry, MeterLogRepositoryError>;

    /// Every entry joined with its swimmer's name, in no particular order.
    async fn list_with_swimmers(&self) -> Result<Vec<MeterLogListing>, MeterLogRepositoryError>;

    /// Every entry, in no particular order.
    async fn list_all(&self) -> Result<Vec<MeterLogEntry>, MeterLogRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMeterLogRepository;

#[async_trait]
impl MeterLogRepository for FixtureMeterLogRepository {
    async fn create(
        &self,
        entry: &NewMeterLogEntry,
        created_at: DateTime<Utc>,
    ) -> Result<MeterLogEntry, MeterLogRepositoryError> {
        Ok(MeterLogEntry::new(
            MeterLogEntryId::new(1),
            entry.clone(),
            created_at,
        ))
    }

    async fn list_with_swimmers(&self) -> Result<Vec<MeterLogListing>, MeterLogRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<MeterLogEntry>, MeterLogRepositoryError> {
        Ok(Vec::new())
    }
}
