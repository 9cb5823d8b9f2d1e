//! Port reading every swimmer and entry from one consistent view.

use async_trait::async_trait;

use crate::domain::{MeterLogEntry, Swimmer};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading a progress snapshot.
    pub enum ProgressSnapshotRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "progress snapshot connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "progress snapshot query failed: {message}",
    }
}

/// Swimmers and log entries observed at the same point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub swimmers: Vec<Swimmer>,
    pub entries: Vec<MeterLogEntry>,
}

/// Port for the aggregate read behind the goal summary.
///
/// Both tables are read inside one read transaction, so a concurrent delete
/// is either fully visible or not at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressSnapshotRepository: Send + Sync {
    async fn snapshot(&self) -> Result<ProgressSnapshot, ProgressSnapshotRepositoryError>;
}

/// Fixture implementation reporting an empty database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProgressSnapshotRepository;

#[async_trait]
impl ProgressSnapshotRepository for FixtureProgressSnapshotRepository {
    async fn snapshot(&self) -> Result<ProgressSnapshot, ProgressSnapshotRepositoryError> {
        Ok(ProgressSnapshot::default())
    }
}
