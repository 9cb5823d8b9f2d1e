//! Summary domain service.
//!
//! Every call re-reads storage and recomputes the aggregate; nothing is
//! cached between requests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ProgressSnapshotRepository, ProgressSnapshotRepositoryError, SummaryQuery,
};
use crate::domain::{Error, GOAL_METERS, Summary, compute_summary};

fn map_snapshot_error(error: ProgressSnapshotRepositoryError) -> Error {
    match error {
        ProgressSnapshotRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("progress snapshot unavailable: {message}"))
        }
        ProgressSnapshotRepositoryError::Query { message } => {
            Error::internal(format!("progress snapshot error: {message}"))
        }
    }
}

/// Service implementing [`SummaryQuery`] over a consistent snapshot.
#[derive(Clone)]
pub struct SummaryService<R> {
    snapshot_repo: Arc<R>,
    goal: i64,
}

impl<R> SummaryService<R> {
    /// Create a service measuring progress against [`GOAL_METERS`].
    pub fn new(snapshot_repo: Arc<R>) -> Self {
        Self::with_goal(snapshot_repo, GOAL_METERS)
    }

    pub fn with_goal(snapshot_repo: Arc<R>, goal: i64) -> Self {
        Self {
            snapshot_repo,
            goal,
        }
    }
}

#[async_trait]
impl<R> SummaryQuery for SummaryService<R>
where
    R: ProgressSnapshotRepository,
{
    async fn summary(&self) -> Result<Summary, Error> {
        let snapshot = self
            .snapshot_repo
            .snapshot()
            .await
            .map_err(map_snapshot_error)?;
        Ok(compute_summary(
            self.goal,
            &snapshot.swimmers,
            &snapshot.entries,
        ))
    }
}
