//! Driving port for goal progress.

use async_trait::async_trait;

use crate::domain::{Error, GOAL_METERS, Summary, compute_summary};

/// Driving port exposing the aggregated summary.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), million_meters::domain::Error> {
/// use million_meters::domain::ports::{FixtureSummaryQuery, SummaryQuery};
///
/// let summary = FixtureSummaryQuery.summary().await?;
/// assert_eq!(summary.percentage.as_str(), "0.00");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryQuery: Send + Sync {
    /// Recompute totals, percentage and ranking from current storage state.
    async fn summary(&self) -> Result<Summary, Error>;
}

/// Fixture query summarising an empty challenge.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSummaryQuery;

#[async_trait]
impl SummaryQuery for FixtureSummaryQuery {
    async fn summary(&self) -> Result<Summary, Error> {
        Ok(compute_summary(GOAL_METERS, &[], &[]))
    }
}
