//! Port for swimmer persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewSwimmer, Swimmer, SwimmerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by swimmer repository adapters.
    pub enum SwimmerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "swimmer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "swimmer repository query failed: {message}",
    }
}

/// Port for storing, listing and removing swimmers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwimmerRepository: Send + Sync {
    /// Every stored swimmer, in no particular order.
    async fn list_all(&self) -> Result<Vec<Swimmer>, SwimmerRepositoryError>;

    /// Insert a swimmer and return it with its assigned identifier.
    async fn create(
        &self,
        swimmer: &NewSwimmer,
        created_at: DateTime<Utc>,
    ) -> Result<Swimmer, SwimmerRepositoryError>;

    /// Delete the swimmer's log entries, then the swimmer, in one transaction.
    ///
    /// Returns `false` when no swimmer with `id` existed.
    async fn delete_with_entries(&self, id: SwimmerId) -> Result<bool, SwimmerRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwimmerRepository;

#[async_trait]
impl SwimmerRepository for FixtureSwimmerRepository {
    async fn list_all(&self) -> Result<Vec<Swimmer>, SwimmerRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(
        &self,
        swimmer: &NewSwimmer,
        created_at: DateTime<Utc>,
    ) -> Result<Swimmer, SwimmerRepositoryError> {
        Ok(Swimmer::new(SwimmerId::new(1), swimmer.clone(), created_at))
    }

    async fn delete_with_entries(&self, _id: SwimmerId) -> Result<bool, SwimmerRepositoryError> {
        Ok(false)
    }
}
