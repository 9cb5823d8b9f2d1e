//! Driving port for swimmer listings.

use async_trait::async_trait;

use crate::domain::{Error, Swimmer};

/// Driving port for swimmer read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwimmersQuery: Send + Sync {
    /// All swimmers ordered by last name, first name and id.
    async fn list_swimmers(&self) -> Result<Vec<Swimmer>, Error>;
}

/// Fixture query returning no swimmers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwimmersQuery;

#[async_trait]
impl SwimmersQuery for FixtureSwimmersQuery {
    async fn list_swimmers(&self) -> Result<Vec<Swimmer>, Error> {
        Ok(Vec::new())
    }
}
