//! Driving port for swimmer registration and removal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Swimmer, SwimmerId, SwimmerInput, validate_swimmer_input};

/// Driving port for swimmer write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwimmersCommand: Send + Sync {
    /// Validate and store a swimmer.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use million_meters::domain::SwimmerInput;
    /// # use million_meters::domain::ports::{FixtureSwimmersCommand, SwimmersCommand};
    /// # use serde_json::json;
    /// # async fn example() -> Result<(), million_meters::domain::Error> {
    /// let command = FixtureSwimmersCommand;
    /// let swimmer = command
    ///     .create_swimmer(SwimmerInput {
    ///         first_name: Some(json!("Ana")),
    ///         last_name: Some(json!("López")),
    ///         share_number: Some(json!(12)),
    ///     })
    ///     .await?;
    /// assert_eq!(swimmer.first_name().as_ref(), "Ana");
    /// # Ok(())
    /// # }
    /// ```
    async fn create_swimmer(&self, input: SwimmerInput) -> Result<Swimmer, Error>;

    /// Remove a swimmer and all of their log entries.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn delete_swimmer(&self, id: SwimmerId) -> Result<SwimmerId, Error>;
}

/// Fixture command validating input without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwimmersCommand;

#[async_trait]
impl SwimmersCommand for FixtureSwimmersCommand {
    async fn create_swimmer(&self, input: SwimmerInput) -> Result<Swimmer, Error> {
        let data = validate_swimmer_input(&input)?;
        Ok(Swimmer::new(SwimmerId::new(1), data, DateTime::<Utc>::UNIX_EPOCH))
    }

    async fn delete_swimmer(&self, id: SwimmerId) -> Result<SwimmerId, Error> {
        Err(Error::not_found(format!("swimmer {id} not found")))
    }
}
