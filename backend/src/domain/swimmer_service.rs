//! Swimmer domain service.
//!
//! Implements the swimmer driving ports on top of [`SwimmerRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    SwimmerRepository, SwimmerRepositoryError, SwimmersCommand, SwimmersQuery,
};
use crate::domain::{Error, Swimmer, SwimmerId, SwimmerInput, order_swimmers, validate_swimmer_input};

fn map_swimmer_repository_error(error: SwimmerRepositoryError) -> Error {
    match error {
        SwimmerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("swimmer repository unavailable: {message}"))
        }
        SwimmerRepositoryError::Query { message } => {
            Error::internal(format!("swimmer repository error: {message}"))
        }
    }
}

/// Swimmer service implementing [`SwimmersCommand`] and [`SwimmersQuery`].
#[derive(Clone)]
pub struct SwimmerService<R> {
    swimmer_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SwimmerService<R> {
    /// Create a service stamping `created_at` from `clock`.
    pub fn new(swimmer_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            swimmer_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> SwimmersCommand for SwimmerService<R>
where
    R: SwimmerRepository,
{
    async fn create_swimmer(&self, input: SwimmerInput) -> Result<Swimmer, Error> {
        let data = validate_swimmer_input(&input)?;
        let swimmer = self
            .swimmer_repo
            .create(&data, self.clock.utc())
            .await
            .map_err(map_swimmer_repository_error)?;
        info!(swimmer_id = %swimmer.id(), "swimmer registered");
        Ok(swimmer)
    }

    async fn delete_swimmer(&self, id: SwimmerId) -> Result<SwimmerId, Error> {
        let deleted = self
            .swimmer_repo
            .delete_with_entries(id)
            .await
            .map_err(map_swimmer_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!("swimmer {id} not found")));
        }
        info!(swimmer_id = %id, "swimmer deleted with log entries");
        Ok(id)
    }
}

#[async_trait]
impl<R> SwimmersQuery for SwimmerService<R>
where
    R: SwimmerRepository,
{
    async fn list_swimmers(&self) -> Result<Vec<Swimmer>, Error> {
        let mut swimmers = self
            .swimmer_repo
            .list_all()
            .await
            .map_err(map_swimmer_repository_error)?;
        order_swimmers(&mut swimmers);
        Ok(swimmers)
    }
}

#[cfg(test)]
#[path = "swimmer_service_tests.rs"]
mod tests;
