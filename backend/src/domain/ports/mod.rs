//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the schema migrator) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented by
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod meter_log_command;
mod meter_log_query;
mod meter_log_repository;
mod progress_snapshot_repository;
mod schema_migrator;
mod summary_query;
mod swimmer_repository;
mod swimmers_command;
mod swimmers_query;

#[cfg(test)]
pub use meter_log_command::MockMeterLogCommand;
pub use meter_log_command::{FixtureMeterLogCommand, MeterLogCommand};
#[cfg(test)]
pub use meter_log_query::MockMeterLogQuery;
pub use meter_log_query::{FixtureMeterLogQuery, MeterLogQuery};
#[cfg(test)]
pub use meter_log_repository::MockMeterLogRepository;
pub use meter_log_repository::{
    FixtureMeterLogRepository, MeterLogRepository, MeterLogRepositoryError,
};
#[cfg(test)]
pub use progress_snapshot_repository::MockProgressSnapshotRepository;
pub use progress_snapshot_repository::{
    FixtureProgressSnapshotRepository, ProgressSnapshot, ProgressSnapshotRepository,
    ProgressSnapshotRepositoryError,
};
#[cfg(test)]
pub use schema_migrator::MockSchemaMigrator;
pub use schema_migrator::{
    FixtureSchemaMigrator, MigrationOutcome, SchemaMigrationError, SchemaMigrator,
};
#[cfg(test)]
pub use summary_query::MockSummaryQuery;
pub use summary_query::{FixtureSummaryQuery, SummaryQuery};
#[cfg(test)]
pub use swimmer_repository::MockSwimmerRepository;
pub use swimmer_repository::{FixtureSwimmerRepository, SwimmerRepository, SwimmerRepositoryError};
#[cfg(test)]
pub use swimmers_command::MockSwimmersCommand;
pub use swimmers_command::{FixtureSwimmersCommand, SwimmersCommand};
#[cfg(test)]
pub use swimmers_query::MockSwimmersQuery;
pub use swimmers_query::{FixtureSwimmersQuery, SwimmersQuery};
