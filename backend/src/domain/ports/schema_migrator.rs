//! Port for creating the tables and upgrading legacy swimmer columns.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while inspecting or changing the schema.
    pub enum SchemaMigrationError {
        /// Connection could not be established.
        Connection { message: String } =>
            "schema migration connection failed: {message}",
        /// A DDL or inspection statement failed.
        Query { message: String } =>
            "schema migration failed: {message}",
    }
}

/// Result of the `category` to `share_number` upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// `share_number` already exists; nothing changed.
    AlreadyCurrent,
    /// The legacy `category` column was renamed and every value cleared.
    Renamed { reset_rows: u64 },
    /// Neither column existed, so `share_number` was added.
    Added,
}

/// Driven port implemented once per storage backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaMigrator: Send + Sync {
    /// Create both tables when missing. Safe to run on every start.
    async fn ensure_schema(&self) -> Result<(), SchemaMigrationError>;

    /// Rename a legacy `category` column to `share_number`, resetting its
    /// values, inside one transaction. Idempotent.
    async fn migrate_share_number(&self) -> Result<MigrationOutcome, SchemaMigrationError>;
}

/// Fixture migrator reporting an up-to-date schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSchemaMigrator;

#[async_trait]
impl SchemaMigrator for FixtureSchemaMigrator {
    async fn ensure_schema(&self) -> Result<(), SchemaMigrationError> {
        Ok(())
    }

    async fn migrate_share_number(&self) -> Result<MigrationOutcome, SchemaMigrationError> {
        Ok(MigrationOutcome::AlreadyCurrent)
    }
}
