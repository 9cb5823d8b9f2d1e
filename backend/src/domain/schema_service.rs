//! Start-up schema preparation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::ports::{MigrationOutcome, SchemaMigrationError, SchemaMigrator};

fn map_migration_error(error: SchemaMigrationError) -> Error {
    match error {
        SchemaMigrationError::Connection { message } => {
            Error::service_unavailable(format!("schema preparation unavailable: {message}"))
        }
        SchemaMigrationError::Query { message } => {
            Error::internal(format!("schema preparation failed: {message}"))
        }
    }
}

/// Creates the tables and applies the `share_number` upgrade.
#[derive(Clone)]
pub struct SchemaService<M: ?Sized> {
    migrator: Arc<M>,
}

impl<M> SchemaService<M>
where
    M: SchemaMigrator + ?Sized,
{
    pub fn new(migrator: Arc<M>) -> Self {
        Self { migrator }
    }

    /// Run `ensure_schema` then `migrate_share_number`.
    ///
    /// Callers treat any error as fatal and must not start serving.
    pub async fn prepare_schema(&self) -> Result<MigrationOutcome, Error> {
        self.migrator
            .ensure_schema()
            .await
            .map_err(map_migration_error)?;
        let outcome = self
            .migrator
            .migrate_share_number()
            .await
            .map_err(map_migration_error)?;
        match outcome {
            MigrationOutcome::AlreadyCurrent => info!("schema is current"),
            MigrationOutcome::Renamed { reset_rows } => warn!(
                reset_rows,
                "renamed swimmers.category to share_number; previous values were cleared"
            ),
            MigrationOutcome::Added => info!("added swimmers.share_number column"),
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::Sequence;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSchemaMigrator;

    #[rstest]
    #[tokio::test]
    async fn ensures_tables_before_migrating() {
        let mut seq = Sequence::new();
        let mut migrator = MockSchemaMigrator::new();
        migrator
            .expect_ensure_schema()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|| Ok(()));
        migrator
            .expect_migrate_share_number()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|| Ok(MigrationOutcome::Renamed { reset_rows: 4 }));

        let outcome = SchemaService::new(Arc::new(migrator))
            .prepare_schema()
            .await
            .expect("preparation succeeds");

        assert_eq!(outcome, MigrationOutcome::Renamed { reset_rows: 4 });
    }

    #[rstest]
    #[tokio::test]
    async fn table_creation_failure_skips_migration() {
        let mut migrator = MockSchemaMigrator::new();
        migrator
            .expect_ensure_schema()
            .times(1)
            .return_once(|| Err(SchemaMigrationError::query("permission denied")));
        migrator.expect_migrate_share_number().times(0);

        let error = SchemaService::new(Arc::new(migrator))
            .prepare_schema()
            .await
            .expect_err("preparation fails");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_is_unavailable() {
        let mut migrator = MockSchemaMigrator::new();
        migrator
            .expect_ensure_schema()
            .return_once(|| Err(SchemaMigrationError::connection("connection refused")));

        let error = SchemaService::new(Arc::new(migrator))
            .prepare_schema()
            .await
            .expect_err("preparation fails");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
