//! PostgreSQL schema creation and `share_number` upgrade.

use async_trait::async_trait;
use diesel::sql_query;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl, SimpleAsyncConnection as _};

use crate::domain::ports::{MigrationOutcome, SchemaMigrationError, SchemaMigrator};

use super::models::ColumnNameRow;
use super::pool::DbPool;
use super::schema_inspection::{MigrationPlan, migration_diesel_error, migration_pool_error};

const CREATE_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS swimmers (
    id BIGSERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    share_number INTEGER CHECK (share_number BETWEEN 1 AND 999),
    created_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc')
);
CREATE TABLE IF NOT EXISTS meters_log (
    id BIGSERIAL PRIMARY KEY,
    swimmer_id BIGINT NOT NULL REFERENCES swimmers (id) ON DELETE CASCADE,
    meters BIGINT NOT NULL CHECK (meters > 0),
    session_date DATE NOT NULL,
    notes TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc')
);
CREATE INDEX IF NOT EXISTS meters_log_swimmer_id_idx ON meters_log (swimmer_id);
"#;

const SWIMMER_COLUMNS_SQL: &str = "SELECT column_name::text AS column_name \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = 'swimmers'";

const RENAME_LEGACY_SQL: &str = r#"
ALTER TABLE swimmers RENAME COLUMN category TO share_number;
ALTER TABLE swimmers ALTER COLUMN share_number TYPE INTEGER USING NULL;
ALTER TABLE swimmers ADD CONSTRAINT swimmers_share_number_range
    CHECK (share_number BETWEEN 1 AND 999);
"#;

const RESET_SHARE_NUMBERS_SQL: &str = "UPDATE swimmers SET share_number = NULL";

const ADD_COLUMN_SQL: &str = "ALTER TABLE swimmers ADD COLUMN share_number INTEGER \
     CHECK (share_number BETWEEN 1 AND 999)";

/// [`SchemaMigrator`] for the PostgreSQL store.
#[derive(Clone)]
pub struct PostgresSchemaMigrator {
    pool: DbPool,
}

impl PostgresSchemaMigrator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaMigrator for PostgresSchemaMigrator {
    async fn ensure_schema(&self) -> Result<(), SchemaMigrationError> {
        let mut conn = self.pool.get().await.map_err(migration_pool_error)?;
        conn.batch_execute(CREATE_TABLES_SQL)
            .await
            .map_err(migration_diesel_error)
    }

    async fn migrate_share_number(&self) -> Result<MigrationOutcome, SchemaMigrationError> {
        let mut conn = self.pool.get().await.map_err(migration_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let columns: Vec<ColumnNameRow> = sql_query(SWIMMER_COLUMNS_SQL).load(conn).await?;
                let plan = MigrationPlan::from_columns(&columns);
                let reset_rows = match plan {
                    MigrationPlan::Nothing => 0,
                    MigrationPlan::RenameLegacy => {
                        conn.batch_execute(RENAME_LEGACY_SQL).await?;
                        sql_query(RESET_SHARE_NUMBERS_SQL).execute(conn).await?
                    }
                    MigrationPlan::AddColumn => {
                        conn.batch_execute(ADD_COLUMN_SQL).await?;
                        0
                    }
                };
                Ok(plan.outcome(reset_rows))
            }
            .scope_boxed()
        })
        .await
        .map_err(migration_diesel_error)
    }
}
