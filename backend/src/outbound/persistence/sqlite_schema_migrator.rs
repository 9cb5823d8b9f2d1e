//! SQLite schema creation and `share_number` upgrade.

use async_trait::async_trait;
use diesel::sql_query;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl, SimpleAsyncConnection as _};

use crate::domain::ports::{MigrationOutcome, SchemaMigrationError, SchemaMigrator};

use super::models::ColumnNameRow;
use super::pool::SqlitePool;
use super::schema_inspection::{MigrationPlan, migration_diesel_error, migration_pool_error};

// `journal_mode` is persistent for the database file, so setting it once at
// start-up covers every later connection.
const CREATE_TABLES_SQL: &str = r#"
PRAGMA journal_mode = WAL;
CREATE TABLE IF NOT EXISTS swimmers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    share_number INTEGER CHECK (share_number BETWEEN 1 AND 999),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE TABLE IF NOT EXISTS meters_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    swimmer_id INTEGER NOT NULL REFERENCES swimmers (id) ON DELETE CASCADE,
    meters INTEGER NOT NULL CHECK (meters > 0),
    session_date TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS meters_log_swimmer_id_idx ON meters_log (swimmer_id);
"#;

const SWIMMER_COLUMNS_SQL: &str =
    "SELECT name AS column_name FROM pragma_table_info('swimmers')";

const RENAME_LEGACY_SQL: &str = "ALTER TABLE swimmers RENAME COLUMN category TO share_number";

const RESET_SHARE_NUMBERS_SQL: &str = "UPDATE swimmers SET share_number = NULL";

// Repairs rows older deployments accepted: whitespace-only names and an
// unset `created_at`.
const NORMALIZE_LEGACY_ROWS_SQL: &str = r#"
UPDATE swimmers SET first_name = 'Unknown'
    WHERE trim(first_name, ' ' || char(9) || char(10) || char(13)) = '';
UPDATE swimmers SET last_name = 'Unknown'
    WHERE trim(last_name, ' ' || char(9) || char(10) || char(13)) = '';
UPDATE swimmers SET created_at = datetime('now') WHERE created_at IS NULL;
UPDATE meters_log SET created_at = datetime('now') WHERE created_at IS NULL;
"#;

// SQLite cannot attach a CHECK to an existing column, so the renamed column
// gets the range enforced by triggers instead. The column keeps `TEXT`
// affinity, hence the casts.
const SHARE_NUMBER_RANGE_TRIGGERS_SQL: &str = r#"
CREATE TRIGGER IF NOT EXISTS swimmers_share_number_range_insert
BEFORE INSERT ON swimmers
WHEN NEW.share_number IS NOT NULL AND (
    CAST(NEW.share_number AS INTEGER) NOT BETWEEN 1 AND 999
    OR CAST(CAST(NEW.share_number AS INTEGER) AS TEXT) <> CAST(NEW.share_number AS TEXT)
)
BEGIN
    SELECT RAISE(ABORT, 'share_number must be between 1 and 999');
END;
CREATE TRIGGER IF NOT EXISTS swimmers_share_number_range_update
BEFORE UPDATE OF share_number ON swimmers
WHEN NEW.share_number IS NOT NULL AND (
    CAST(NEW.share_number AS INTEGER) NOT BETWEEN 1 AND 999
    OR CAST(CAST(NEW.share_number AS INTEGER) AS TEXT) <> CAST(NEW.share_number AS TEXT)
)
BEGIN
    SELECT RAISE(ABORT, 'share_number must be between 1 and 999');
END;
"#;

const ADD_COLUMN_SQL: &str = "ALTER TABLE swimmers ADD COLUMN share_number INTEGER \
     CHECK (share_number BETWEEN 1 AND 999)";

/// [`SchemaMigrator`] for the SQLite store.
///
/// A renamed legacy column keeps its declared `TEXT` affinity; integers
/// written to it read back unchanged. The legacy upgrade also repairs rows
/// older deployments accepted and guards the `share_number` range with
/// triggers.
#[derive(Clone)]
pub struct SqliteSchemaMigrator {
    pool: SqlitePool,
}

impl SqliteSchemaMigrator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaMigrator for SqliteSchemaMigrator {
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
                        sql_query(RENAME_LEGACY_SQL).execute(conn).await?;
                        let reset = sql_query(RESET_SHARE_NUMBERS_SQL).execute(conn).await?;
                        conn.batch_execute(NORMALIZE_LEGACY_ROWS_SQL).await?;
                        conn.batch_execute(SHARE_NUMBER_RANGE_TRIGGERS_SQL).await?;
                        reset
                    }
                    MigrationPlan::AddColumn => {
                        sql_query(ADD_COLUMN_SQL).execute(conn).await?;
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
