//! Diesel-backed swimmer and meter log repositories.
//!
//! Diesel needs a concrete connection type for every query, so the adapter
//! bodies are written once inside [`diesel_store!`] and stamped out for the
//! PostgreSQL and SQLite pools. Backend selection happens in bootstrap; the
//! generated stores share behaviour exactly.
//!
//! Rows that break a domain invariant (for example a blank name left behind
//! by an older deployment) are skipped with a warning on list reads, so one
//! bad row cannot take every listing down with it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::warn;

use crate::domain::ports::{
    MeterLogRepository, MeterLogRepositoryError, ProgressSnapshot, ProgressSnapshotRepository,
    ProgressSnapshotRepositoryError, SwimmerRepository, SwimmerRepositoryError,
};
use crate::domain::{
    MeterLogEntry, MeterLogListing, NewMeterLogEntry, NewSwimmer, Swimmer, SwimmerId,
};

use super::diesel_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MeterLogRow, NewMeterLogRow, NewSwimmerRow, SwimmerRow};
use super::pool::{DbPool, PoolError, SqlitePool};
use super::schema::{meters_log, swimmers};

fn swimmer_pool_error(error: PoolError) -> SwimmerRepositoryError {
    map_basic_pool_error(error, SwimmerRepositoryError::connection)
}

fn swimmer_diesel_error(error: diesel::result::Error) -> SwimmerRepositoryError {
    map_basic_diesel_error(
        error,
        SwimmerRepositoryError::query,
        SwimmerRepositoryError::connection,
    )
}

fn meter_log_pool_error(error: PoolError) -> MeterLogRepositoryError {
    map_basic_pool_error(error, MeterLogRepositoryError::connection)
}

fn meter_log_diesel_error(error: diesel::result::Error) -> MeterLogRepositoryError {
    map_basic_diesel_error(
        error,
        MeterLogRepositoryError::query,
        MeterLogRepositoryError::connection,
    )
}

fn meter_log_insert_error(
    error: diesel::result::Error,
    swimmer_id: SwimmerId,
) -> MeterLogRepositoryError {
    if is_foreign_key_violation(&error) {
        return MeterLogRepositoryError::unknown_swimmer(swimmer_id.get());
    }
    meter_log_diesel_error(error)
}

fn snapshot_pool_error(error: PoolError) -> ProgressSnapshotRepositoryError {
    map_basic_pool_error(error, ProgressSnapshotRepositoryError::connection)
}

fn snapshot_diesel_error(error: diesel::result::Error) -> ProgressSnapshotRepositoryError {
    map_basic_diesel_error(
        error,
        ProgressSnapshotRepositoryError::query,
        ProgressSnapshotRepositoryError::connection,
    )
}

fn valid_rows<T>(table: &'static str, rows: impl Iterator<Item = Result<T, String>>) -> Vec<T> {
    rows.filter_map(|row| match row {
        Ok(value) => Some(value),
        Err(reason) => {
            warn!(table, %reason, "skipping row that violates a domain invariant");
            None
        }
    })
    .collect()
}

/// First statement of a PostgreSQL snapshot read: both tables are seen as of
/// the same instant.
const POSTGRES_SNAPSHOT_ISOLATION: Option<&str> =
    Some("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY");

// A deferred SQLite transaction in WAL mode keeps one read snapshot from its
// first SELECT until it ends.
const SQLITE_SNAPSHOT_ISOLATION: Option<&str> = None;

macro_rules! diesel_store {
    ($(#[$meta:meta])* $name:ident, $pool:ty, $snapshot_isolation:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: $pool,
        }

        impl $name {
            /// Create a store over the given connection pool.
            pub fn new(pool: $pool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl SwimmerRepository for $name {
            async fn list_all(&self) -> Result<Vec<Swimmer>, SwimmerRepositoryError> {
                let mut conn = self.pool.get().await.map_err(swimmer_pool_error)?;
                let rows: Vec<SwimmerRow> = swimmers::table
                    .select(SwimmerRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(swimmer_diesel_error)?;
                Ok(valid_rows(
                    "swimmers",
                    rows.into_iter().map(SwimmerRow::into_domain),
                ))
            }

            async fn create(
                &self,
                swimmer: &NewSwimmer,
                created_at: DateTime<Utc>,
            ) -> Result<Swimmer, SwimmerRepositoryError> {
                let mut conn = self.pool.get().await.map_err(swimmer_pool_error)?;
                let row = NewSwimmerRow::from_domain(swimmer, created_at.naive_utc());
                let stored: SwimmerRow = diesel::insert_into(swimmers::table)
                    .values(&row)
                    .returning(SwimmerRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(swimmer_diesel_error)?;
                stored.into_domain().map_err(SwimmerRepositoryError::query)
            }

            async fn delete_with_entries(
                &self,
                id: SwimmerId,
            ) -> Result<bool, SwimmerRepositoryError> {
                let mut conn = self.pool.get().await.map_err(swimmer_pool_error)?;
                let swimmer_id = id.get();
                // Entries first, so legacy foreign keys without a cascade
                // still allow the swimmer row to go.
                let removed = conn
                    .transaction::<_, diesel::result::Error, _>(|conn| {
                        async move {
                            diesel::delete(
                                meters_log::table.filter(meters_log::swimmer_id.eq(swimmer_id)),
                            )
                            .execute(conn)
                            .await?;
                            diesel::delete(swimmers::table.find(swimmer_id))
                                .execute(conn)
                                .await
                        }
                        .scope_boxed()
                    })
                    .await
                    .map_err(swimmer_diesel_error)?;
                Ok(removed > 0)
            }
        }

        #[async_trait]
        impl MeterLogRepository for $name {
            async fn create(
                &self,
                entry: &NewMeterLogEntry,
                created_at: DateTime<Utc>,
            ) -> Result<MeterLogEntry, MeterLogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(meter_log_pool_error)?;
                let row = NewMeterLogRow::from_domain(entry, created_at.naive_utc());
                let stored: MeterLogRow = diesel::insert_into(meters_log::table)
                    .values(&row)
                    .returning(MeterLogRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| meter_log_insert_error(err, entry.swimmer_id))?;
                stored.into_domain().map_err(MeterLogRepositoryError::query)
            }

            async fn list_with_swimmers(
                &self,
            ) -> Result<Vec<MeterLogListing>, MeterLogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(meter_log_pool_error)?;
                let rows: Vec<(MeterLogRow, String, String)> = meters_log::table
                    .inner_join(swimmers::table)
                    .select((
                        MeterLogRow::as_select(),
                        swimmers::first_name,
                        swimmers::last_name,
                    ))
                    .load(&mut conn)
                    .await
                    .map_err(meter_log_diesel_error)?;
                Ok(valid_rows(
                    "meters_log",
                    rows.into_iter()
                        .map(|(row, first, last)| row.into_listing(&first, &last)),
                ))
            }

            async fn list_all(&self) -> Result<Vec<MeterLogEntry>, MeterLogRepositoryError> {
                let mut conn = self.pool.get().await.map_err(meter_log_pool_error)?;
                let rows: Vec<MeterLogRow> = meters_log::table
                    .select(MeterLogRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(meter_log_diesel_error)?;
                Ok(valid_rows(
                    "meters_log",
                    rows.into_iter().map(MeterLogRow::into_domain),
                ))
            }
        }

        #[async_trait]
        impl ProgressSnapshotRepository for $name {
            async fn snapshot(&self) -> Result<ProgressSnapshot, ProgressSnapshotRepositoryError> {
                let mut conn = self.pool.get().await.map_err(snapshot_pool_error)?;
                let (swimmer_rows, entry_rows) = conn
                    .transaction::<_, diesel::result::Error, _>(|conn| {
                        async move {
                            if let Some(isolation) = $snapshot_isolation {
                                diesel::sql_query(isolation).execute(conn).await?;
                            }
                            let swimmer_rows: Vec<SwimmerRow> = swimmers::table
                                .select(SwimmerRow::as_select())
                                .load(conn)
                                .await?;
                            let entry_rows: Vec<MeterLogRow> = meters_log::table
                                .select(MeterLogRow::as_select())
                                .load(conn)
                                .await?;
                            Ok((swimmer_rows, entry_rows))
                        }
                        .scope_boxed()
                    })
                    .await
                    .map_err(snapshot_diesel_error)?;
                Ok(ProgressSnapshot {
                    swimmers: valid_rows(
                        "swimmers",
                        swimmer_rows.into_iter().map(SwimmerRow::into_domain),
                    ),
                    entries: valid_rows(
                        "meters_log",
                        entry_rows.into_iter().map(MeterLogRow::into_domain),
                    ),
                })
            }
        }
    };
}

diesel_store!(
    /// PostgreSQL-backed implementation of the swimmer and meter log ports.
    PostgresStore,
    DbPool,
    POSTGRES_SNAPSHOT_ISOLATION
);

diesel_store!(
    /// SQLite-backed implementation of the swimmer and meter log ports.
    ///
    /// Foreign keys are enforced by the pool on every connection.
    SqliteStore,
    SqlitePool,
    SQLITE_SNAPSHOT_ISOLATION
);
