//! Storage start-up shared by the server and the schema preparation tool.
//!
//! Opens the configured backend's pool and runs schema preparation once
//! before anything is served. Any failure here is fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use tracing::info;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::ports::MigrationOutcome;
use crate::domain::{Error, SchemaService};
use crate::outbound::persistence::{
    DbPool, PoolConfig, PoolError, PostgresSchemaMigrator, PostgresStore, SqlitePool,
    SqliteSchemaMigrator, SqliteStore,
};

/// Errors raised while opening storage.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The SQLite file's parent directory could not be created.
    #[error("failed to create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The SQLite path is not valid UTF-8.
    #[error("SQLite path {path} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Tables could not be created or migrated.
    #[error("schema preparation failed: {0}")]
    Schema(#[from] Error),
}

impl From<BootstrapError> for std::io::Error {
    fn from(value: BootstrapError) -> Self {
        std::io::Error::other(value.to_string())
    }
}

/// An opened storage backend.
#[derive(Clone)]
pub enum Storage {
    Postgres {
        store: PostgresStore,
        migrator: PostgresSchemaMigrator,
    },
    Sqlite {
        store: SqliteStore,
        migrator: SqliteSchemaMigrator,
    },
}

impl Storage {
    /// Open the pool for the configured backend.
    ///
    /// For SQLite the parent directory of the database file is created first.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the directory or pool cannot be set up.
    pub async fn connect(
        settings: &StorageSettings,
        pool_max_size: u32,
    ) -> Result<Self, BootstrapError> {
        match settings {
            StorageSettings::Postgres { database_url } => {
                let pool =
                    DbPool::new(PoolConfig::new(database_url.clone()).with_max_size(pool_max_size))
                        .await?;
                info!(backend = "postgres", "connection pool ready");
                Ok(Self::Postgres {
                    store: PostgresStore::new(pool.clone()),
                    migrator: PostgresSchemaMigrator::new(pool),
                })
            }
            StorageSettings::Sqlite { path } => {
                ensure_parent_dir(path)?;
                let url = path
                    .to_str()
                    .ok_or_else(|| BootstrapError::NonUtf8Path { path: path.clone() })?;
                let pool = SqlitePool::new(PoolConfig::new(url).with_max_size(pool_max_size))
                    .await?;
                info!(backend = "sqlite", path = url, "connection pool ready");
                Ok(Self::Sqlite {
                    store: SqliteStore::new(pool.clone()),
                    migrator: SqliteSchemaMigrator::new(pool),
                })
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::Postgres { .. } => StorageBackend::Postgres,
            Self::Sqlite { .. } => StorageBackend::Sqlite,
        }
    }

    /// Create the tables and apply the `share_number` upgrade.
    ///
    /// # Errors
    ///
    /// Returns the domain error reported by [`SchemaService::prepare_schema`].
    pub async fn prepare_schema(&self) -> Result<MigrationOutcome, Error> {
        match self {
            Self::Postgres { migrator, .. } => {
                SchemaService::new(Arc::new(migrator.clone()))
                    .prepare_schema()
                    .await
            }
            Self::Sqlite { migrator, .. } => {
                SchemaService::new(Arc::new(migrator.clone()))
                    .prepare_schema()
                    .await
            }
        }
    }
}

/// Open storage and prepare the schema in one step.
///
/// # Errors
///
/// Returns [`BootstrapError`] when either step fails.
pub async fn open_storage(
    settings: &StorageSettings,
    pool_max_size: u32,
) -> Result<(Storage, MigrationOutcome), BootstrapError> {
    let storage = Storage::connect(settings, pool_max_size).await?;
    let outcome = storage.prepare_schema().await?;
    Ok((storage, outcome))
}

fn ensure_parent_dir(path: &Path) -> Result<(), BootstrapError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|source| {
                BootstrapError::DataDir {
                    path: parent.to_path_buf(),
                    source,
                }
            })
        }
        _ => Ok(()),
    }
}
