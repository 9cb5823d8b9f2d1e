//! Create the tables and apply the `share_number` upgrade without serving.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use million_meters::bootstrap::open_storage;
use million_meters::config::{
    AppSettings, DEFAULT_DATABASE_URL, DEFAULT_SQLITE_PATH, StorageBackend, StorageSettings,
};
use million_meters::domain::ports::MigrationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Postgres,
    Sqlite,
}

/// `prepare-schema` command arguments.
///
/// Flags override the matching environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "prepare-schema",
    about = "Create the swimmer and meter log tables and migrate legacy columns",
    version
)]
struct CliArgs {
    /// Storage backend. Falls back to `STORAGE_BACKEND`.
    #[arg(long, value_enum)]
    backend: Option<Backend>,
    /// PostgreSQL connection URL. Falls back to `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// SQLite database file. Falls back to `SQLITE_PATH`.
    #[arg(long = "sqlite-path", value_name = "path")]
    sqlite_path: Option<PathBuf>,
}

impl CliArgs {
    fn apply(self, settings: &mut AppSettings) {
        let backend = self.backend.unwrap_or(match settings.storage.backend() {
            StorageBackend::Postgres => Backend::Postgres,
            StorageBackend::Sqlite => Backend::Sqlite,
        });
        settings.storage = match (backend, &settings.storage) {
            (Backend::Postgres, StorageSettings::Postgres { database_url }) => {
                StorageSettings::Postgres {
                    database_url: self.database_url.unwrap_or_else(|| database_url.clone()),
                }
            }
            (Backend::Postgres, StorageSettings::Sqlite { .. }) => StorageSettings::Postgres {
                database_url: self
                    .database_url
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            },
            (Backend::Sqlite, StorageSettings::Sqlite { path }) => StorageSettings::Sqlite {
                path: self.sqlite_path.unwrap_or_else(|| path.clone()),
            },
            (Backend::Sqlite, StorageSettings::Postgres { .. }) => StorageSettings::Sqlite {
                path: self
                    .sqlite_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH)),
            },
        };
    }
}

fn describe(outcome: MigrationOutcome) -> String {
    match outcome {
        MigrationOutcome::AlreadyCurrent => "schema already current".to_owned(),
        MigrationOutcome::Added => "added swimmers.share_number".to_owned(),
        MigrationOutcome::Renamed { reset_rows } => format!(
            "renamed swimmers.category to share_number; cleared {reset_rows} previous values"
        ),
    }
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let mut settings = AppSettings::from_process_env().map_err(io::Error::other)?;
    args.apply(&mut settings);

    let (_, outcome) = open_storage(&settings.storage, 1).await?;
    println!("{}", describe(outcome));
    Ok(())
}
