//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the SQLite fixtures and service wiring they share live here.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use diesel_async::SimpleAsyncConnection as _;
use mockable::Clock;
use serde_json::json;
use tempfile::TempDir;

use million_meters::bootstrap::{Storage, open_storage};
use million_meters::config::StorageSettings;
use million_meters::domain::{
    MeterEntryInput, MeterLogService, SummaryService, Swimmer, SwimmerInput,
    SwimmerService,
};
use million_meters::outbound::persistence::{PoolConfig, SqlitePool, SqliteStore};

/// Clock advancing one second per reading so insertion order is visible in
/// `created_at`.
pub struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2024, 1, 1, 6, 0, 0)
                .single()
                .expect("valid start time"),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

const DATABASE_FILE: &str = "swimming.db";

/// A prepared SQLite database in a temporary directory.
pub struct SqliteFixture {
    pub dir: TempDir,
    pub store: SqliteStore,
    pub storage: Storage,
}

impl SqliteFixture {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = StorageSettings::Sqlite {
            path: dir.path().join(DATABASE_FILE),
        };
        let (storage, _) = open_storage(&settings, 2).await.expect("open sqlite storage");
        let Storage::Sqlite { store, .. } = &storage else {
            panic!("expected sqlite storage");
        };
        let store = store.clone();
        Self {
            dir,
            store,
            storage,
        }
    }

    /// Run SQL on a separate connection, bypassing the domain.
    pub async fn execute_raw(&self, sql: &str) {
        let path = self.dir.path().join(DATABASE_FILE);
        let url = path.to_str().expect("utf-8 temp path");
        let pool = SqlitePool::new(PoolConfig::new(url).with_max_size(1))
            .await
            .expect("raw pool");
        let mut conn = pool.get().await.expect("raw connection");
        conn.batch_execute(sql).await.expect("raw sql");
    }

    pub fn swimmers(&self, clock: Arc<dyn Clock>) -> SwimmerService<SqliteStore> {
        SwimmerService::new(Arc::new(self.store.clone()), clock)
    }

    pub fn meter_log(&self, clock: Arc<dyn Clock>) -> MeterLogService<SqliteStore> {
        MeterLogService::new(Arc::new(self.store.clone()), clock)
    }

    pub fn summary(&self) -> SummaryService<SqliteStore> {
        SummaryService::new(Arc::new(self.store.clone()))
    }
}

pub fn swimmer_input(first: &str, last: &str) -> SwimmerInput {
    SwimmerInput {
        first_name: Some(json!(first)),
        last_name: Some(json!(last)),
        share_number: None,
    }
}

pub fn entry_input(swimmer: &Swimmer, meters: i64, date: &str) -> MeterEntryInput {
    MeterEntryInput {
        swimmer_id: Some(json!(swimmer.id().get())),
        meters: Some(json!(meters)),
        session_date: Some(json!(date)),
        notes: None,
    }
}
