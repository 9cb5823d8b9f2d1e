//! Optional PostgreSQL round trip gated by MILLION_METERS_TEST_DATABASE_URL.
//! Use `cargo test -- --ignored` with the variable pointing at a disposable
//! database to run it.

use std::sync::Arc;

use diesel_async::SimpleAsyncConnection as _;

use million_meters::bootstrap::{Storage, open_storage};
use million_meters::config::StorageSettings;
use million_meters::domain::ports::{
    MeterLogCommand, MeterLogQuery, SummaryQuery, SwimmersCommand, SwimmersQuery,
};
use million_meters::domain::{MeterLogService, SummaryService, SwimmerService};
use million_meters::outbound::persistence::{DbPool, PoolConfig};

mod support;

use support::{StepClock, entry_input, swimmer_input};

const DATABASE_URL_ENV: &str = "MILLION_METERS_TEST_DATABASE_URL";

#[tokio::test]
#[ignore = "requires a PostgreSQL database; opt-in via MILLION_METERS_TEST_DATABASE_URL"]
async fn postgres_store_matches_sqlite_behaviour() {
    let Ok(database_url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-POSTGRES: set {DATABASE_URL_ENV} to run");
        return;
    };

    let (storage, _) = open_storage(
        &StorageSettings::Postgres {
            database_url: database_url.clone(),
        },
        2,
    )
    .await
    .expect("open postgres storage");
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .expect("cleanup pool");
    pool.get()
        .await
        .expect("cleanup connection")
        .batch_execute("TRUNCATE meters_log, swimmers RESTART IDENTITY CASCADE")
        .await
        .expect("truncate tables");

    let Storage::Postgres { store, .. } = storage else {
        panic!("expected postgres storage");
    };
    let store = Arc::new(store);
    let clock = Arc::new(StepClock::new());
    let swimmers = SwimmerService::new(store.clone(), clock.clone());
    let meter_log = MeterLogService::new(store.clone(), clock);
    let summary = SummaryService::new(store);

    let a = swimmers
        .create_swimmer(swimmer_input("Ana", "A"))
        .await
        .expect("create A");
    let b = swimmers
        .create_swimmer(swimmer_input("Bea", "B"))
        .await
        .expect("create B");
    for (swimmer, meters, date) in [
        (&a, 500, "2024-01-01"),
        (&a, 300, "2024-01-02"),
        (&b, 1000, "2024-01-01"),
    ] {
        meter_log
            .log_meters(entry_input(swimmer, meters, date))
            .await
            .expect("log meters");
    }

    let totals = summary.summary().await.expect("summary");
    assert_eq!(totals.total_meters, 1800);
    assert_eq!(totals.percentage.as_str(), "0.18");
    assert_eq!(totals.by_swimmer[0].id, b.id());

    let log = meter_log.list_meter_log().await.expect("log");
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].entry().meters().get(), 300);

    swimmers.delete_swimmer(a.id()).await.expect("delete");
    assert_eq!(meter_log.list_meter_log().await.expect("log").len(), 1);
    assert_eq!(swimmers.list_swimmers().await.expect("list").len(), 1);
}
