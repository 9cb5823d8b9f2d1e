//! Swimmer, meter log and summary behaviour against a real SQLite file.

use std::sync::Arc;

use million_meters::domain::ports::{
    MeterLogCommand, MeterLogQuery, ProgressSnapshotRepository, SummaryQuery, SwimmersCommand,
    SwimmersQuery,
};
use million_meters::domain::{ErrorCode, SwimmerId};
use rstest::rstest;
use serde_json::json;

mod support;

use support::{SqliteFixture, StepClock, entry_input, swimmer_input};

#[rstest]
#[tokio::test]
async fn created_swimmer_is_listed_once_in_name_order() {
    let db = SqliteFixture::new().await;
    let swimmers = db.swimmers(Arc::new(StepClock::new()));

    swimmers
        .create_swimmer(swimmer_input("Zoe", "Zamora"))
        .await
        .expect("create Zoe");
    let created = swimmers
        .create_swimmer(swimmer_input("Ana", "López"))
        .await
        .expect("create Ana");
    swimmers
        .create_swimmer(swimmer_input("Bea", "López"))
        .await
        .expect("create Bea");

    let listed = swimmers.list_swimmers().await.expect("list");

    let names: Vec<String> = listed
        .iter()
        .map(|s| format!("{} {}", s.first_name().as_ref(), s.last_name().as_ref()))
        .collect();
    assert_eq!(names, vec!["Ana López", "Bea López", "Zoe Zamora"]);
    assert_eq!(
        listed.iter().filter(|s| s.id() == created.id()).count(),
        1
    );
}

#[rstest]
#[case(json!(0), false)]
#[case(json!(1000), false)]
#[case(json!(500), true)]
#[tokio::test]
async fn share_number_bounds_are_enforced(
    #[case] share_number: serde_json::Value,
    #[case] accepted: bool,
) {
    let db = SqliteFixture::new().await;
    let swimmers = db.swimmers(Arc::new(StepClock::new()));
    let mut input = swimmer_input("Ana", "López");
    input.share_number = Some(share_number);

    let result = swimmers.create_swimmer(input).await;

    assert_eq!(result.is_ok(), accepted);
    let stored = swimmers.list_swimmers().await.expect("list");
    assert_eq!(stored.len(), usize::from(accepted));
}

#[rstest]
#[tokio::test]
async fn scenario_ranks_totals_and_orders_log_by_date() {
    let db = SqliteFixture::new().await;
    let clock = Arc::new(StepClock::new());
    let swimmers = db.swimmers(clock.clone());
    let meter_log = db.meter_log(clock);
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

    let summary = db.summary().summary().await.expect("summary");
    let ranking: Vec<(SwimmerId, i64, i64)> = summary
        .by_swimmer
        .iter()
        .map(|row| (row.id, row.total_meters, row.total_sessions))
        .collect();
    assert_eq!(ranking, vec![(b.id(), 1000, 1), (a.id(), 800, 2)]);
    assert_eq!(summary.total_meters, 1800);
    assert_eq!(summary.percentage.as_str(), "0.18");
    assert_eq!(summary.swimmer_count, 2);

    let log = meter_log.list_meter_log().await.expect("list log");
    let order: Vec<(i64, String)> = log
        .iter()
        .map(|listing| {
            (
                listing.entry().meters().get(),
                listing.entry().session_date().to_string(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            (300, "2024-01-02".to_owned()),
            (1000, "2024-01-01".to_owned()),
            (500, "2024-01-01".to_owned()),
        ]
    );
    assert_eq!(log[1].first_name().as_ref(), "Bea");
}

#[rstest]
#[tokio::test]
async fn empty_log_reports_zero_progress_for_every_swimmer() {
    let db = SqliteFixture::new().await;
    let swimmers = db.swimmers(Arc::new(StepClock::new()));
    for (first, last) in [("Ana", "A"), ("Bea", "B")] {
        swimmers
            .create_swimmer(swimmer_input(first, last))
            .await
            .expect("create swimmer");
    }

    let summary = db.summary().summary().await.expect("summary");

    assert_eq!(summary.total_meters, 0);
    assert_eq!(summary.percentage.as_str(), "0.00");
    assert_eq!(summary.remaining_meters(), 1_000_000);
    assert_eq!(summary.by_swimmer.len(), 2);
    assert!(summary.by_swimmer.iter().all(|row| row.total_meters == 0));
}

#[rstest]
#[tokio::test]
async fn logging_for_unknown_swimmer_is_rejected() {
    let db = SqliteFixture::new().await;
    let clock = Arc::new(StepClock::new());
    let swimmers = db.swimmers(clock.clone());
    let meter_log = db.meter_log(clock);
    let ana = swimmers
        .create_swimmer(swimmer_input("Ana", "A"))
        .await
        .expect("create");
    let mut input = entry_input(&ana, 1000, "2024-05-01");
    input.swimmer_id = Some(json!(ana.id().get() + 100));

    let error = meter_log.log_meters(input).await.expect_err("unknown swimmer");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("unknown_swimmer"))
    );
    assert!(meter_log.list_meter_log().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_a_swimmer_removes_their_entries() {
    let db = SqliteFixture::new().await;
    let clock = Arc::new(StepClock::new());
    let swimmers = db.swimmers(clock.clone());
    let meter_log = db.meter_log(clock);
    let ana = swimmers
        .create_swimmer(swimmer_input("Ana", "A"))
        .await
        .expect("create Ana");
    let bea = swimmers
        .create_swimmer(swimmer_input("Bea", "B"))
        .await
        .expect("create Bea");
    for (swimmer, meters) in [(&ana, 400), (&ana, 600), (&bea, 250)] {
        meter_log
            .log_meters(entry_input(swimmer, meters, "2024-03-03"))
            .await
            .expect("log");
    }

    let deleted = swimmers.delete_swimmer(ana.id()).await.expect("delete");

    assert_eq!(deleted, ana.id());
    let remaining = meter_log.list_meter_log().await.expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].entry().swimmer_id(), bea.id());
    let summary = db.summary().summary().await.expect("summary");
    assert_eq!(summary.total_meters, 250);
    assert_eq!(summary.swimmer_count, 1);
}

#[rstest]
#[tokio::test]
async fn deleting_an_unknown_swimmer_is_not_found() {
    let db = SqliteFixture::new().await;
    let swimmers = db.swimmers(Arc::new(StepClock::new()));

    let error = swimmers
        .delete_swimmer(SwimmerId::new(77))
        .await
        .expect_err("unknown id");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn stored_entries_keep_notes_and_dates() {
    let db = SqliteFixture::new().await;
    let clock = Arc::new(StepClock::new());
    let swimmers = db.swimmers(clock.clone());
    let meter_log = db.meter_log(clock);
    let ana = swimmers
        .create_swimmer(swimmer_input("Ana", "A"))
        .await
        .expect("create");
    let mut input = entry_input(&ana, 1500, "2024-02-29");
    input.notes = Some(json!("open water"));

    let created = meter_log.log_meters(input).await.expect("log");
    let listed = meter_log.list_meter_log().await.expect("list");

    assert_eq!(created.notes(), Some("open water"));
    assert_eq!(listed[0].entry(), &created);
}

#[rstest]
#[tokio::test]
async fn snapshot_reads_swimmers_with_their_entries() {
    let db = SqliteFixture::new().await;
    let clock = Arc::new(StepClock::new());
    let swimmers = db.swimmers(clock.clone());
    let meter_log = db.meter_log(clock);
    let ana = swimmers
        .create_swimmer(swimmer_input("Ana", "López"))
        .await
        .expect("create Ana");
    let entry = meter_log
        .log_meters(entry_input(&ana, 1200, "2024-02-01"))
        .await
        .expect("log");

    let snapshot = db.store.snapshot().await.expect("snapshot");

    assert_eq!(snapshot.swimmers, vec![ana]);
    assert_eq!(snapshot.entries, vec![entry]);
}

#[rstest]
#[tokio::test]
async fn rows_with_blank_names_are_skipped_on_read() {
    let db = SqliteFixture::new().await;
    let clock = Arc::new(StepClock::new());
    let swimmers = db.swimmers(clock.clone());
    let meter_log = db.meter_log(clock);
    let ana = swimmers
        .create_swimmer(swimmer_input("Ana", "López"))
        .await
        .expect("create Ana");
    meter_log
        .log_meters(entry_input(&ana, 500, "2024-02-01"))
        .await
        .expect("log");
    db.execute_raw(
        "INSERT INTO swimmers (first_name, last_name, created_at) \
         VALUES (' ', 'Ruiz', '2024-01-01 07:00:00')",
    )
    .await;

    let listed = swimmers.list_swimmers().await.expect("list");
    let summary = db.summary().summary().await.expect("summary");

    assert_eq!(listed, vec![ana]);
    assert_eq!(meter_log.list_meter_log().await.expect("log").len(), 1);
    assert_eq!(summary.swimmer_count, 1);
    assert_eq!(summary.total_meters, 500);
}
