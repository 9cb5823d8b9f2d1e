//! The JSON API served over a real SQLite store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use million_meters::Trace;
use million_meters::domain::TRACE_ID_HEADER;
use million_meters::inbound::http::api_scope;
use million_meters::inbound::http::state::HttpState;
use million_meters::inbound::http::static_files::{StaticFiles, serve_static};

mod support;

use support::{SqliteFixture, StepClock};

fn state_for(db: &SqliteFixture) -> HttpState {
    let clock = Arc::new(StepClock::new());
    let swimmers = Arc::new(db.swimmers(clock.clone()));
    let meter_log = Arc::new(db.meter_log(clock));
    HttpState::default()
        .with_swimmers(swimmers.clone(), swimmers)
        .with_meter_log(meter_log.clone(), meter_log)
        .with_summary(Arc::new(db.summary()))
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn post(uri: &str, body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri(uri).set_json(body)
}

fn get(uri: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(uri)
}

#[rstest]
#[actix_web::test]
async fn logging_sessions_moves_the_summary() {
    let db = SqliteFixture::new().await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&db)))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let (status, ana) = send(
        &app,
        post(
            "/api/swimmers",
            json!({"first_name": " Ana ", "last_name": "A", "share_number": 12}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ana["first_name"], "Ana");
    assert_eq!(ana["share_number"], 12);
    let (_, bea) = send(
        &app,
        post("/api/swimmers", json!({"first_name": "Bea", "last_name": "B"})),
    )
    .await;

    for (swimmer, meters, date) in [
        (&ana, 500, "2024-01-01"),
        (&ana, 300, "2024-01-02"),
        (&bea, 1000, "2024-01-01"),
    ] {
        let (status, entry) = send(
            &app,
            post(
                "/api/meters",
                json!({"swimmer_id": swimmer["id"], "meters": meters, "session_date": date}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(entry["meters"], meters);
    }

    let (status, summary) = send(&app, get("/api/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_meters"], 1800);
    assert_eq!(summary["percentage"], "0.18");
    assert_eq!(summary["swimmer_count"], 2);
    assert_eq!(summary["by_swimmer"][0]["first_name"], "Bea");
    assert_eq!(summary["by_swimmer"][1]["total_sessions"], 2);

    let (_, log) = send(&app, get("/api/meters")).await;
    let dates: Vec<&str> = log
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|entry| entry["session_date"].as_str())
        .collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-01", "2024-01-01"]);
    assert_eq!(log[0]["first_name"], "Ana");
}

#[rstest]
#[actix_web::test]
async fn deleting_a_swimmer_clears_their_history() {
    let db = SqliteFixture::new().await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&db)))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    let (_, ana) = send(
        &app,
        post("/api/swimmers", json!({"first_name": "Ana", "last_name": "A"})),
    )
    .await;
    send(
        &app,
        post(
            "/api/meters",
            json!({"swimmer_id": ana["id"], "meters": 2000, "session_date": "2024-04-04"}),
        ),
    )
    .await;
    let uri = format!("/api/swimmers/{}", ana["id"]);

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": ana["id"]}));

    let (status, again) = send(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(again["code"], "not_found");

    let (_, log) = send(&app, get("/api/meters")).await;
    assert_eq!(log, json!([]));
    let (_, summary) = send(&app, get("/api/summary")).await;
    assert_eq!(summary["total_meters"], 0);
    assert_eq!(summary["by_swimmer"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn unknown_swimmer_is_a_bad_request_with_trace_id() {
    let db = SqliteFixture::new().await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&db)))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        post(
            "/api/meters",
            json!({"swimmer_id": 404, "meters": 100, "session_date": "2024-01-01"}),
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "unknown_swimmer");
    assert_eq!(body["trace_id"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn shell_is_served_outside_the_api() {
    let db = SqliteFixture::new().await;
    let public = tempfile::tempdir().expect("public dir");
    std::fs::write(public.path().join("index.html"), "<main>progress</main>")
        .expect("write shell");
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&db)))
            .app_data(web::Data::new(StaticFiles::open(public.path())))
            .wrap(Trace)
            .service(api_scope())
            .default_service(web::to(serve_static)),
    )
    .await;

    let shell = actix_test::call_service(&app, get("/ranking").to_request()).await;
    assert_eq!(shell.status(), StatusCode::OK);
    let body = actix_test::read_body(shell).await;
    assert_eq!(body.as_ref(), b"<main>progress</main>");

    let (status, missing) = send(&app, get("/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["code"], "not_found");
}
