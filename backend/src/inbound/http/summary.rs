//! Goal progress HTTP handler.

use actix_web::{get, web};

use crate::domain::Summary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SummarySchema};
use crate::inbound::http::state::HttpState;

/// Aggregate progress towards the goal and rank every swimmer.
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Goal progress and ranking", body = SummarySchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["summary"],
    operation_id = "getSummary"
)]
#[get("/summary")]
pub async fn get_summary(state: web::Data<HttpState>) -> ApiResult<web::Json<Summary>> {
    let summary = state.summary.summary().await?;
    Ok(web::Json(summary))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockSummaryQuery;
    use crate::domain::{Error, GOAL_METERS, compute_summary};
    use crate::inbound::http::test_utils::test_app;

    #[rstest]
    #[actix_web::test]
    async fn empty_summary_reports_zero_progress() {
        let app = actix_test::init_service(test_app(HttpState::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/summary").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["goal"], GOAL_METERS);
        assert_eq!(body["total_meters"], 0);
        assert_eq!(body["percentage"], "0.00");
        assert_eq!(body["by_swimmer"], Value::Array(Vec::new()));
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_outage_is_service_unavailable() {
        let mut summary = MockSummaryQuery::new();
        summary
            .expect_summary()
            .times(1)
            .return_once(|| Err(Error::service_unavailable("meter log repository unavailable")));
        let state = HttpState::default().with_summary(Arc::new(summary));
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/summary").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "service_unavailable");
    }

    #[rstest]
    #[actix_web::test]
    async fn mocked_summary_is_serialised_verbatim() {
        let expected = compute_summary(500, &[], &[]);
        let returned = expected.clone();
        let mut summary = MockSummaryQuery::new();
        summary.expect_summary().return_once(move || Ok(returned));
        let state = HttpState::default().with_summary(Arc::new(summary));
        let app = actix_test::init_service(test_app(state)).await;

        let body: Summary = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/api/summary").to_request(),
        )
        .await;

        assert_eq!(body, expected);
    }
}
