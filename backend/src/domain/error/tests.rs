//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_message_under_error_key() {
    let err = Error::invalid_request("meters must be greater than zero")
        .with_details(json!({ "field": "meters", "code": "invalid_meters" }));

    let value = serde_json::to_value(&err).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "error": "meters must be greater than zero",
            "code": "invalid_request",
            "details": { "field": "meters", "code": "invalid_meters" },
        })
    );
}

#[rstest]
fn deserialisation_rejects_blank_trace_id() {
    let payload = json!({ "error": "bad", "code": "invalid_request", "trace_id": "  " });

    let result = serde_json::from_value::<Error>(payload);

    assert!(result.is_err());
}

#[rstest]
fn deserialisation_round_trips_trace_id(expected_trace_id: String) {
    let err = Error::not_found("swimmer 7 not found").with_trace_id(expected_trace_id.clone());

    let json = serde_json::to_string(&err).expect("error serialises");
    let decoded: Error = serde_json::from_str(&json).expect("error deserialises");

    assert_eq!(decoded.trace_id(), Some(expected_trace_id.as_str()));
    assert_eq!(decoded.code(), ErrorCode::NotFound);
}
