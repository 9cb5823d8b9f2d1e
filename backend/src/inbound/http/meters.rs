//! Meter log HTTP handlers.
//!
//! ```text
//! GET /api/meters
//! POST /api/meters {"swimmer_id":1,"meters":2500,"session_date":"2024-05-01"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::MeterEntryInput;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, MeterEntryInputSchema, MeterLogEntrySchema, MeterLogListingSchema,
};
use crate::inbound::http::state::HttpState;

/// List every entry with the swimmer's names, newest session first.
#[utoipa::path(
    get,
    path = "/api/meters",
    responses(
        (status = 200, description = "Meter log", body = [MeterLogListingSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["meters"],
    operation_id = "listMeterLog"
)]
#[get("/meters")]
pub async fn list_meter_log(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.meter_log_query.list_meter_log().await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Record one training session.
///
/// An unknown `swimmer_id` is rejected with `400` and
/// `details.code = "unknown_swimmer"`.
#[utoipa::path(
    post,
    path = "/api/meters",
    request_body = MeterEntryInputSchema,
    responses(
        (status = 201, description = "Session recorded", body = MeterLogEntrySchema),
        (status = 400, description = "Invalid request or unknown swimmer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["meters"],
    operation_id = "logMeters"
)]
#[post("/meters")]
pub async fn log_meters(
    state: web::Data<HttpState>,
    payload: web::Json<MeterEntryInput>,
) -> ApiResult<HttpResponse> {
    let entry = state.meter_log.log_meters(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(entry))
}

#[cfg(test)]
#[path = "meters_tests.rs"]
mod tests;
