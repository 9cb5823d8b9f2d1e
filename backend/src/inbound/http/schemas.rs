//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON produced by their domain counterparts
//! but live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "meters must be an integer greater than zero")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending field and a machine-readable reason, for validation errors.
    #[schema(example = json!({"field": "meters", "code": "invalid_meters"}))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Swimmer`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Swimmer)]
pub struct SwimmerSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Ana")]
    first_name: String,
    #[schema(example = "López")]
    last_name: String,
    /// Club share number between 1 and 999.
    #[schema(minimum = 1, maximum = 999, example = 12)]
    share_number: Option<i32>,
    #[schema(format = "date-time")]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::SwimmerInput`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SwimmerInput)]
pub struct SwimmerInputSchema {
    #[schema(example = "Ana")]
    first_name: String,
    #[schema(example = "López")]
    last_name: String,
    /// Omit, send `null` or an empty string to leave unset.
    #[schema(minimum = 1, maximum = 999, example = 12)]
    share_number: Option<i32>,
}

/// OpenAPI schema for [`crate::domain::MeterLogEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MeterLogEntry)]
pub struct MeterLogEntrySchema {
    #[schema(example = 7)]
    id: i64,
    #[schema(example = 1)]
    swimmer_id: i64,
    #[schema(minimum = 1, example = 2500)]
    meters: i64,
    #[schema(format = "date", example = "2024-05-01")]
    session_date: String,
    #[schema(example = "intervals")]
    notes: Option<String>,
    #[schema(format = "date-time")]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::MeterLogListing`].
///
/// A log entry flattened together with the swimmer's names.
#[derive(ToSchema)]
#[schema(as = crate::domain::MeterLogListing)]
pub struct MeterLogListingSchema {
    #[schema(example = 7)]
    id: i64,
    #[schema(example = 1)]
    swimmer_id: i64,
    #[schema(minimum = 1, example = 2500)]
    meters: i64,
    #[schema(format = "date", example = "2024-05-01")]
    session_date: String,
    notes: Option<String>,
    #[schema(format = "date-time")]
    created_at: String,
    #[schema(example = "Ana")]
    first_name: String,
    #[schema(example = "López")]
    last_name: String,
}

/// OpenAPI schema for [`crate::domain::MeterEntryInput`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MeterEntryInput)]
pub struct MeterEntryInputSchema {
    #[schema(minimum = 1, example = 1)]
    swimmer_id: i64,
    #[schema(minimum = 1, example = 2500)]
    meters: i64,
    #[schema(format = "date", example = "2024-05-01")]
    session_date: String,
    notes: Option<String>,
}

/// OpenAPI schema for [`crate::domain::SwimmerTotals`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SwimmerTotals)]
pub struct SwimmerTotalsSchema {
    id: i64,
    first_name: String,
    last_name: String,
    share_number: Option<i32>,
    #[schema(example = 4500)]
    total_meters: i64,
    #[schema(example = 3)]
    total_sessions: i64,
}

/// OpenAPI schema for [`crate::domain::Summary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Summary)]
pub struct SummarySchema {
    #[schema(example = 1_000_000)]
    goal: i64,
    #[schema(example = 4500)]
    total_meters: i64,
    /// Progress with two decimals, capped at `"100.00"`.
    #[schema(example = "0.45")]
    percentage: String,
    #[schema(example = 2)]
    swimmer_count: i64,
    /// Every swimmer, highest total first.
    by_swimmer: Vec<SwimmerTotalsSchema>,
}
