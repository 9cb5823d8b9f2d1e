//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the strongly typed swimmer and meter log model, the input
//! validation rules and the aggregation engine. Adapters reach this module
//! only through the ports declared in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - Swimmer, MeterLogEntry, MeterLogListing: stored records.
//! - Summary, SwimmerTotals: aggregated progress towards [`GOAL_METERS`].
//! - validate_swimmer_input, validate_meter_entry_input: write guards.

pub mod error;
mod meter_log;
mod meter_log_service;
pub mod ports;
mod schema_service;
#[cfg(test)]
pub(crate) mod service_test_support;
mod summary;
mod summary_service;
mod swimmer;
mod swimmer_service;
pub mod trace_id;
mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::meter_log::{
    MeterLogEntry, MeterLogEntryId, MeterLogListing, Meters, MetersValidationError,
    NewMeterLogEntry, order_meter_log,
};
pub use self::meter_log_service::MeterLogService;
pub use self::schema_service::SchemaService;
pub use self::summary::{
    GOAL_METERS, Percentage, Summary, SwimmerTotals, compute_summary, remaining_meters,
};
pub use self::summary_service::SummaryService;
pub use self::swimmer::{
    NewSwimmer, PersonName, SHARE_NUMBER_MAX, SHARE_NUMBER_MIN, ShareNumber, Swimmer, SwimmerId,
    SwimmerValidationError, order_swimmers,
};
pub use self::swimmer_service::SwimmerService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    InputError, MeterEntryInput, SwimmerInput, validate_meter_entry_input, validate_swimmer_input,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use million_meters::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("swimmer 4 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
