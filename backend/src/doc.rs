//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: swimmers, meters, summary and the health probes
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, MeterEntryInputSchema, MeterLogEntrySchema,
    MeterLogListingSchema, SummarySchema, SwimmerInputSchema, SwimmerSchema, SwimmerTotalsSchema,
};
use crate::inbound::http::swimmers::DeletedSwimmerResponse;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Million meters API",
        description = "Swimmer registry, meter log and shared progress towards one million meters."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::swimmers::list_swimmers,
        crate::inbound::http::swimmers::create_swimmer,
        crate::inbound::http::swimmers::delete_swimmer,
        crate::inbound::http::meters::list_meter_log,
        crate::inbound::http::meters::log_meters,
        crate::inbound::http::summary::get_summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SwimmerSchema,
        SwimmerInputSchema,
        DeletedSwimmerResponse,
        MeterLogEntrySchema,
        MeterLogListingSchema,
        MeterEntryInputSchema,
        SummarySchema,
        SwimmerTotalsSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "swimmers", description = "Swimmer registration and removal"),
        (name = "meters", description = "Training session log"),
        (name = "summary", description = "Goal progress and ranking"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
