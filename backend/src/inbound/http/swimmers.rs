//! Swimmer HTTP handlers.
//!
//! ```text
//! GET /api/swimmers
//! POST /api/swimmers {"first_name":"Ana","last_name":"López","share_number":12}
//! DELETE /api/swimmers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{SwimmerId, SwimmerInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SwimmerInputSchema, SwimmerSchema};
use crate::inbound::http::state::HttpState;

/// Response body confirming a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedSwimmerResponse {
    /// Identifier of the removed swimmer.
    #[schema(example = 3)]
    pub deleted: i64,
}

/// List every swimmer ordered by last name, then first name.
#[utoipa::path(
    get,
    path = "/api/swimmers",
    responses(
        (status = 200, description = "Registered swimmers", body = [SwimmerSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["swimmers"],
    operation_id = "listSwimmers"
)]
#[get("/swimmers")]
pub async fn list_swimmers(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let swimmers = state.swimmers_query.list_swimmers().await?;
    Ok(HttpResponse::Ok().json(swimmers))
}

/// Register a swimmer.
#[utoipa::path(
    post,
    path = "/api/swimmers",
    request_body = SwimmerInputSchema,
    responses(
        (status = 201, description = "Swimmer created", body = SwimmerSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["swimmers"],
    operation_id = "createSwimmer"
)]
#[post("/swimmers")]
pub async fn create_swimmer(
    state: web::Data<HttpState>,
    payload: web::Json<SwimmerInput>,
) -> ApiResult<HttpResponse> {
    let swimmer = state.swimmers.create_swimmer(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(swimmer))
}

/// Remove a swimmer together with all of their log entries.
#[utoipa::path(
    delete,
    path = "/api/swimmers/{id}",
    params(("id" = i64, Path, description = "Swimmer identifier")),
    responses(
        (status = 200, description = "Swimmer removed", body = DeletedSwimmerResponse),
        (status = 404, description = "Unknown swimmer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["swimmers"],
    operation_id = "deleteSwimmer"
)]
#[delete("/swimmers/{id}")]
pub async fn delete_swimmer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DeletedSwimmerResponse>> {
    let deleted = state
        .swimmers
        .delete_swimmer(SwimmerId::new(path.into_inner()))
        .await?;
    Ok(web::Json(DeletedSwimmerResponse {
        deleted: deleted.get(),
    }))
}

#[cfg(test)]
#[path = "swimmers_tests.rs"]
mod tests;
