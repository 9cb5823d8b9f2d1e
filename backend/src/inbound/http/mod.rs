//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{HttpRequest, Scope, web};

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod meters;
pub mod schemas;
pub mod state;
pub mod static_files;
pub mod summary;
pub mod swimmers;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
use error::{json_error_handler, path_error_handler};

/// Every JSON endpoint under `/api`.
///
/// Unknown paths inside the scope answer with a JSON `404` instead of
/// falling through to the static shell.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use million_meters::inbound::http::{api_scope, state::HttpState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(swimmers::list_swimmers)
        .service(swimmers::create_swimmer)
        .service(swimmers::delete_swimmer)
        .service(meters::list_meter_log)
        .service(meters::log_meters)
        .service(summary::get_summary)
        .default_service(web::to(api_not_found))
}

async fn api_not_found(req: HttpRequest) -> ApiResult<web::Json<()>> {
    Err(Error::not_found(format!("no resource at {}", req.path())))
}
