//! Server entry-point: prepares storage, then serves the REST API, health
//! probes, static assets and OpenAPI docs.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use million_meters::bootstrap::open_storage;
use million_meters::config::AppSettings;
use million_meters::inbound::http::health::HealthState;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_process_env().map_err(std::io::Error::other)?;
    let (storage, outcome) = open_storage(&settings.storage, settings.pool_max_size).await?;
    info!(backend = ?storage.backend(), ?outcome, "storage ready");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr(), settings.static_dir.clone())
        .with_storage(storage);
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
