//! Million meters backend library.
//!
//! A swimmer registry and training log aggregated into shared progress
//! towards a one million meter goal. The crate follows a hexagonal layout:
//! [`domain`] holds the model and services, [`inbound`] the HTTP adapter and
//! [`outbound`] the PostgreSQL and SQLite stores.

pub mod bootstrap;
pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
