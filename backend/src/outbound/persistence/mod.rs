//! Relational persistence adapters using the Diesel ORM.
//!
//! Two interchangeable backends implement the same driven ports over the same
//! schema: PostgreSQL through `AsyncPgConnection`, and an embedded SQLite file
//! through Diesel's synchronous connection wrapped for async use. Both are
//! pooled with `bb8`.
//!
//! # Architecture
//!
//! - **Thin adapters**: stores only translate between Diesel rows and domain
//!   types. Ordering and aggregation live in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped onto the
//!   port error enums; foreign key violations become `UnknownSwimmer`.
//!
//! # Example
//!
//! ```ignore
//! use million_meters::outbound::persistence::{PoolConfig, SqlitePool, SqliteStore};
//!
//! let pool = SqlitePool::new(PoolConfig::new("data/swimming.db")).await?;
//! let store = SqliteStore::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_store;
mod models;
mod pool;
mod postgres_schema_migrator;
mod schema;
mod schema_inspection;
mod sqlite_schema_migrator;

pub use diesel_store::{PostgresStore, SqliteStore};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteAsyncConnection, SqlitePool};
pub use postgres_schema_migrator::PostgresSchemaMigrator;
pub use sqlite_schema_migrator::SqliteSchemaMigrator;
