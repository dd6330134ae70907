//! Design Storage Database — SurrealDB connection management, schema
//! migrations and the [`DesignRepository`] implementation.
//!
//! [`DesignRepository`]: design_storage_core::repository::DesignRepository

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use repository::SurrealDesignRepository;
pub use schema::{run_migrations, schema_v1};
