//! Design Storage Server — HTTP boundary over the design service.

pub mod config;
pub mod error;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::router;
