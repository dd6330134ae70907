//! Design Storage Auth — bearer token verification and the authorized
//! design operations built on top of it.

pub mod config;
pub mod error;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::DesignService;
pub use token::ClaimVerifier;
