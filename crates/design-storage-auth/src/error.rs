//! Authentication error types.

use design_storage_core::error::DesignError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(jsonwebtoken::Algorithm),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for DesignError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => DesignError::Unauthenticated {
                reason: err.to_string(),
            },
            AuthError::UnsupportedAlgorithm(_) | AuthError::Crypto(_) => {
                DesignError::Internal(err.to_string())
            }
        }
    }
}
