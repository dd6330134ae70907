//! Error types for design storage.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignError {
    /// No visible design matches the identifier. Covers both "absent" and
    /// "hidden from the caller".
    #[error("Cannot find design with id {id}")]
    NotFound { id: i64 },

    #[error("Authentication failed: {reason}")]
    Unauthenticated { reason: String },

    #[error("Authorization denied: {reason}")]
    Forbidden { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DesignError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }
}

pub type DesignResult<T> = Result<T, DesignError>;
