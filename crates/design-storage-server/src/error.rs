//! Mapping of domain errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use design_storage_core::error::DesignError;
use serde_json::json;
use tracing::error;

/// A [`DesignError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub DesignError);

impl ApiError {
    /// - Unauthenticated: 401 Unauthorized
    /// - Forbidden: 403 Forbidden
    /// - NotFound: 404 Not Found (also for designs hidden from the caller)
    /// - Validation: 400 Bad Request
    /// - Database/Internal: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match &self.0 {
            DesignError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            DesignError::Forbidden { .. } => StatusCode::FORBIDDEN,
            DesignError::NotFound { .. } => StatusCode::NOT_FOUND,
            DesignError::Validation { .. } => StatusCode::BAD_REQUEST,
            DesignError::Database(_) | DesignError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DesignError> for ApiError {
    fn from(err: DesignError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Storage and internal failures are logged, never echoed to clients.
        let message = match &self.0 {
            DesignError::Database(_) | DesignError::Internal(_) => {
                error!(error = %self.0, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
