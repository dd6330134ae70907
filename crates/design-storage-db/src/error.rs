//! Database-specific error types and conversions.

use design_storage_core::error::DesignError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Design not found: {id}")]
    NotFound { id: i64 },
}

impl From<DbError> for DesignError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id } => DesignError::NotFound { id },
            other => DesignError::Database(other.to_string()),
        }
    }
}
