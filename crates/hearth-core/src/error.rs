//! Centralized error types for Hearth.

use thiserror::Error;

/// Main error type for Hearth operations.
#[derive(Error, Debug)]
pub enum HearthError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Document decode error for {collection}/{id}: {message}")]
    DocumentDecode {
        collection: String,
        id: String,
        message: String,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] neo4rs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Hearth operations.
pub type HearthResult<T> = Result<T, HearthError>;

impl HearthError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
