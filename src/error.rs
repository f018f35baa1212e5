//! Error types for the jobscout crate

use thiserror::Error;

use crate::parser::QueryError;
use crate::store::DbError;
use crate::website::WebsiteError;

/// Result type for jobscout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for jobscout operations
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching or validating a posting website failed
    #[error("Website error: {0}")]
    Website(#[from] WebsiteError),

    /// A selector query could not be compiled
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
