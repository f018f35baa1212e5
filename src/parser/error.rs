//! Error types for the parser module

use thiserror::Error;

/// Error type for query compilation
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query is blank
    #[error("Empty query")]
    Empty,

    /// The CSS part of the query could not be parsed
    #[error("Invalid selector in query '{query}': {reason}")]
    InvalidSelector {
        /// The full query as written
        query: String,
        /// Parser diagnostics
        reason: String,
    },
}
