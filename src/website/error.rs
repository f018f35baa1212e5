//! Error types for the website module

use thiserror::Error;

use crate::parser::QueryError;

/// Error type for posting website operations
#[derive(Debug, Error)]
pub enum WebsiteError {
    /// The metadata probe failed; the site was never constructed
    #[error("Unable to fetch metadata for {url}. Website unavailable?")]
    Unavailable {
        /// Base URL that was probed
        url: String,
        /// Underlying HTTP failure
        #[source]
        source: reqwest::Error,
    },

    /// The listing page of a validated site could not be fetched
    #[error("Unable to fetch offers from {url}")]
    OffersUnavailable {
        /// Listing URL that was requested
        url: String,
        /// Underlying HTTP failure
        #[source]
        source: reqwest::Error,
    },

    /// The site does not implement the requested operation
    #[error("Operation not supported: {0}")]
    Unsupported(String),

    /// The base URL is malformed or not http(s)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// A site's selector query failed to compile
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}
