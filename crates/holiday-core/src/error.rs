//! Error types for fetching and resolving holiday data.

use thiserror::Error;

/// Errors raised while talking to the holiday API or reading geometry.
///
/// None of these are fatal to a hunt: the fetcher turns them into
/// [`FetchOutcome::Missing`](crate::FetchOutcome::Missing) and moves on.
#[derive(Debug, Error)]
pub enum HolidayError {
    /// Transport failure (DNS, connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The server answered with an empty body.
    #[error("Empty response body from {0}")]
    EmptyBody(String),

    /// The body was not the JSON we expected.
    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// No geometry matches the country.
    #[error("No geometry for country {0}")]
    UnmappedCountry(String),

    /// IO error while reading a geometry file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for holiday operations.
pub type Result<T> = std::result::Result<T, HolidayError>;
