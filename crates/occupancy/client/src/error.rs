//! Client construction errors
//!
//! Per-room fetch failures are not errors; they are reported as
//! [`occupancy_types::FetchFailure`] values.

use thiserror::Error;

/// Errors raised while building a [`crate::DensityClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API base URL cannot be used to build request URLs.
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Result type for client construction.
pub type ClientResult<T> = Result<T, ClientError>;
