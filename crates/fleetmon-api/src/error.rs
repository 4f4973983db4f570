//! Error type for backend API calls.

use thiserror::Error;

/// Everything that can go wrong talking to the backend.
///
/// The three variants line up with the failure classes the clients care
/// about: no response at all, a response that says no, and a response we
/// could not make sense of.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received — DNS, connect, TLS, or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        /// Response body, truncated to a short preview.
        body: String,
    },

    /// The body arrived but did not decode into the expected shape.
    #[error("failed to decode response: {message}")]
    Deserialization {
        message: String,
        /// Full response body, kept for diagnostics.
        body: String,
    },

    /// A URL could not be built from the configured base.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for failures where no response was received (class "a").
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
