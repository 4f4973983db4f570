//! Core error type shared by both client binaries.

use thiserror::Error;

use crate::assignment::DraftError;
use fleetmon_api::ApiError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// An API call failed (transport, status, or decode).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local validation rejected an assignment draft. No request was sent.
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// Configuration could not be turned into a usable client.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl CoreError {
    /// True when the failure never left the process (class "c").
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config { .. })
    }
}
