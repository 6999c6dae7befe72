//! Error types for bounty API operations

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BountyError>;

#[derive(Debug, Error)]
pub enum BountyError {
    /// Input rejected before any request was sent
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("bounty not found: {0}")]
    NotFound(String),

    /// Listing skipped because the previous attempt is too recent
    #[error("listing skipped, cooldown active for another {}s", remaining.as_secs())]
    CoolingDown { remaining: Duration },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bounty API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response from bounty API: {0}")]
    MalformedResponse(String),
}

impl BountyError {
    /// Failures reaching or understanding the remote API
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::MalformedResponse(_)
        )
    }
}
