use thiserror::Error;

use crate::traits::HttpError;

/// The only message a user ever sees for a failed page load.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch publications. Please try again later.";

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] HttpError),

    /// The server answered with a non-2xx status
    #[error("server returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The body was not a publications page
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// User-facing message; identical for every variant.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }

    /// Short machine-readable code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Transport(HttpError::Timeout(_)) => "timeout",
            FetchError::Transport(HttpError::ConnectionFailed(_)) => "connection_failed",
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "http_status",
            FetchError::Decode(_) => "decode",
        }
    }
}
