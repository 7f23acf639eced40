use serde::Deserialize;
use thiserror::Error;

/// Error surface of the REST client. The split matters to callers:
/// 401 tears the session down, 403 carries a business-rule rejection,
/// everything else is shown and retryable.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401 - the token is missing, expired or revoked
    #[error("session expired or invalid")]
    Unauthorized,

    /// HTTP 403 - the backend refused the operation (e.g. past cutoff)
    #[error("{0}")]
    Forbidden(String),

    /// Any other non-success status
    #[error("request failed ({status}): {detail}")]
    Status { status: u16, detail: String },

    /// Connection-level failure before a status was received
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered but the body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message suitable for a toast notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            Self::Forbidden(detail) => detail.clone(),
            Self::Status { detail, .. } => detail.clone(),
            Self::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Decode(_) => "The server returned an unexpected response.".to_string(),
        }
    }
}

/// FastAPI-style error body: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
