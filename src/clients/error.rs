//! Error types for calls to the marketplace backend.

use thiserror::Error;

/// Errors returned by the backend API clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own `message` field when it sent one, otherwise
    /// `API Error: <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never got a response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a body we could not decode.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::InvalidResponse(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
