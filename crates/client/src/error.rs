//! Client error types

use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response received at all (DNS failure, connection refused, aborted)
    #[error("no response from server: {0}")]
    NoResponse(String),

    /// Authentication failed (401)
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Forbidden (403)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Bad request (400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other error status, with the server's message preserved
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Client-side form validation failure; never reached the network
    #[error("invalid input: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a transport-level failure from `reqwest`.
    ///
    /// A send error that carries no status means nothing came back from the
    /// server, which callers must be able to tell apart from a rejection.
    pub fn from_send_error(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status, err.to_string()),
            None => Self::NoResponse(err.to_string()),
        }
    }

    /// Whether this error means the session is no longer usable
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}
