//! Error types for the relay client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay could not be reached or the request timed out
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The relay answered with a non-success status
    #[error("Relay answered {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The relay answered with a body that does not match the protocol
    #[error("Malformed relay response: {0}")]
    DecodeError(String),

    /// The agent was created outside of a Tokio runtime
    #[error("No Tokio runtime available: {0}")]
    RuntimeUnavailable(String),
}

impl ClientError {
    /// Failures expected to go away on the next poll
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::UnexpectedStatus { .. }
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::DecodeError(error.to_string())
        } else {
            Self::ConnectionError(error.to_string())
        }
    }
}
