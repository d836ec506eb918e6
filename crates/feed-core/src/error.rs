//! Feed client error types.

use thiserror::Error;

/// Fallback message when a failed response carries no body.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Errors surfaced by the gateway and the query layer.
///
/// `Clone` so one failed fetch can be handed to every caller that joined it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// Transport failure or non-2xx response.
    #[error("{message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// Build a network error from a non-2xx response body.
    ///
    /// The body text becomes the message; an empty body falls back to
    /// [`DEFAULT_FAILURE_MESSAGE`].
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            body.to_string()
        };
        FeedError::Network {
            status: Some(status),
            message,
        }
    }

    /// Build a network error for a request that never got a response.
    pub fn transport(message: impl Into<String>) -> Self {
        FeedError::Network {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_body() {
        let err = FeedError::from_response(404, "user not found\n");
        assert_eq!(err.to_string(), "user not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = FeedError::from_response(500, "");
        assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
    }
}
