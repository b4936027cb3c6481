//! Error types for the workout log client.
//!
//! # Design
//! `NotFound` gets its own variant because the form controller reacts to it
//! differently from other failures (delete of a vanished record). All other
//! non-2xx responses land in `Http` with the status and the server's message.

use thiserror::Error;

/// Errors returned by `ExerciseClient` parse methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// The host could not complete the HTTP round-trip at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::Http {
            status: 400,
            message: "exercise validation failed".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400: exercise validation failed");
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(
            TransportError::new("connection refused").to_string(),
            "transport failed: connection refused"
        );
    }
}
