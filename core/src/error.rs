//! Error type for the auth client.
//!
//! # Design
//! Every failure is surfaced as one value carrying a human-readable
//! message. Variants only record where the failure happened; callers are
//! expected to show `to_string()` and move on. `Http` displays the message
//! verbatim so a server-supplied `detail` reaches the user unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connect, TLS, I/O).
    #[error("{0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A successful response did not have the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status of the response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_message_verbatim() {
        let err = ApiError::Http {
            status: 401,
            message: "Not authenticated".to_string(),
        };
        assert_eq!(err.to_string(), "Not authenticated");
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.status(), None);
    }
}
