//! Error types for the booking API client.

use thiserror::Error;

/// Errors that can occur when talking to the booking backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// `POST /user/register` answered 400.
    #[error("user already registered")]
    AlreadyRegistered,

    /// `POST /user/login` was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Rejected locally before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend refused the session token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 404,
            message: "Event not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Event not found");
        assert_eq!(ApiError::AlreadyRegistered.to_string(), "user already registered");
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::Status {
            status: 401,
            message: String::new(),
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::InvalidCredentials.is_unauthorized());
    }
}
