//! Error type system for the portal session client
//!
//! This module provides the crate-wide error type with:
//! - A closed taxonomy covering the login flow
//! - Conversion to the single user-visible message shown per outcome
//! - Retryability classification for callers that resubmit

/// Fallback shown whenever the server did not supply an error message.
pub const GENERIC_LOGIN_FAILURE: &str = "Invalid credentials. Check them and try again.";

/// Default success message when the server response carries none.
pub const DEFAULT_LOGIN_SUCCESS: &str = "Login successful!";

/// Main error type for the portal session client
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    // Configuration / startup errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Boundary errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The server and client disagree on token shape. This is a logic
    /// error, not a user mistake, and must never be retried.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    // Transport errors
    #[error("Network error: {0}")]
    NetworkError(String),

    // I/O errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // Serialization errors
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl PortalError {
    /// Get the error type name for structured logging
    pub fn error_type(&self) -> &'static str {
        match self {
            PortalError::ConfigError(_) => "ConfigError",
            PortalError::ValidationError(_) => "ValidationError",
            PortalError::AuthenticationError(_) => "AuthenticationError",
            PortalError::MalformedToken(_) => "MalformedToken",
            PortalError::NetworkError(_) => "NetworkError",
            PortalError::IoError(_) => "IoError",
            PortalError::DeserializationError(_) => "DeserializationError",
        }
    }

    /// The single user-visible message for this failure.
    ///
    /// Only a server-provided authentication message is ever surfaced
    /// verbatim; every other failure collapses to the generic fallback so
    /// no internal detail reaches the login screen.
    pub fn user_message(&self) -> &str {
        match self {
            PortalError::AuthenticationError(msg) => msg,
            _ => GENERIC_LOGIN_FAILURE,
        }
    }

    /// Check if resubmitting the same credentials could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, PortalError::NetworkError(_))
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::DeserializationError(err.to_string())
        } else {
            PortalError::NetworkError(err.to_string())
        }
    }
}

/// Result type alias for operations that can fail with PortalError
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::AuthenticationError("test".into()).error_type(),
            "AuthenticationError"
        );
        assert_eq!(
            PortalError::MalformedToken("test".into()).error_type(),
            "MalformedToken"
        );
        assert_eq!(
            PortalError::ValidationError("test".into()).error_type(),
            "ValidationError"
        );
    }

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = PortalError::AuthenticationError("Account locked".into());
        assert_eq!(err.user_message(), "Account locked");
    }

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = PortalError::NetworkError("connection refused 10.0.0.3:443".into());
        assert_eq!(err.user_message(), GENERIC_LOGIN_FAILURE);

        let err = PortalError::MalformedToken("bad payload segment".into());
        assert_eq!(err.user_message(), GENERIC_LOGIN_FAILURE);
    }

    #[test]
    fn test_error_retryable() {
        assert!(PortalError::NetworkError("test".into()).is_retryable());
        assert!(!PortalError::AuthenticationError("test".into()).is_retryable());
        assert!(!PortalError::MalformedToken("test".into()).is_retryable());
        assert!(!PortalError::ValidationError("test".into()).is_retryable());
    }
}
