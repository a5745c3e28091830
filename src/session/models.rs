//! Login request/response models

use crate::core::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw credentials collected from the login form
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that both fields are non-empty after trimming.
    ///
    /// Submission is disabled while this fails; the authentication endpoint
    /// is never called with an empty field.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(PortalError::ValidationError(
                "username cannot be empty".to_string(),
            ));
        }

        if self.password.trim().is_empty() {
            return Err(PortalError::ValidationError(
                "password cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque signed token returned by the authentication endpoint.
///
/// The signature is verified server-side; the client only ever reads the
/// payload. The full value never appears in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "AuthToken({}…)", prefix)
    }
}

/// Success body of the authentication endpoint.
///
/// The portal historically used `access_token` / `senha_temporaria`; both
/// spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,

    pub message: Option<String>,

    #[serde(default, alias = "temporaryPassword", alias = "senha_temporaria")]
    pub temporary_password: bool,
}

/// Failure body of the authentication endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// Result of a successful authentication call
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: AuthToken,
    pub message: Option<String>,
    /// The password is temporary and must be changed before normal access
    pub temporary_password: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(Credentials::new("", "secret").validate().is_err());
        assert!(Credentials::new("jdoe", "").validate().is_err());
        assert!(Credentials::new("   ", "secret").validate().is_err());
        assert!(Credentials::new("jdoe", "  \t ").validate().is_err());
        assert!(Credentials::new("jdoe", "secret").validate().is_ok());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("jdoe", "hunter2"));
        assert!(rendered.contains("jdoe"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_auth_token_debug_is_truncated() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiJ9.payload.signature");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("signature"));
    }

    #[test]
    fn test_login_response_canonical_field_names() {
        let body: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": "abc",
            "message": "welcome",
            "temporaryPassword": true,
        }))
        .unwrap();

        assert_eq!(body.token, "abc");
        assert_eq!(body.message.as_deref(), Some("welcome"));
        assert!(body.temporary_password);
    }

    #[test]
    fn test_login_response_legacy_field_names() {
        let body: LoginResponse = serde_json::from_value(serde_json::json!({
            "access_token": "abc",
            "senha_temporaria": true,
        }))
        .unwrap();

        assert_eq!(body.token, "abc");
        assert_eq!(body.message, None);
        assert!(body.temporary_password);
    }

    #[test]
    fn test_login_response_temporary_password_defaults_false() {
        let body: LoginResponse =
            serde_json::from_value(serde_json::json!({ "token": "abc" })).unwrap();
        assert!(!body.temporary_password);
    }

    #[test]
    fn test_credentials_wire_shape() {
        let body = serde_json::to_value(Credentials::new("jdoe", "secret")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "username": "jdoe", "password": "secret" })
        );
    }
}
