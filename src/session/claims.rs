//! Token claims extraction
//!
//! The authentication endpoint returns a signed JWT. Signature verification
//! happens server-side; the client only reads the payload segment to learn
//! who logged in and which role the account carries. The payload's `sub`
//! field is ambiguous in the wild: it is either a structured object holding
//! the claims themselves, or a plain scalar identity. That ambiguity is
//! resolved exactly once, here, at decode time.

use crate::core::error::{PortalError, Result};
use crate::session::models::AuthToken;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use serde_json::Value;

/// Identity and role attributes carried inside a token
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    pub username: Option<String>,

    /// Legacy identity field, used when `username` is absent
    pub user: Option<String>,

    #[serde(rename = "tipo_login", alias = "role")]
    pub role: Option<String>,
}

/// Claims with the payload-shape ambiguity already resolved
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedClaims {
    /// The payload's `sub` was itself an object; that object is the claims
    NestedSubject(Claims),

    /// Claims live at the top level of the payload; a scalar `sub` is kept
    /// as the identity of last resort
    Flat {
        claims: Claims,
        subject: Option<String>,
    },
}

impl DecodedClaims {
    pub fn claims(&self) -> &Claims {
        match self {
            DecodedClaims::NestedSubject(claims) => claims,
            DecodedClaims::Flat { claims, .. } => claims,
        }
    }

    /// Scalar `sub` fallback; always `None` for nested-subject payloads
    pub fn subject(&self) -> Option<&str> {
        match self {
            DecodedClaims::NestedSubject(_) => None,
            DecodedClaims::Flat { subject, .. } => subject.as_deref(),
        }
    }

    /// Username claim normalized to lowercase.
    ///
    /// Preference order: `username`, then `user`, then the scalar `sub`.
    pub fn normalized_username(&self) -> String {
        let claims = self.claims();
        claims
            .username
            .as_deref()
            .or(claims.user.as_deref())
            .or_else(|| self.subject())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Role claim normalized to lowercase; empty string when absent
    pub fn normalized_role(&self) -> String {
        self.claims()
            .role
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Decode the token payload without verifying the signature.
///
/// Fails with [`PortalError::MalformedToken`] when the token is not a JWT
/// compact serialization or its payload is not valid JSON.
pub fn extract_claims(token: &AuthToken) -> Result<DecodedClaims> {
    let payload = token
        .as_str()
        .split('.')
        .nth(1)
        .ok_or_else(|| malformed("missing payload segment"))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| malformed(&format!("payload is not base64url: {}", e)))?;

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| malformed(&format!("payload is not JSON: {}", e)))?;

    match value.get("sub") {
        Some(sub @ Value::Object(_)) => {
            let claims = Claims::deserialize(sub.clone())
                .map_err(|e| malformed(&format!("subject object: {}", e)))?;
            Ok(DecodedClaims::NestedSubject(claims))
        }
        sub => {
            let subject = match sub {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            let claims = Claims::deserialize(value.clone())
                .map_err(|e| malformed(&format!("payload claims: {}", e)))?;
            Ok(DecodedClaims::Flat { claims, subject })
        }
    }
}

fn malformed(detail: &str) -> PortalError {
    PortalError::MalformedToken(detail.to_string())
}
