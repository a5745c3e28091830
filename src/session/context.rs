//! Session context holding the active token

use crate::session::models::AuthToken;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// Sink receiving the raw token on successful login
pub trait SessionSink: Send + Sync {
    fn store_token(&self, token: &AuthToken);
}

struct ActiveSession {
    token: AuthToken,
    logged_in_at: DateTime<Utc>,
}

/// In-process session context.
///
/// Holds the token handed over by the bootstrapper so subsequent
/// authenticated calls can attach it as a bearer credential.
#[derive(Default)]
pub struct SessionContext {
    inner: RwLock<Option<ActiveSession>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// `Authorization` header value for authenticated calls
    pub fn bearer_header(&self) -> Option<String> {
        self.token()
            .map(|token| format!("Bearer {}", token.as_str()))
    }

    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|session| session.logged_in_at)
    }

    /// Drop the active session
    pub fn clear(&self) {
        *self.inner.write().unwrap() = None;
    }
}

impl SessionSink for SessionContext {
    fn store_token(&self, token: &AuthToken) {
        *self.inner.write().unwrap() = Some(ActiveSession {
            token: token.clone(),
            logged_in_at: Utc::now(),
        });
        tracing::debug!("Session token stored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unauthenticated() {
        let context = SessionContext::new();
        assert!(!context.is_authenticated());
        assert_eq!(context.bearer_header(), None);
        assert_eq!(context.logged_in_at(), None);
    }

    #[test]
    fn test_store_token_round_trip() {
        let context = SessionContext::new();
        context.store_token(&AuthToken::new("abc.def.ghi"));

        assert!(context.is_authenticated());
        assert_eq!(context.bearer_header().as_deref(), Some("Bearer abc.def.ghi"));
        assert!(context.logged_in_at().is_some());
    }

    #[test]
    fn test_store_token_replaces_previous_session() {
        let context = SessionContext::new();
        context.store_token(&AuthToken::new("first"));
        context.store_token(&AuthToken::new("second"));
        assert_eq!(context.token(), Some(AuthToken::new("second")));
    }

    #[test]
    fn test_clear() {
        let context = SessionContext::new();
        context.store_token(&AuthToken::new("abc"));
        context.clear();
        assert!(!context.is_authenticated());
    }
}
