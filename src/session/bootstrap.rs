//! Session bootstrapper
//!
//! Orchestrates a login submission end to end: boundary validation, the
//! single-flight guard, the authentication call, token hand-over, the one
//! notification per outcome, the optional navigation delay, and destination
//! selection. State machine: Idle -> Submitting -> (Success | Failure),
//! with Failure returning to Idle.

use crate::core::config::RoutingConfig;
use crate::core::error::{Result, DEFAULT_LOGIN_SUCCESS};
use crate::session::claims::extract_claims;
use crate::session::client::AuthClient;
use crate::session::context::SessionSink;
use crate::session::models::Credentials;
use crate::session::notify::{Notifier, Severity};
use crate::session::routing::{choose_destination, Destination};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight; this one was a no-op
    Ignored,

    /// Authentication succeeded and a destination was selected
    Success {
        destination: Destination,
        /// The message that was surfaced through the notifier
        message: String,
    },
}

/// Drives the login flow against the authentication endpoint.
///
/// At most one authentication request is in flight at a time; concurrent
/// submissions are ignored rather than queued.
pub struct SessionBootstrapper<S: SessionSink, N: Notifier> {
    client: AuthClient,
    session: Arc<S>,
    notifier: Arc<N>,
    master_username: String,
    navigation_delay: Duration,
    in_flight: AtomicBool,
}

impl<S: SessionSink, N: Notifier> SessionBootstrapper<S, N> {
    pub fn new(
        client: AuthClient,
        session: Arc<S>,
        notifier: Arc<N>,
        routing: &RoutingConfig,
    ) -> Self {
        Self {
            client,
            session,
            notifier,
            master_username: routing.master_username.clone(),
            navigation_delay: routing.navigation_delay(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit credentials and resolve the post-login destination.
    ///
    /// Empty fields fail with a validation error before anything else
    /// happens: the endpoint is not called and no notification is emitted.
    /// Exactly one notification is emitted per completed outcome; a failed
    /// call never yields a destination.
    pub async fn submit(&self, credentials: &Credentials) -> Result<SubmitOutcome> {
        credentials.validate()?;

        let _guard = match InFlightGuard::acquire(&self.in_flight) {
            Some(guard) => guard,
            None => {
                tracing::debug!("Submission already in flight, ignoring");
                return Ok(SubmitOutcome::Ignored);
            }
        };

        tracing::info!(username = %credentials.username, "Login attempt");

        let outcome = match self.client.authenticate(credentials).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error_type = e.error_type(), "Login failed: {}", e);
                self.notifier.notify(e.user_message(), Severity::Error);
                return Err(e);
            }
        };

        // Hand the raw token to the session context before anything can
        // still fail; authenticated calls are valid from this point on.
        self.session.store_token(&outcome.token);

        let message = outcome
            .message
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGIN_SUCCESS.to_string());
        self.notifier.notify(&message, Severity::Success);

        // Leave the success notification visible before the view changes.
        // Not a correctness requirement; zero is a valid configuration.
        if !self.navigation_delay.is_zero() {
            tokio::time::sleep(self.navigation_delay).await;
        }

        // A temporary password overrides all routing, before the token is
        // even decoded: compliance first, claims never consulted.
        let destination = if outcome.temporary_password {
            Destination::ChangePassword
        } else {
            let decoded = extract_claims(&outcome.token)?;
            choose_destination(&decoded, &self.master_username)
        };

        tracing::info!(destination = destination.route(), "Login successful");

        Ok(SubmitOutcome::Success {
            destination,
            message,
        })
    }
}

/// RAII guard around the single-flight flag.
///
/// Released on drop, so the flag is cleared on every exit path of
/// [`SessionBootstrapper::submit`], including errors.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
