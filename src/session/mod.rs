//! Session bootstrap module
//!
//! This module provides the post-login session machinery:
//! - Credential models and boundary validation
//! - The authentication endpoint client
//! - Token claims extraction and destination routing
//! - Session context, notification, and remembered-username contracts

pub mod bootstrap;
pub mod claims;
pub mod client;
pub mod context;
pub mod models;
pub mod notify;
pub mod remember;
pub mod routing;

pub use bootstrap::{SessionBootstrapper, SubmitOutcome};
pub use claims::{extract_claims, Claims, DecodedClaims};
pub use client::AuthClient;
pub use context::{SessionContext, SessionSink};
pub use models::{AuthToken, Credentials, LoginOutcome};
pub use notify::{Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use remember::{FileUsernameStore, UsernameStore};
pub use routing::{choose_destination, Destination};
