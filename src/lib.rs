//! Portal Session Client
//!
//! Client-side session bootstrap for the health-declaration portal:
//! authenticates raw credentials against the portal's login endpoint,
//! stores the resulting token for later authenticated calls, reads the
//! identity/role claims out of the token, and decides which view the user
//! lands on.

pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Config, Logger, PortalError, Result};
pub use session::{
    AuthClient, Credentials, Destination, SessionBootstrapper, SessionContext, SubmitOutcome,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
