//! Ambient infrastructure for the client
//!
//! This module provides:
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CliArgs, CliCommand, Config};
pub use error::{PortalError, Result};
pub use logging::Logger;
