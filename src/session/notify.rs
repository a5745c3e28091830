//! User-facing notification contract
//!
//! The bootstrapper emits exactly one `(message, severity)` pair per
//! submission outcome. How the pair is presented (snackbar, terminal,
//! nothing at all) is the embedder's concern.

use std::fmt;
use std::sync::Mutex;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Sink for user-facing notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Default sink forwarding notifications to the tracing pipeline
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => tracing::info!(severity = %severity, "{}", message),
            Severity::Error => tracing::warn!(severity = %severity, "{}", message),
        }
    }
}

/// Sink that records every notification, for tests and embedders that
/// render asynchronously
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Severity)> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.events
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}
