//! # Notification Sink
//!
//! User-facing notification plumbing, modeled as a trait so the presentation
//! layer can plug its toast system in.
//!
//! ## Contract
//! Every failure path in the ledger and billing engine emits exactly one
//! notification (title + description) before propagating or swallowing the
//! error. No failure crashes the process.

use tracing::error;

/// Receives human-readable failure notifications.
pub trait Notifier: Send + Sync {
    /// Reports a failure with a short title and a descriptive message.
    fn error(&self, title: &str, description: &str);
}

/// Default sink: forwards notifications to `tracing` as error events.
///
/// Used when no UI toast system is wired in (headless operation, tests that
/// don't assert on notifications).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, title: &str, description: &str) {
        error!(title = %title, description = %description, "notification");
    }
}
