//! # Load-State Tracker
//!
//! Tracks in-flight fetch operations so consumers can render loading
//! indicators.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Loading Flag Lifecycle                             │
//! │                                                                         │
//! │  fetch starts ──► begin(kind) ──► flag = true                          │
//! │  fetch ends   ──► finish(kind) ──► flag = false                        │
//! │                   (on BOTH success and failure paths)                  │
//! │                                                                         │
//! │  The two families are independent: a medicines fetch never touches     │
//! │  the bills flag.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// The fetch families the tracker distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Medicines,
    Bills,
}

/// Two independent loading flags, one per fetch family.
#[derive(Debug, Default)]
pub struct LoadState {
    medicines: AtomicBool,
    bills: AtomicBool,
}

impl LoadState {
    pub fn new() -> Self {
        LoadState::default()
    }

    fn flag(&self, kind: FetchKind) -> &AtomicBool {
        match kind {
            FetchKind::Medicines => &self.medicines,
            FetchKind::Bills => &self.bills,
        }
    }

    /// Marks a fetch of `kind` as in flight.
    pub fn begin(&self, kind: FetchKind) {
        self.flag(kind).store(true, Ordering::SeqCst);
    }

    /// Marks the fetch of `kind` as settled.
    pub fn finish(&self, kind: FetchKind) {
        self.flag(kind).store(false, Ordering::SeqCst);
    }

    /// Whether a fetch of `kind` is currently in flight.
    pub fn is_loading(&self, kind: FetchKind) -> bool {
        self.flag(kind).load(Ordering::SeqCst)
    }
}
