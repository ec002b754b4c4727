//! # Client Error Types
//!
//! Error types for operations against the remote record store.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Adapter failure (RemoteError)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← uniform failure signal                    │
//! │       │                                                                 │
//! │       ├── fetch paths:    notified, swallowed, stale cache returned    │
//! │       └── mutation paths: notified, propagated to the caller           │
//! │                                                                         │
//! │  No retry policy exists anywhere: a failed write is re-issued by       │
//! │  the caller or not at all.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::remote::RemoteError;
use medipos_core::ValidationError;

/// Errors surfaced by ledger and billing operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote store reported a failure. Any non-success from the adapter
    /// collapses into this uniform signal.
    #[error("remote store error: {0}")]
    Remote(#[from] RemoteError),

    /// Caller input was rejected before any remote traffic happened.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A record payload did not match the expected persisted shape.
    #[error("malformed record: {0}")]
    Decode(#[from] serde_json::Error),

    /// Adapter configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message() {
        let err = ClientError::from(RemoteError::new("row level security violation"));
        assert_eq!(
            err.to_string(),
            "remote store error: row level security violation"
        );
    }

    #[test]
    fn test_validation_converts_to_client_error() {
        let err: ClientError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
