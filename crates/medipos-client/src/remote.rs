//! # Remote Store Adapter
//!
//! The boundary the core depends on: named-collection CRUD against a remote
//! persistence service.
//!
//! ## Adapter Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RecordStore Operations                             │
//! │                                                                         │
//! │  select_all(collection, order)        ──► Vec<record>                  │
//! │  select_filtered(collection, f, v)    ──► Vec<record>                  │
//! │  select_by_id(collection, id)         ──► record                       │
//! │  insert(collection, record)           ──► inserted record              │
//! │                                           (with server-assigned id,    │
//! │                                            timestamps)                 │
//! │  insert_many(collection, records)     ──► ()                           │
//! │  update(collection, id, patch)        ──► ()                           │
//! │  delete(collection, id)               ──► ()                           │
//! │                                                                         │
//! │  Records are plain JSON objects; typed row shapes live in              │
//! │  medipos-core and are decoded at the call site.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation returns either a payload or a [`RemoteError`]; the core
//! treats any non-success as a uniform failure signal. Timeouts and
//! authentication are the adapter implementation's concern, not the core's.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Collections
// =============================================================================

/// The named collections the client works with.
pub mod collections {
    pub const MEDICINES: &str = "medicines";
    pub const BILLS: &str = "bills";
    pub const BILL_ITEMS: &str = "bill_items";
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort direction for `select_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// An order-by clause: field plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    /// Ascending order on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Order {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    /// Descending order on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Order {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

// =============================================================================
// Remote Error
// =============================================================================

/// The structured error descriptor returned by a failed adapter operation.
///
/// Carries a human-readable message; that message is what ends up in the
/// user-facing notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        RemoteError {
            message: message.into(),
        }
    }
}

/// Result type for adapter operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

// =============================================================================
// Record Store Trait
// =============================================================================

/// Named-collection CRUD against the remote persistence service.
///
/// Implementations must be `Send + Sync`: the ledger and billing engine share
/// one adapter behind an `Arc`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record of `collection`, sorted by `order`.
    async fn select_all(&self, collection: &str, order: Order) -> RemoteResult<Vec<Value>>;

    /// Returns the records of `collection` whose `field` equals `value`.
    async fn select_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<Value>>;

    /// Returns the single record of `collection` with the given id.
    async fn select_by_id(&self, collection: &str, id: &str) -> RemoteResult<Value>;

    /// Inserts one record and returns the inserted row, including
    /// server-assigned fields (id, timestamps).
    async fn insert(&self, collection: &str, record: Value) -> RemoteResult<Value>;

    /// Inserts a batch of records in one operation.
    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> RemoteResult<()>;

    /// Applies a partial patch to the record with the given id.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> RemoteResult<()>;

    /// Deletes the record with the given id.
    async fn delete(&self, collection: &str, id: &str) -> RemoteResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_constructors() {
        let order = Order::asc("name");
        assert_eq!(order.field, "name");
        assert_eq!(order.direction, Direction::Ascending);

        let order = Order::desc("date");
        assert_eq!(order.field, "date");
        assert_eq!(order.direction, Direction::Descending);
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::new("duplicate key value");
        assert_eq!(err.to_string(), "duplicate key value");
    }
}
