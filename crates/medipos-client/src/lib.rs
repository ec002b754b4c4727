//! # medipos-client: Inventory Ledger & Billing Engine
//!
//! The stateful half of MediPOS: in-memory projections of the remote record
//! store plus every operation that talks to it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MediPOS Data Flow                                │
//! │                                                                         │
//! │  Presentation layer (create bill, edit stock, ...)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  medipos-client (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Session    │    │InventoryLedger│    │BillingEngine │  │   │
//! │  │   │  (context)    │───►│ medicine cache│◄───│  bill cache  │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────┬───────┘  │   │
//! │  │                                │                    │          │   │
//! │  │                        ┌───────▼────────────────────▼───────┐  │   │
//! │  │                        │    RecordStore (trait seam)        │  │   │
//! │  │                        │    RestStore / test doubles        │  │   │
//! │  │                        └────────────────┬───────────────────┘  │   │
//! │  └─────────────────────────────────────────┼──────────────────────┘   │
//! │                                            ▼                           │
//! │                         Remote record store (authoritative)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`remote`] - The `RecordStore` adapter trait and error descriptor
//! - [`rest`] - HTTP implementation of the adapter (PostgREST dialect)
//! - [`ledger`] - Inventory ledger (medicine cache + CRUD)
//! - [`billing`] - Billing engine (bill cache + bill creation)
//! - [`loading`] - Load-state flags for the two fetch families
//! - [`notify`] - Notification sink trait (toast plumbing lives upstream)
//! - [`error`] - Client error types
//!
//! ## Concurrency Model
//! Operations are async tasks that suspend at remote store calls. The caches
//! are mutated only after those calls settle, under short-lived std mutexes,
//! so no lock is ever held across an await. There is NO cross-operation
//! isolation: two overlapping `create_bill` calls can read the same stale
//! stock value and both decrement from it (the classic lost-update anomaly).
//! Callers that care must serialize their own submissions.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod ledger;
pub mod loading;
pub mod notify;
pub mod remote;
pub mod rest;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::BillingEngine;
pub use error::{ClientError, ClientResult};
pub use ledger::InventoryLedger;
pub use loading::{FetchKind, LoadState};
pub use notify::{Notifier, TracingNotifier};
pub use remote::{collections, Direction, Order, RecordStore, RemoteError, RemoteResult};
pub use rest::{RestConfig, RestStore};

use std::sync::Arc;

// =============================================================================
// Session
// =============================================================================

/// The per-process context object: one ledger, one billing engine, one set of
/// load-state flags, all sharing a single remote store adapter and
/// notification sink.
///
/// There is deliberately no ambient global. Construct a `Session` once and
/// pass it (or its parts) to whoever needs it.
pub struct Session {
    load_state: Arc<LoadState>,
    ledger: Arc<InventoryLedger>,
    billing: BillingEngine,
}

impl Session {
    /// Wires a session from an adapter and a notification sink.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        let load_state = Arc::new(LoadState::new());
        let ledger = Arc::new(InventoryLedger::new(
            Arc::clone(&store),
            Arc::clone(&notifier),
            Arc::clone(&load_state),
        ));
        let billing = BillingEngine::new(store, notifier, Arc::clone(&load_state), Arc::clone(&ledger));

        Session {
            load_state,
            ledger,
            billing,
        }
    }

    /// Convenience constructor: REST adapter plus the tracing notification
    /// sink.
    pub fn with_rest(config: RestConfig) -> ClientResult<Self> {
        let store = RestStore::new(config)?;
        Ok(Session::new(Arc::new(store), Arc::new(TracingNotifier)))
    }

    /// The inventory ledger.
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    /// The billing engine.
    pub fn billing(&self) -> &BillingEngine {
        &self.billing
    }

    /// The load-state flags for both fetch families.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }
}
