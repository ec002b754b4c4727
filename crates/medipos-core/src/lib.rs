//! # medipos-core: Pure Domain Logic for MediPOS
//!
//! This crate is the **heart** of MediPOS. It contains the domain types and
//! the record mapper as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MediPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation Layer                           │   │
//! │  │    Inventory UI ──► Billing UI ──► Reports UI                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    medipos-client                               │   │
//! │  │    InventoryLedger, BillingEngine, RecordStore adapter         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medipos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   rows    │  │validation │  │   error   │  │   │
//! │  │   │ Medicine  │  │ Row shapes│  │   rules   │  │Validation │  │   │
//! │  │   │ Bill/Item │  │ mappings  │  │  checks   │  │  Error    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Bill, BillItem, patch/input shapes)
//! - [`rows`] - Persisted row shapes and the pure record mapper
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation for the write paths
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every conversion is deterministic
//! 2. **No I/O**: network and file system access is FORBIDDEN here
//! 3. **Optional means optional**: absent attributes are `Option`, never
//!    sentinel values
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod rows;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use rows::{
    BillItemRow, BillRow, MedicinePatchRow, MedicineRow, NewBillItemRow, NewBillRow,
    NewMedicineRow,
};
pub use types::{Bill, BillItem, Medicine, MedicinePatch, NewMedicine};
pub use validation::{validate_bill_input, validate_new_medicine};
