//! # Domain Types
//!
//! Core domain types used throughout MediPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │      Bill       │   │    BillItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  id (server)    │   │  medicine_id    │       │
//! │  │  name           │   │  items          │   │  medicine_name  │       │
//! │  │  price / stock  │   │  total_amount   │   │  quantity       │       │
//! │  │  expiry_date    │   │  final_amount   │   │  total_price    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Inputs: NewMedicine (add), MedicinePatch (partial update)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `BillItem` freezes the medicine name and unit price at the time of sale.
//! A bill is a historical record: later edits to the medicine never flow back
//! into existing bills.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Medicine
// =============================================================================

/// An inventory item held by the pharmacy.
///
/// `id`, `created_at` and `updated_at` are assigned by the remote store on
/// creation. `id` is immutable once assigned; `updated_at` advances on every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Unique identifier, assigned by the remote store.
    pub id: String,

    /// Display name shown in lists and on bills.
    pub name: String,

    /// Manufacturer, if known.
    pub manufacturer: Option<String>,

    /// Unit price (non-negative).
    pub price: f64,

    /// Units currently on hand.
    pub stock: i64,

    /// Calendar expiry date.
    pub expiry_date: NaiveDate,

    /// Category, if assigned.
    pub category: Option<String>,

    /// Free-text description.
    pub description: Option<String>,

    /// Free-text shelf location code (e.g. "A-12").
    pub shelf_number: Option<String>,

    /// When the record was created (server-assigned).
    pub created_at: DateTime<Utc>,

    /// When the record was last mutated (server-assigned).
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Checks whether this medicine has expired as of `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    /// Case-insensitive match over name, manufacturer, category and shelf
    /// number. This mirrors the search box on the inventory screen.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&query);

        hit(&self.name)
            || self.manufacturer.as_deref().is_some_and(&hit)
            || self.category.as_deref().is_some_and(&hit)
            || self.shelf_number.as_deref().is_some_and(&hit)
    }
}

/// Input for creating a medicine.
///
/// Everything a [`Medicine`] has except the server-assigned fields
/// (`id`, `created_at`, `updated_at`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub manufacturer: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
    pub shelf_number: Option<String>,
}

/// A partial update to a medicine.
///
/// Fields left as `None` are not touched on the remote record (partial-patch
/// semantics, not null-out semantics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicinePatch {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub shelf_number: Option<String>,
}

impl MedicinePatch {
    /// A patch that only adjusts the stock level.
    ///
    /// This is the patch the billing engine sends for each line item after a
    /// bill is persisted.
    pub fn stock(stock: i64) -> Self {
        MedicinePatch {
            stock: Some(stock),
            ..MedicinePatch::default()
        }
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == MedicinePatch::default()
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A completed sale transaction.
///
/// ## Invariants
/// - `final_amount == total_amount - discount` at creation time
/// - `items` keeps insertion order
/// - Immutable once created: there is no update or delete path for bills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Unique identifier, assigned by the remote store.
    pub id: String,

    /// Line items, in insertion order.
    pub items: Vec<BillItem>,

    /// Sum of the line item totals.
    pub total_amount: f64,

    /// Discount applied to the whole bill (non-negative, default 0).
    pub discount: f64,

    /// `total_amount - discount`.
    pub final_amount: f64,

    /// Customer name, if given.
    pub customer_name: Option<String>,

    /// Customer phone, if given.
    pub customer_phone: Option<String>,

    /// When the bill was created (server-assigned).
    pub date: DateTime<Utc>,
}

// =============================================================================
// Bill Item
// =============================================================================

/// One line of a bill.
/// Uses the snapshot pattern to freeze medicine data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Server-assigned id; `None` until persisted.
    pub id: Option<String>,

    /// Owning bill; `None` until persisted.
    pub bill_id: Option<String>,

    /// The medicine sold. A reference only: the item does not track later
    /// changes to that medicine.
    pub medicine_id: String,

    /// Medicine name at time of sale (frozen).
    pub medicine_name: String,

    /// Quantity sold (positive).
    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub price_per_unit: f64,

    /// Line total (quantity × price_per_unit, computed by the caller).
    pub total_price: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
