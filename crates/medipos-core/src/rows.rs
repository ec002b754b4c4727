//! # Record Mapper
//!
//! Storage-facing row shapes and the pure conversions between them and the
//! client-facing domain types.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Client Shape ⇄ Persisted Shape                      │
//! │                                                                         │
//! │  Medicine { shelf_number, .. }      MedicineRow { shelf_number, .. }   │
//! │       camelCase JSON          ⇄          snake_case JSON               │
//! │                                                                         │
//! │  Reads:   MedicineRow ──From──► Medicine          (rename only)        │
//! │  Inserts: NewMedicine ──From──► NewMedicineRow    (no server fields)   │
//! │  Patches: MedicinePatch ──new──► MedicinePatchRow (absent = omitted,   │
//! │                                  updated_at always stamped fresh)      │
//! │                                                                         │
//! │  Bills:   BillRow + Vec<BillItem> ──from_parts──► Bill                 │
//! │           (line items live in their own collection, so the caller      │
//! │            fetches them before assembling the client Bill)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! Every conversion here is deterministic, total over the declared attribute
//! sets, and never fails for well-formed input. No validation, no defaulting.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Bill, BillItem, Medicine, MedicinePatch, NewMedicine};

// =============================================================================
// Medicine Rows
// =============================================================================

/// The persisted shape of a medicine record (`medicines` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shelf_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MedicineRow> for Medicine {
    fn from(row: MedicineRow) -> Self {
        Medicine {
            id: row.id,
            name: row.name,
            manufacturer: row.manufacturer,
            price: row.price,
            stock: row.stock,
            expiry_date: row.expiry_date,
            category: row.category,
            description: row.description,
            shelf_number: row.shelf_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for a new medicine.
///
/// Carries no `id` and no timestamps: those are server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicineRow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_number: Option<String>,
}

impl From<&NewMedicine> for NewMedicineRow {
    fn from(medicine: &NewMedicine) -> Self {
        NewMedicineRow {
            name: medicine.name.clone(),
            manufacturer: medicine.manufacturer.clone(),
            price: medicine.price,
            stock: medicine.stock,
            expiry_date: medicine.expiry_date,
            category: medicine.category.clone(),
            description: medicine.description.clone(),
            shelf_number: medicine.shelf_number.clone(),
        }
    }
}

/// Partial-update payload for a medicine.
///
/// ## Partial-Patch Semantics
/// Fields that are `None` are omitted from the serialized JSON entirely, so
/// the remote store leaves them untouched. `updated_at` is always present and
/// stamped with the current time, whether or not any other field changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicinePatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_number: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl MedicinePatchRow {
    /// Maps a client patch to its persisted shape, stamping a fresh
    /// `updated_at`.
    pub fn new(patch: &MedicinePatch) -> Self {
        MedicinePatchRow {
            name: patch.name.clone(),
            manufacturer: patch.manufacturer.clone(),
            price: patch.price,
            stock: patch.stock,
            expiry_date: patch.expiry_date,
            category: patch.category.clone(),
            description: patch.description.clone(),
            shelf_number: patch.shelf_number.clone(),
            updated_at: Utc::now(),
        }
    }
}

// =============================================================================
// Bill Rows
// =============================================================================

/// The persisted shape of a bill record (`bills` collection).
///
/// Line items are NOT embedded here; they live in the `bill_items` collection
/// keyed by `bill_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRow {
    pub id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub date: DateTime<Utc>,
    pub total_amount: f64,
    #[serde(default)]
    pub discount: f64,
    pub final_amount: f64,
}

impl Bill {
    /// Assembles a client bill from its persisted row and its already-fetched
    /// line items. Pure: the item fetch is the caller's business.
    pub fn from_parts(row: BillRow, items: Vec<BillItem>) -> Self {
        Bill {
            id: row.id,
            items,
            total_amount: row.total_amount,
            discount: row.discount,
            final_amount: row.final_amount,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            date: row.date,
        }
    }
}

/// Insert payload for a new bill. `id` and `date` are server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBillRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub total_amount: f64,
    pub discount: f64,
    pub final_amount: f64,
}

// =============================================================================
// Bill Item Rows
// =============================================================================

/// The persisted shape of a bill line item (`bill_items` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItemRow {
    pub id: String,
    pub bill_id: String,
    pub medicine_id: String,
    pub medicine_name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
    pub total_price: f64,
}

impl From<BillItemRow> for BillItem {
    fn from(row: BillItemRow) -> Self {
        BillItem {
            id: Some(row.id),
            bill_id: Some(row.bill_id),
            medicine_id: row.medicine_id,
            medicine_name: row.medicine_name,
            quantity: row.quantity,
            price_per_unit: row.price_per_unit,
            total_price: row.total_price,
        }
    }
}

/// Insert payload for a bill line item, tagged with its owning bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBillItemRow {
    pub bill_id: String,
    pub medicine_id: String,
    pub medicine_name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
    pub total_price: f64,
}

impl NewBillItemRow {
    /// Builds the insert payload for `item`, owned by bill `bill_id`.
    pub fn new(bill_id: &str, item: &BillItem) -> Self {
        NewBillItemRow {
            bill_id: bill_id.to_string(),
            medicine_id: item.medicine_id.clone(),
            medicine_name: item.medicine_name.clone(),
            quantity: item.quantity,
            price_per_unit: item.price_per_unit,
            total_price: item.total_price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
