//! # Billing Engine
//!
//! Owns the in-memory collection of bills, computes totals, and drives the
//! multi-step bill-creation operation.
//!
//! ## create_bill Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Bill Creation (best-effort, no txn)                   │
//! │                                                                         │
//! │  1. total_amount = Σ item.total_price   (caller totals are trusted)   │
//! │  2. final_amount = total_amount − discount                             │
//! │  3. insert bill row        ── failure aborts everything                │
//! │  4. insert item rows       ── failure leaves an ORPHANED bill row      │
//! │  5. for each item, IN ORDER, one at a time:                            │
//! │       ledger cache hit?  ── no  → skip decrement silently              │
//! │       update stock       ── failure aborts remaining items AND the     │
//! │                             call, bill + items stay persisted          │
//! │  6. build the Bill from local totals, prepend to the bills cache       │
//! │                                                                         │
//! │  There is no compensating transaction and no retry: a partial failure  │
//! │  leaves the remote store inconsistent by design, and the caller        │
//! │  decides what to do about it.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No stock pre-check and no floor clamp happen here; ensuring sufficient
//! stock before calling is the caller's responsibility.

use std::sync::{Arc, Mutex};

use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ClientResult;
use crate::ledger::InventoryLedger;
use crate::loading::{FetchKind, LoadState};
use crate::notify::Notifier;
use crate::remote::{collections, Order, RecordStore};
use medipos_core::{
    validate_bill_input, Bill, BillItem, BillItemRow, BillRow, MedicinePatch, NewBillItemRow,
    NewBillRow,
};

/// The in-memory projection of the `bills` collection, most recent first.
pub struct BillingEngine {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    load_state: Arc<LoadState>,
    ledger: Arc<InventoryLedger>,
    bills: Mutex<Vec<Bill>>,
}

impl BillingEngine {
    /// Creates a billing engine with an empty cache.
    ///
    /// The engine shares the inventory ledger so bill creation can read
    /// current stock and write decrements through it.
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        load_state: Arc<LoadState>,
        ledger: Arc<InventoryLedger>,
    ) -> Self {
        BillingEngine {
            store,
            notifier,
            load_state,
            ledger,
            bills: Mutex::new(Vec::new()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches all bills ordered by date descending and materializes each one
    /// by additionally fetching its line items (one sub-fetch per bill,
    /// issued concurrently; all must succeed).
    ///
    /// Best-effort like [`InventoryLedger::fetch_medicines`]: any failure,
    /// including a single line-item sub-fetch, fails the whole load. The
    /// cache is then left unchanged, the failure is notified, and the stale
    /// collection is returned.
    pub async fn fetch_bills(&self) -> Vec<Bill> {
        debug!("fetching bills");
        self.load_state.begin(FetchKind::Bills);
        let result = self.load_all().await;
        self.load_state.finish(FetchKind::Bills);

        match result {
            Ok(bills) => {
                debug!(count = bills.len(), "bills fetched");
                *self.cache() = bills.clone();
                bills
            }
            Err(err) => {
                warn!(error = %err, "fetch bills failed, keeping stale cache");
                self.notifier.error("Error fetching bills", &err.to_string());
                self.bills()
            }
        }
    }

    /// A snapshot of the current cache, most recent first.
    pub fn bills(&self) -> Vec<Bill> {
        self.cache().clone()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a bill for `items` plus its line-item records, then decrements
    /// stock through the inventory ledger, sequentially and in input order.
    ///
    /// Line items whose medicine is not in the ledger cache are skipped for
    /// the stock decrement (the bill itself is unaffected). See the module
    /// docs for the exact failure semantics of each step.
    pub async fn create_bill(
        &self,
        items: Vec<BillItem>,
        customer_name: Option<String>,
        customer_phone: Option<String>,
        discount: f64,
    ) -> ClientResult<Bill> {
        debug!(items = items.len(), discount = %discount, "creating bill");
        validate_bill_input(&items, discount)?;

        // Caller-supplied line totals are trusted, not recomputed
        let total_amount: f64 = items.iter().map(|item| item.total_price).sum();
        let final_amount = total_amount - discount;

        // Step 3: the bill record itself. Failure here aborts the whole
        // operation with nothing persisted.
        let payload = serde_json::to_value(NewBillRow {
            customer_name: customer_name.clone(),
            customer_phone: customer_phone.clone(),
            total_amount,
            discount,
            final_amount,
        })?;
        let inserted = match self.store.insert(collections::BILLS, payload).await {
            Ok(value) => value,
            Err(err) => {
                self.notifier.error("Error creating bill", &err.message);
                return Err(err.into());
            }
        };
        // The insert already succeeded at this point: a malformed response
        // leaves the bill row persisted even though the call fails.
        let bill_row: BillRow = match serde_json::from_value(inserted) {
            Ok(row) => row,
            Err(err) => {
                self.notifier.error("Error creating bill", &err.to_string());
                return Err(err.into());
            }
        };

        // Step 4: the line items, one batch insert. Failure leaves the bill
        // row from step 3 persisted and orphaned.
        let item_rows = items
            .iter()
            .map(|item| Ok(serde_json::to_value(NewBillItemRow::new(&bill_row.id, item))?))
            .collect::<ClientResult<Vec<Value>>>()?;
        if let Err(err) = self.store.insert_many(collections::BILL_ITEMS, item_rows).await {
            self.notifier.error("Error creating bill items", &err.message);
            return Err(err.into());
        }

        // Step 5: stock decrements, strictly one at a time in input order. A
        // cache miss skips that item; an update failure aborts the rest of
        // the loop and the call, with bill and items already persisted.
        for item in &items {
            let Some(medicine) = self.ledger.get_medicine(&item.medicine_id) else {
                warn!(
                    medicine_id = %item.medicine_id,
                    "medicine not in ledger cache, skipping stock decrement"
                );
                continue;
            };
            self.ledger
                .update_medicine(
                    &medicine.id,
                    MedicinePatch::stock(medicine.stock - item.quantity),
                )
                .await?;
        }

        // Step 6: the in-memory bill, built from the locally computed totals
        // rather than re-read from the store.
        let bill = Bill {
            id: bill_row.id.clone(),
            items: items
                .into_iter()
                .map(|mut item| {
                    item.bill_id = Some(bill_row.id.clone());
                    item
                })
                .collect(),
            total_amount,
            discount,
            final_amount,
            customer_name,
            customer_phone,
            date: bill_row.date,
        };

        self.cache().insert(0, bill.clone());
        info!(
            id = %bill.id,
            total = %bill.total_amount,
            items = bill.items.len(),
            "bill created"
        );
        Ok(bill)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load_all(&self) -> ClientResult<Vec<Bill>> {
        let rows = self
            .store
            .select_all(collections::BILLS, Order::desc("date"))
            .await?;
        let bill_rows = rows
            .into_iter()
            .map(|row| Ok(serde_json::from_value::<BillRow>(row)?))
            .collect::<ClientResult<Vec<BillRow>>>()?;

        // One line-item sub-fetch per bill, all in flight at once; the load
        // only completes once every one of them has resolved
        try_join_all(bill_rows.into_iter().map(|row| self.materialize(row))).await
    }

    async fn materialize(&self, row: BillRow) -> ClientResult<Bill> {
        let item_values = self
            .store
            .select_filtered(
                collections::BILL_ITEMS,
                "bill_id",
                &Value::String(row.id.clone()),
            )
            .await?;
        let items = item_values
            .into_iter()
            .map(|value| Ok(BillItem::from(serde_json::from_value::<BillItemRow>(value)?)))
            .collect::<ClientResult<Vec<BillItem>>>()?;

        Ok(Bill::from_parts(row, items))
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Vec<Bill>> {
        self.bills.lock().expect("bill cache mutex poisoned")
    }
}
