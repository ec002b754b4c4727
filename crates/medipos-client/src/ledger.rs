//! # Inventory Ledger
//!
//! Owns the authoritative in-memory collection of medicines and keeps it
//! synchronized with the remote store after every mutation.
//!
//! ## Read/Write Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ledger Operation Policy                             │
//! │                                                                         │
//! │  fetch_medicines   best-effort: remote error → notify, keep stale      │
//! │                    cache, return it. Never raises.                     │
//! │                                                                         │
//! │  add_medicine      insert-returning → append to cache → return.        │
//! │  update_medicine   patch → re-fetch row by id → replace in place.      │
//! │  delete_medicine   delete remote → remove from cache.                  │
//! │                    All three: notify + propagate on failure.           │
//! │                                                                         │
//! │  get_medicine      cache only, synchronous, never hits the remote.     │
//! │  search            cache only, case-insensitive field match.           │
//! │                                                                         │
//! │  The cache is a projection, not a source of truth: fetch replaces it   │
//! │  wholesale (no merge).                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! The cache lives behind a `std::sync::Mutex` that is only ever held for
//! short, non-async sections. Remote calls complete first; the lock is taken
//! afterwards to apply the result.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ClientResult;
use crate::loading::{FetchKind, LoadState};
use crate::notify::Notifier;
use crate::remote::{collections, Order, RecordStore};
use medipos_core::{
    validate_new_medicine, Medicine, MedicinePatch, MedicinePatchRow, MedicineRow, NewMedicine,
    NewMedicineRow,
};

/// The in-memory projection of the `medicines` collection.
pub struct InventoryLedger {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    load_state: Arc<LoadState>,
    medicines: Mutex<Vec<Medicine>>,
}

impl InventoryLedger {
    /// Creates a ledger with an empty cache.
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        load_state: Arc<LoadState>,
    ) -> Self {
        InventoryLedger {
            store,
            notifier,
            load_state,
            medicines: Mutex::new(Vec::new()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches all medicines from the remote store, ordered by name
    /// ascending, and replaces the cache wholesale.
    ///
    /// Best-effort: on any failure this notifies, leaves the cache unchanged
    /// and returns the existing (stale) collection. Fetch failure is
    /// non-fatal and never raises to the caller.
    pub async fn fetch_medicines(&self) -> Vec<Medicine> {
        debug!("fetching medicines");
        self.load_state.begin(FetchKind::Medicines);
        let result = self.load_all().await;
        self.load_state.finish(FetchKind::Medicines);

        match result {
            Ok(medicines) => {
                debug!(count = medicines.len(), "medicines fetched");
                *self.cache() = medicines.clone();
                medicines
            }
            Err(err) => {
                warn!(error = %err, "fetch medicines failed, keeping stale cache");
                self.notifier
                    .error("Error fetching medicines", &err.to_string());
                self.medicines()
            }
        }
    }

    /// Synchronous cache lookup. Never touches the remote store.
    pub fn get_medicine(&self, id: &str) -> Option<Medicine> {
        self.cache().iter().find(|m| m.id == id).cloned()
    }

    /// Case-insensitive cache search over name, manufacturer, category and
    /// shelf number.
    pub fn search(&self, query: &str) -> Vec<Medicine> {
        self.cache()
            .iter()
            .filter(|m| m.matches(query))
            .cloned()
            .collect()
    }

    /// A snapshot of the current cache, in last-fetch order.
    pub fn medicines(&self) -> Vec<Medicine> {
        self.cache().clone()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a medicine and returns it with its server-assigned id and
    /// timestamps. Fatal on failure: notifies, then propagates.
    pub async fn add_medicine(&self, medicine: NewMedicine) -> ClientResult<Medicine> {
        debug!(name = %medicine.name, "adding medicine");
        validate_new_medicine(&medicine)?;

        let payload = serde_json::to_value(NewMedicineRow::from(&medicine))?;
        let inserted = match self.store.insert(collections::MEDICINES, payload).await {
            Ok(value) => value,
            Err(err) => {
                self.notifier.error("Error adding medicine", &err.message);
                return Err(err.into());
            }
        };
        let medicine = match serde_json::from_value::<MedicineRow>(inserted) {
            Ok(row) => Medicine::from(row),
            Err(err) => {
                self.notifier
                    .error("Error adding medicine", &err.to_string());
                return Err(err.into());
            }
        };

        // Appended, not re-sorted: name order is restored on the next fetch
        self.cache().push(medicine.clone());
        info!(id = %medicine.id, name = %medicine.name, "medicine added");
        Ok(medicine)
    }

    /// Applies a partial patch to a medicine, then re-fetches that record for
    /// the authoritative post-update state and replaces the cache entry in
    /// place (position preserved). Notifies and propagates on any failure.
    ///
    /// The patch always bumps `updated_at`, even when no other field changed.
    pub async fn update_medicine(&self, id: &str, patch: MedicinePatch) -> ClientResult<()> {
        debug!(id = %id, "updating medicine");
        let payload = serde_json::to_value(MedicinePatchRow::new(&patch))?;

        if let Err(err) = self.store.update(collections::MEDICINES, id, payload).await {
            self.notifier.error("Error updating medicine", &err.message);
            return Err(err.into());
        }

        let fresh = match self.store.select_by_id(collections::MEDICINES, id).await {
            Ok(value) => value,
            Err(err) => {
                self.notifier.error("Error updating medicine", &err.message);
                return Err(err.into());
            }
        };
        let updated = match serde_json::from_value::<MedicineRow>(fresh) {
            Ok(row) => Medicine::from(row),
            Err(err) => {
                self.notifier
                    .error("Error updating medicine", &err.to_string());
                return Err(err.into());
            }
        };

        let mut medicines = self.cache();
        if let Some(slot) = medicines.iter_mut().find(|m| m.id == id) {
            *slot = updated;
        }
        drop(medicines);

        info!(id = %id, "medicine updated");
        Ok(())
    }

    /// Deletes a medicine remotely, then removes it from the cache. The cache
    /// is untouched if the remote delete fails.
    pub async fn delete_medicine(&self, id: &str) -> ClientResult<()> {
        debug!(id = %id, "deleting medicine");

        if let Err(err) = self.store.delete(collections::MEDICINES, id).await {
            self.notifier.error("Error deleting medicine", &err.message);
            return Err(err.into());
        }

        self.cache().retain(|m| m.id != id);
        info!(id = %id, "medicine deleted");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load_all(&self) -> ClientResult<Vec<Medicine>> {
        let rows = self
            .store
            .select_all(collections::MEDICINES, Order::asc("name"))
            .await?;

        rows.into_iter()
            .map(|row: Value| {
                Ok(Medicine::from(serde_json::from_value::<MedicineRow>(row)?))
            })
            .collect()
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Vec<Medicine>> {
        self.medicines.lock().expect("medicine cache mutex poisoned")
    }
}
