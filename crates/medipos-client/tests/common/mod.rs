//! Shared test doubles and fixtures for the integration suite.
//!
//! `InMemoryStore` is a `RecordStore` over plain JSON collections with the
//! same server-assigned-field behavior as the real remote store (ids and
//! timestamps stamped on insert) plus per-operation failure injection.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use medipos_client::{
    Direction, Notifier, Order, RecordStore, RemoteError, RemoteResult, Session,
};
use medipos_core::BillItem;

// =============================================================================
// In-Memory Record Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failing_ops: Mutex<HashSet<String>>,
    corrupting_ops: Mutex<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// Replaces the contents of `collection`.
    pub fn seed(&self, collection: &str, rows: Vec<Value>) {
        self.collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), rows);
    }

    /// Makes every future call of `op` fail with a remote error. Ops are
    /// named after the trait methods ("select_all", "insert_many", ...).
    pub fn fail_on(&self, op: &str) {
        self.failing_ops.lock().unwrap().insert(op.to_string());
    }

    /// Clears a previously injected failure.
    pub fn heal(&self, op: &str) {
        self.failing_ops.lock().unwrap().remove(op);
    }

    /// Makes every future call of `op` succeed but answer with a record that
    /// does not decode into any row shape. The operation's side effects still
    /// happen, mirroring a store that applied the write but returned a
    /// mangled response.
    pub fn corrupt_on(&self, op: &str) {
        self.corrupting_ops.lock().unwrap().insert(op.to_string());
    }

    fn corrupted(&self, op: &str) -> bool {
        self.corrupting_ops.lock().unwrap().contains(op)
    }

    /// Snapshot of a collection, for assertions.
    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self, op: &str) -> RemoteResult<()> {
        if self.failing_ops.lock().unwrap().contains(op) {
            return Err(RemoteError::new(format!("injected failure: {op}")));
        }
        Ok(())
    }

    /// Server-assigned fields, mirroring the real store's defaults.
    fn stamp(collection: &str, record: &mut Value) {
        let now = Utc::now().to_rfc3339();
        let object = record.as_object_mut().expect("record must be a JSON object");

        object
            .entry("id")
            .or_insert_with(|| json!(Uuid::new_v4().to_string()));
        match collection {
            "medicines" => {
                object.entry("created_at").or_insert_with(|| json!(now));
                object.entry("updated_at").or_insert_with(|| json!(now));
            }
            "bills" => {
                object.entry("date").or_insert_with(|| json!(now));
            }
            _ => {}
        }
    }
}

fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select_all(&self, collection: &str, order: Order) -> RemoteResult<Vec<Value>> {
        self.check("select_all")?;
        let mut rows = self.rows(collection);
        rows.sort_by(|a, b| {
            let ordering = compare(&a[&order.field], &b[&order.field]);
            match order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        Ok(rows)
    }

    async fn select_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<Value>> {
        self.check("select_filtered")?;
        Ok(self
            .rows(collection)
            .into_iter()
            .filter(|row| &row[field] == value)
            .collect())
    }

    async fn select_by_id(&self, collection: &str, id: &str) -> RemoteResult<Value> {
        self.check("select_by_id")?;
        if self.corrupted("select_by_id") {
            return Ok(json!({"garbage": true}));
        }
        self.rows(collection)
            .into_iter()
            .find(|row| row["id"] == json!(id))
            .ok_or_else(|| RemoteError::new(format!("no record with id {id}")))
    }

    async fn insert(&self, collection: &str, mut record: Value) -> RemoteResult<Value> {
        self.check("insert")?;
        Self::stamp(collection, &mut record);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        if self.corrupted("insert") {
            return Ok(json!({"garbage": true}));
        }
        Ok(record)
    }

    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> RemoteResult<()> {
        self.check("insert_many")?;
        let mut guard = self.collections.lock().unwrap();
        let rows = guard.entry(collection.to_string()).or_default();
        for mut record in records {
            Self::stamp(collection, &mut record);
            rows.push(record);
        }
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> RemoteResult<()> {
        self.check("update")?;
        let mut guard = self.collections.lock().unwrap();
        let rows = guard
            .get_mut(collection)
            .ok_or_else(|| RemoteError::new(format!("no collection {collection}")))?;
        let row = rows
            .iter_mut()
            .find(|row| row["id"] == json!(id))
            .ok_or_else(|| RemoteError::new(format!("no record with id {id}")))?;

        let target = row.as_object_mut().expect("record must be a JSON object");
        for (key, value) in patch.as_object().expect("patch must be a JSON object") {
            target.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> RemoteResult<()> {
        self.check("delete")?;
        let mut guard = self.collections.lock().unwrap();
        let rows = guard
            .get_mut(collection)
            .ok_or_else(|| RemoteError::new(format!("no collection {collection}")))?;
        let before = rows.len();
        rows.retain(|row| row["id"] != json!(id));
        if rows.len() == before {
            return Err(RemoteError::new(format!("no record with id {id}")));
        }
        Ok(())
    }
}

// =============================================================================
// Collecting Notifier
// =============================================================================

/// Records every notification for later assertions.
#[derive(Default)]
pub struct CollectingNotifier {
    events: Mutex<Vec<(String, String)>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        CollectingNotifier::default()
    }

    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.events().into_iter().map(|(title, _)| title).collect()
    }
}

impl Notifier for CollectingNotifier {
    fn error(&self, title: &str, description: &str) {
        self.events
            .lock()
            .unwrap()
            .push((title.to_string(), description.to_string()));
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A full medicines row as the remote store would return it.
pub fn medicine_row(id: &str, name: &str, price: f64, stock: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "manufacturer": null,
        "price": price,
        "stock": stock,
        "expiry_date": "2027-01-31",
        "category": null,
        "description": null,
        "shelf_number": null,
        "created_at": "2020-01-01T00:00:00Z",
        "updated_at": "2020-01-01T00:00:00Z",
    })
}

/// An unpersisted bill line item, totals computed the way the form does it.
pub fn bill_item(medicine_id: &str, medicine_name: &str, quantity: i64, price: f64) -> BillItem {
    BillItem {
        id: None,
        bill_id: None,
        medicine_id: medicine_id.to_string(),
        medicine_name: medicine_name.to_string(),
        quantity,
        price_per_unit: price,
        total_price: price * quantity as f64,
    }
}

/// Opt-in tracing for debugging test failures: `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Wires a session over the given doubles.
pub fn session(store: &Arc<InMemoryStore>, notifier: &Arc<CollectingNotifier>) -> Session {
    let store: Arc<dyn RecordStore> = Arc::clone(store) as Arc<dyn RecordStore>;
    let notifier: Arc<dyn Notifier> = Arc::clone(notifier) as Arc<dyn Notifier>;
    Session::new(store, notifier)
}
