//! # REST Record Store
//!
//! [`RecordStore`] implementation over HTTP, speaking the PostgREST dialect
//! used by hosted record stores.
//!
//! ## Wire Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               RecordStore op            HTTP request                    │
//! │                                                                         │
//! │  select_all(c, order)        GET  {base}/c?select=*&order=f.asc        │
//! │  select_filtered(c, f, v)    GET  {base}/c?select=*&f=eq.v             │
//! │  select_by_id(c, id)         GET  {base}/c?select=*&id=eq.{id}         │
//! │                                   Accept: single-object                 │
//! │  insert(c, record)           POST {base}/c                              │
//! │                                   Prefer: return=representation         │
//! │  insert_many(c, records)     POST {base}/c   (JSON array body)          │
//! │  update(c, id, patch)        PATCH {base}/c?id=eq.{id}                  │
//! │  delete(c, id)               DELETE {base}/c?id=eq.{id}                 │
//! │                                                                         │
//! │  Every request carries apikey + bearer headers. Any transport error    │
//! │  or non-2xx status collapses into RemoteError.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No timeout is configured here beyond reqwest's defaults, and no retry
//! exists anywhere in this layer.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::remote::{Direction, Order, RecordStore, RemoteError, RemoteResult};

/// Media type that makes PostgREST return a single object instead of an
/// array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for the hosted record store.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the REST endpoint, e.g. `https://xyz.example.co/rest/v1`.
    pub base_url: String,

    /// API key, sent as both `apikey` header and bearer token.
    pub api_key: String,
}

impl RestConfig {
    /// Reads the configuration from `MEDIPOS_REMOTE_URL` and
    /// `MEDIPOS_API_KEY`.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("MEDIPOS_REMOTE_URL")
            .map_err(|_| ClientError::Config("MEDIPOS_REMOTE_URL is not set".to_string()))?;
        let api_key = std::env::var("MEDIPOS_API_KEY")
            .map_err(|_| ClientError::Config("MEDIPOS_API_KEY is not set".to_string()))?;
        Ok(RestConfig { base_url, api_key })
    }
}

// =============================================================================
// Store
// =============================================================================

/// HTTP-backed [`RecordStore`].
#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Builds a store from `config`.
    pub fn new(config: RestConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| ClientError::Config(err.to_string()))?;

        Ok(RestStore {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn request(&self, method: Method, collection: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, collection))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, builder: RequestBuilder) -> RemoteResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|err| RemoteError::new(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, body = %body, "remote store rejected request");
        Err(RemoteError::new(error_message(status.as_u16(), &body)))
    }

    async fn json(&self, builder: RequestBuilder) -> RemoteResult<Value> {
        self.send(builder)
            .await?
            .json::<Value>()
            .await
            .map_err(|err| RemoteError::new(err.to_string()))
    }
}

/// Extracts the `message` field from a PostgREST error body, falling back to
/// the raw body (or the bare status) when it isn't structured.
fn error_message(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => format!("remote store returned status {status}"),
        Err(_) => body.to_string(),
    }
}

/// Renders an order-by clause as a PostgREST `order` parameter.
fn order_param(order: &Order) -> String {
    let direction = match order.direction {
        Direction::Ascending => "asc",
        Direction::Descending => "desc",
    };
    format!("{}.{}", order.field, direction)
}

/// Renders a filter value as the literal inside `eq.{literal}`. Strings are
/// used verbatim; everything else takes its JSON rendering.
fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select_all(&self, collection: &str, order: Order) -> RemoteResult<Vec<Value>> {
        let param = order_param(&order);
        let request = self
            .request(Method::GET, collection)
            .query(&[("select", "*"), ("order", param.as_str())]);

        match self.json(request).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(RemoteError::new(format!(
                "expected an array of records, got: {other}"
            ))),
        }
    }

    async fn select_filtered(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<Value>> {
        let filter = format!("eq.{}", filter_literal(value));
        let request = self
            .request(Method::GET, collection)
            .query(&[("select", "*"), (field, filter.as_str())]);

        match self.json(request).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(RemoteError::new(format!(
                "expected an array of records, got: {other}"
            ))),
        }
    }

    async fn select_by_id(&self, collection: &str, id: &str) -> RemoteResult<Value> {
        let filter = format!("eq.{id}");
        let request = self
            .request(Method::GET, collection)
            .query(&[("select", "*"), ("id", filter.as_str())])
            .header(ACCEPT, SINGLE_OBJECT);

        self.json(request).await
    }

    async fn insert(&self, collection: &str, record: Value) -> RemoteResult<Value> {
        let request = self
            .request(Method::POST, collection)
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(&record);

        self.json(request).await
    }

    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> RemoteResult<()> {
        let request = self.request(Method::POST, collection).json(&records);
        self.send(request).await?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> RemoteResult<()> {
        let filter = format!("eq.{id}");
        let request = self
            .request(Method::PATCH, collection)
            .query(&[("id", filter.as_str())])
            .json(&patch);

        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> RemoteResult<()> {
        let filter = format!("eq.{id}");
        let request = self
            .request(Method::DELETE, collection)
            .query(&[("id", filter.as_str())]);

        self.send(request).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
