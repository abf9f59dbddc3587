//! # In-memory JSON backend
//!
//! [`MemoryBackend`] is a [`Transport`] that answers requests from named
//! in-memory collections with the same conventions as the REST backend:
//!
//! | Request | Behaviour |
//! |---------|-----------|
//! | `GET /c` | Every record, narrowed by each `?field=value` pair (exact match on the normalised scalar text, so `5` matches `"5"`). |
//! | `GET /c/:id` | The record, or `404`. |
//! | `POST /c` | Stores the body, assigning the next numeric `id` when absent. `201`. |
//! | `PUT /c/:id` | Replaces the record, keeping its id, or `404`. |
//! | `DELETE /c/:id` | Removes the record, or `404`. |
//!
//! Unknown collections answer `404`. It counts requests so tests can prove
//! that validation failures never reach the network, and [`MemoryBackend::fail_path`]
//! injects `500`s for a given path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// Collections the recipe backend exposes.
pub const COLLECTIONS: [&str; 5] = ["recipes", "categories", "favorites", "mealPlans", "users"];

#[derive(Debug, Default)]
struct BackendState {
    collections: HashMap<String, Vec<Value>>,
    served: usize,
    failing: Vec<String>,
}

/// In-memory backend for tests and offline use. Clones share state.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// A backend with the standard, empty collections.
    pub fn new() -> Self {
        let mut state = BackendState::default();
        for name in COLLECTIONS {
            state.collections.insert(name.to_string(), Vec::new());
        }
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a raw record, assigning an id if it has none. Returns the stored record.
    pub fn seed(&self, collection: &str, record: Value) -> Value {
        let mut state = self.state();
        let records = state.collections.entry(collection.to_string()).or_default();
        let record = with_id(record, records.as_slice());
        records.push(record.clone());
        record
    }

    /// Current contents of a collection.
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.state()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.state().served
    }

    /// Answer `500` for `path` and anything below it.
    pub fn fail_path(&self, path: &str) {
        self.state().failing.push(path.trim_end_matches('/').to_string());
    }

    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state();
        state.served += 1;

        let failing = state.failing.iter().any(|p| {
            request.path == *p || request.path.starts_with(&format!("{p}/"))
        });
        if failing {
            return respond(500, json!({ "error": "injected failure" }));
        }

        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let (name, id) = match segments.as_slice() {
            [name] => (*name, None),
            [name, id] => (*name, Some(*id)),
            _ => return not_found(),
        };
        let Some(records) = state.collections.get_mut(name) else {
            return not_found();
        };

        match (request.method, id) {
            (Method::Get, None) => {
                let matching: Vec<Value> = records
                    .iter()
                    .filter(|r| {
                        request
                            .query
                            .iter()
                            .all(|(field, value)| field_matches(r, field, value))
                    })
                    .cloned()
                    .collect();
                respond(200, Value::Array(matching))
            }
            (Method::Get, Some(id)) => match records.iter().find(|r| id_matches(r, id)) {
                Some(record) => respond(200, record.clone()),
                None => not_found(),
            },
            (Method::Post, None) => {
                let body = request.body.clone().unwrap_or(Value::Null);
                if !body.is_object() {
                    return respond(400, json!({ "error": "body must be an object" }));
                }
                let record = with_id(body, records.as_slice());
                records.push(record.clone());
                respond(201, record)
            }
            (Method::Put, Some(id)) => {
                let Some(slot) = records.iter_mut().find(|r| id_matches(r, id)) else {
                    return not_found();
                };
                let mut body = request.body.clone().unwrap_or(Value::Null);
                let Some(fields) = body.as_object_mut() else {
                    return respond(400, json!({ "error": "body must be an object" }));
                };
                fields.insert("id".to_string(), slot["id"].clone());
                *slot = body;
                respond(200, slot.clone())
            }
            (Method::Delete, Some(id)) => {
                let Some(position) = records.iter().position(|r| id_matches(r, id)) else {
                    return not_found();
                };
                records.remove(position);
                respond(200, json!({}))
            }
            _ => respond(405, json!({ "error": "method not allowed" })),
        }
    }
}

impl Transport for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        Ok(self.handle(&request))
    }
}

fn respond(status: u16, body: Value) -> ApiResponse {
    ApiResponse { status, body }
}

fn not_found() -> ApiResponse {
    respond(404, json!({}))
}

/// Normalised text of a scalar JSON value; `None` for objects, arrays and null.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            Some(match trimmed.parse::<i64>() {
                Ok(n) => n.to_string(),
                Err(_) => trimmed.to_string(),
            })
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_matches(record: &Value, field: &str, expected: &str) -> bool {
    let expected = scalar_text(&Value::String(expected.to_string()));
    record.get(field).and_then(scalar_text) == expected
}

fn id_matches(record: &Value, id: &str) -> bool {
    field_matches(record, "id", id)
}

fn with_id(mut record: Value, existing: &[Value]) -> Value {
    let has_id = record.get("id").map(|id| !id.is_null()).unwrap_or(false);
    if !has_id {
        let next = existing
            .iter()
            .filter_map(|r| r.get("id").and_then(scalar_text))
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        if let Some(fields) = record.as_object_mut() {
            fields.insert("id".to_string(), json!(next));
        }
    }
    record
}
