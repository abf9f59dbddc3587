use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::storage::KeyValueStorage;

/// In-memory storage for testing and as a non-durable fallback.
///
/// Clones share the same map. Every `set`/`remove` bumps a write counter so
/// callers can assert that an operation did not touch storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`remove` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values().remove(key);
    }
}
