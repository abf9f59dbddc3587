//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the [`KeyValueStorage`] used on the **web platform**.
//! It opens `window.localStorage` on every call; the browser keeps the handle
//! cheap. When storage is unavailable (private mode, sandboxed iframe) reads
//! return `None` and writes are dropped with a warning.

use crate::storage::KeyValueStorage;

/// `window.localStorage`-backed storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, dropping write to {}", key);
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write to {}", key);
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, cannot remove {}", key);
            return;
        };
        if storage.remove_item(key).is_err() {
            tracing::warn!("localStorage rejected removal of {}", key);
        }
    }
}
