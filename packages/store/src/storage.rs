//! # Client-local durable storage
//!
//! The session persists its identity under one well-known key, the way a
//! browser app uses `localStorage`. [`KeyValueStorage`] is that contract, kept
//! synchronous because every backend it wraps is synchronous.
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`crate::MemoryStorage`] | tests, and the fallback when nothing durable exists |
//! | [`crate::FileStorage`] | desktop and mobile (one file per key) |
//! | `LocalStorage` | web (`wasm32` + `web` feature), backed by `window.localStorage` |
//!
//! Implementations never fail loudly: a broken backend reads as empty and
//! drops writes after logging, so the app still starts signed out.

/// String key/value storage that survives reloads.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
