//! Platform storage for the persisted session.
//!
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorage`]
//! - **Desktop / Mobile** (native): one file per key under `<data_dir>/recipes/`
//! - **WASM without `web`**: in-memory only, nothing survives a reload

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type AppStorage = store::LocalStorage;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type AppStorage = store::MemoryStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type AppStorage = store::FileStorage;

/// Create the platform-appropriate storage.
pub fn make_storage() -> AppStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStorage::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("recipes");
        store::FileStorage::new(base)
    }
}
