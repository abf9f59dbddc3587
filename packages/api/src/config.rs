//! Runtime configuration: `recipes.toml` overlaid with environment variables.
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `RECIPES_API_URL` | `api.base_url` |
//! | `RECIPES_SESSION_KEY` | `session.storage_key` |
//!
//! A `.env` file in the working directory is honoured via `dotenvy`.

use store::AppConfig;

pub const API_URL_VAR: &str = "RECIPES_API_URL";
pub const SESSION_KEY_VAR: &str = "RECIPES_SESSION_KEY";

/// Load configuration from `recipes.toml` (if present) and the environment.
pub fn load() -> AppConfig {
    dotenvy::dotenv().ok();
    with_overrides(read_file(), |name| std::env::var(name).ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_file() -> AppConfig {
    let path = AppConfig::filename();
    match std::fs::read_to_string(path) {
        Ok(text) => AppConfig::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {}", path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn read_file() -> AppConfig {
    AppConfig::default()
}

/// Apply overrides from `lookup`; blank values are ignored.
pub fn with_overrides(mut config: AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    if let Some(url) = present(API_URL_VAR) {
        config = config.with_base_url(url.trim());
    }
    if let Some(key) = present(SESSION_KEY_VAR) {
        config = config.with_storage_key(key.trim());
    }
    config
}
