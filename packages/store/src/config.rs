//! # Application configuration: `recipes.toml`
//!
//! Defines the TOML document that tells the client where the JSON backend
//! lives and under which key the session identity is persisted.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3001"
//!
//! [session]
//! storage_key = "recipems_user"
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AppConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL, default **`http://localhost:3001`**. |
//! | [`SessionConfig`] | Durable storage key, default **`recipems_user`**. |
//!
//! Every section defaults, so a missing or empty file is the default
//! configuration. Environment overrides are layered on top by `api::config`.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `recipes.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the JSON backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Session persistence settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Durable storage key holding the serialised session user.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_storage_key() -> String {
    "recipems_user".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

impl AppConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Builder method to set the backend URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the session storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.session.storage_key = key.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "recipes.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(s)?;
        let base_url = config.api.base_url.clone();
        Ok(config.with_base_url(base_url))
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
