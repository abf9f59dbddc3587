//! # API crate: backend access and session for the recipe manager
//!
//! Everything the screens need to talk to the JSON backend: a transport
//! abstraction with HTTP and in-memory implementations, the typed Resource
//! Client, admin form validation, and the Session Store.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`error`] | Tagged error taxonomy (`Validation`, `NotFound`, `Auth`, `Conflict`, `Request`) |
//! | [`transport`] | `Transport` trait and the request/response pair it moves |
//! | [`http`] | `reqwest` transport for the real backend |
//! | [`memory_backend`] | In-memory backend with the same collection semantics, for tests and offline demos |
//! | [`client`] | `ResourceClient`: one method per (entity, verb) |
//! | [`payload`] | Recipe and category form validation |
//! | [`session`] | Session Store: restore, login, register, logout |
//! | [`config`] | `recipes.toml` + environment overrides |

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod memory_backend;
pub mod payload;
pub mod session;
pub mod transport;

pub use client::ResourceClient;
pub use error::{Error, ErrorKind, Result};
pub use http::HttpTransport;
pub use memory_backend::MemoryBackend;
pub use payload::{split_lines, CategoryForm, RecipeForm};
pub use session::{normalize_email, Session};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

pub use store::AppConfig;

/// A Resource Client over HTTP for the configured backend.
pub fn connect(config: &AppConfig) -> ResourceClient<HttpTransport> {
    tracing::debug!(base_url = %config.api.base_url, "Connecting to recipe backend");
    ResourceClient::new(HttpTransport::new(config.api.base_url.clone()))
}
