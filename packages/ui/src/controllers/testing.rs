//! Test transports and fixtures shared by the controller tests.

use std::collections::HashMap;
use std::time::Duration;

use api::{ApiRequest, ApiResponse, MemoryBackend, ResourceClient, Transport, TransportError};
use serde_json::json;
use store::{EntityId, Role, SessionUser};

/// Serves from a [`MemoryBackend`] after a per-path delay.
#[derive(Clone)]
pub struct DelayedTransport {
    pub backend: MemoryBackend,
    delays: HashMap<String, Duration>,
}

impl DelayedTransport {
    pub fn new(backend: MemoryBackend) -> Self {
        Self {
            backend,
            delays: HashMap::new(),
        }
    }

    pub fn delay(mut self, path: &str, millis: u64) -> Self {
        self.delays.insert(path.to_string(), Duration::from_millis(millis));
        self
    }
}

impl Transport for DelayedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        if let Some(delay) = self.delays.get(&request.path) {
            tokio::time::sleep(*delay).await;
        }
        self.backend.send(request).await
    }
}

/// Backend seeded with two categories and three recipes.
pub fn seeded_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    backend.seed("categories", json!({ "id": 1, "name": "Breakfast" }));
    backend.seed("categories", json!({ "id": 2, "name": "Soups" }));
    backend.seed(
        "recipes",
        json!({
            "id": 1, "title": "Pancakes", "categoryId": 1, "imageUrl": "http://img/1.jpg",
            "ingredients": ["Egg", "Milk"], "steps": ["Mix", "Fry"],
            "calories": 350, "prepMinutes": 15
        }),
    );
    backend.seed(
        "recipes",
        json!({
            "id": 2, "title": "Tomato Soup", "categoryId": "2", "imageUrl": "http://img/2.jpg",
            "ingredients": ["Tomato"], "steps": ["Boil"],
            "calories": 120, "prepMinutes": 25
        }),
    );
    backend.seed(
        "recipes",
        json!({
            "id": 3, "title": "Mystery Stew", "categoryId": 42, "imageUrl": "http://img/3.jpg",
            "ingredients": ["?"], "steps": ["?"],
            "calories": 500, "prepMinutes": 90
        }),
    );
    backend
}

pub fn client(backend: &MemoryBackend) -> ResourceClient<MemoryBackend> {
    ResourceClient::new(backend.clone())
}

pub fn user(id: i64) -> SessionUser {
    SessionUser {
        id: EntityId::Num(id),
        name: format!("User {id}"),
        email: format!("user{id}@site.com"),
        role: Role::User,
    }
}

pub fn admin() -> SessionUser {
    SessionUser {
        id: EntityId::Num(100),
        name: "Admin".into(),
        email: "admin@site.com".into(),
        role: Role::Admin,
    }
}
