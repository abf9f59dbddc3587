//! # Session Store
//!
//! [`Session`] owns the signed-in identity. It is either *anonymous* (no user)
//! or *authenticated* with a [`SessionUser`], the password-free projection of
//! the stored [`store::User`].
//!
//! ## Lifecycle
//!
//! 1. [`Session::restore`] reads the projection persisted under the configured
//!    storage key. A missing or unreadable entry starts anonymous.
//! 2. [`Session::login`] / [`Session::register`] look the user up through the
//!    [`ResourceClient`], then store and persist the projection.
//! 3. [`Session::logout`] clears both. Calling it while anonymous does nothing.
//!
//! Clones share the same identity slot, so the session can be handed to every
//! screen through context without a global.
//!
//! Email uniqueness on register is a read-then-create check against the
//! backend. Two concurrent registrations with the same email can both succeed.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use store::{KeyValueStorage, NewUser, Role, SessionUser};

use crate::client::ResourceClient;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Minimum accepted password length on register.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Trim and lowercase an email for lookup and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct Session<T, S> {
    client: ResourceClient<T>,
    storage: Arc<S>,
    key: String,
    current: Arc<RwLock<Option<SessionUser>>>,
}

impl<T, S> Clone for Session<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
            current: Arc::clone(&self.current),
        }
    }
}

impl<T: Transport, S: KeyValueStorage> Session<T, S> {
    /// Build a session, restoring the identity persisted under `key`.
    pub fn restore(client: ResourceClient<T>, storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let restored = storage.get(&key).and_then(|raw| {
            serde_json::from_str::<SessionUser>(&raw)
                .map_err(|e| tracing::warn!("Ignoring unreadable stored session: {}", e))
                .ok()
        });
        if let Some(user) = &restored {
            tracing::info!(user_id = %user.id, "Restored session");
        }
        Self {
            client,
            storage: Arc::new(storage),
            key,
            current: Arc::new(RwLock::new(restored)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<SessionUser>> {
        self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionUser>> {
        self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(Error::validation(
                if email.is_empty() { "email" } else { "password" },
                "Email and password are required.",
            ));
        }

        let users = self.client.find_users_by_email(&email).await?;
        let user = users
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;
        if user.password != password {
            return Err(Error::Auth("Invalid password.".to_string()));
        }

        let projected = user.to_session_user();
        self.sign_in(projected.clone());
        tracing::info!(user_id = %projected.id, "Logged in");
        Ok(projected)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionUser> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() {
            return Err(Error::validation("name", "Name is required."));
        }
        if email.is_empty() {
            return Err(Error::validation("email", "Email is required."));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
            ));
        }

        let existing = self.client.find_users_by_email(&email).await?;
        if !existing.is_empty() {
            return Err(Error::Conflict("Email is already registered.".to_string()));
        }

        let created = self
            .client
            .create_user(&NewUser {
                name: name.to_string(),
                email,
                password: password.to_string(),
                role: Role::User,
            })
            .await?;

        let projected = created.to_session_user();
        self.sign_in(projected.clone());
        tracing::info!(user_id = %projected.id, "Registered and logged in");
        Ok(projected)
    }

    pub fn logout(&self) {
        let mut current = self.write();
        if let Some(user) = current.take() {
            self.storage.remove(&self.key);
            tracing::info!(user_id = %user.id, "Logged out");
        }
    }

    fn sign_in(&self, user: SessionUser) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.set(&self.key, &raw),
            Err(e) => tracing::warn!("Failed to persist session: {}", e),
        }
        *self.write() = Some(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::MemoryBackend;
    use serde_json::json;
    use store::{EntityId, MemoryStorage};

    const KEY: &str = "recipems_user";

    fn setup() -> (MemoryBackend, MemoryStorage, Session<MemoryBackend, MemoryStorage>) {
        let backend = MemoryBackend::new();
        backend.seed(
            "users",
            json!({
                "id": 1, "name": "Admin", "email": "admin@site.com",
                "password": "admin123", "role": "admin"
            }),
        );
        let storage = MemoryStorage::new();
        let session = Session::restore(ResourceClient::new(backend.clone()), storage.clone(), KEY);
        (backend, storage, session)
    }

    #[tokio::test]
    async fn test_login_normalizes_email() {
        let (_, storage, session) = setup();
        let user = session.login("Admin@Site.com ", "admin123").await.unwrap();
        assert_eq!(user.email, "admin@site.com");
        assert!(user.is_admin());
        assert!(session.is_authenticated());

        let stored = storage.get(KEY).unwrap();
        assert!(!stored.contains("admin123"));
        let parsed: SessionUser = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, user);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let (backend, _, session) = setup();

        let err = session.login("", "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(backend.request_count(), 0);

        let err = session.login("admin@site.com", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);

        let err = session.login("nobody@site.com", "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_rules() {
        let (backend, _, session) = setup();

        let err = session.register("Ana", "ana@site.com", "abc").await.unwrap_err();
        assert_eq!(err.field(), Some("password"));
        assert_eq!(backend.request_count(), 0);

        let err = session.register("Ana", " ADMIN@site.com", "abcd").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let user = session.register(" Ana ", "Ana@Site.com", "abcd").await.unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@site.com");
        assert!(!user.is_admin());
        assert_eq!(session.current(), Some(user));

        let stored = backend.records("users");
        assert_eq!(stored.last().unwrap()["role"], json!("user"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (_, storage, session) = setup();
        session.login("admin@site.com", "admin123").await.unwrap();
        let writes = storage.writes();

        session.logout();
        assert!(storage.get(KEY).is_none());
        assert_eq!(storage.writes(), writes + 1);

        session.logout();
        assert_eq!(storage.writes(), writes + 1);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_restore() {
        let storage = MemoryStorage::new();
        storage.set(
            KEY,
            r#"{"id":"7","name":"Ana","email":"ana@site.com","role":"user"}"#,
        );
        let session = Session::restore(ResourceClient::new(MemoryBackend::new()), storage, KEY);
        assert_eq!(session.current().map(|u| u.id), Some(EntityId::Num(7)));

        let garbage = MemoryStorage::new();
        garbage.set(KEY, "{not json");
        let session = Session::restore(ResourceClient::new(MemoryBackend::new()), garbage.clone(), KEY);
        assert!(session.current().is_none());
        assert!(garbage.get(KEY).is_some());
    }
}
