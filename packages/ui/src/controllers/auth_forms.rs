use std::sync::{Arc, Mutex};

use api::{Session, Transport};
use store::{KeyValueStorage, SessionUser};

use super::lock;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub busy: bool,
    pub error: Option<String>,
}

/// Sign-in form over the shared [`Session`].
pub struct LoginForm<T, S> {
    session: Session<T, S>,
    state: Arc<Mutex<FormState>>,
}

impl<T, S> Clone for LoginForm<T, S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport, S: KeyValueStorage> LoginForm<T, S> {
    pub fn new(session: Session<T, S>) -> Self {
        Self {
            session,
            state: Arc::new(Mutex::new(FormState::default())),
        }
    }

    pub fn state(&self) -> FormState {
        lock(&self.state).clone()
    }

    /// Returns the signed-in user, or `None` with `error` set.
    pub async fn submit(&self, email: &str, password: &str) -> Option<SessionUser> {
        start(&self.state);
        let result = self.session.login(email, password).await;
        finish(&self.state, result)
    }
}

/// Registration form; success signs the new user in.
pub struct RegisterForm<T, S> {
    session: Session<T, S>,
    state: Arc<Mutex<FormState>>,
}

impl<T, S> Clone for RegisterForm<T, S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport, S: KeyValueStorage> RegisterForm<T, S> {
    pub fn new(session: Session<T, S>) -> Self {
        Self {
            session,
            state: Arc::new(Mutex::new(FormState::default())),
        }
    }

    pub fn state(&self) -> FormState {
        lock(&self.state).clone()
    }

    pub async fn submit(&self, name: &str, email: &str, password: &str) -> Option<SessionUser> {
        start(&self.state);
        let result = self.session.register(name, email, password).await;
        finish(&self.state, result)
    }
}

fn start(state: &Mutex<FormState>) {
    let mut state = lock(state);
    state.busy = true;
    state.error = None;
}

fn finish(state: &Mutex<FormState>, result: api::Result<SessionUser>) -> Option<SessionUser> {
    let mut state = lock(state);
    state.busy = false;
    match result {
        Ok(user) => Some(user),
        Err(e) => {
            state.error = Some(e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MemoryBackend, ResourceClient};
    use serde_json::json;
    use store::MemoryStorage;

    fn session() -> Session<MemoryBackend, MemoryStorage> {
        let backend = MemoryBackend::new();
        backend.seed(
            "users",
            json!({ "id": 1, "name": "Ana", "email": "ana@site.com", "password": "pass1", "role": "user" }),
        );
        Session::restore(ResourceClient::new(backend), MemoryStorage::new(), "recipems_user")
    }

    #[tokio::test]
    async fn test_login_form_reports_errors() {
        let session = session();
        let form = LoginForm::new(session.clone());

        assert!(form.submit("ana@site.com", "nope").await.is_none());
        assert_eq!(form.state().error.as_deref(), Some("Invalid password."));
        assert!(!form.state().busy);

        let user = form.submit(" ANA@site.com", "pass1").await.unwrap();
        assert_eq!(user.name, "Ana");
        assert!(form.state().error.is_none());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_form_signs_in() {
        let session = session();
        let form = RegisterForm::new(session.clone());

        assert!(form.submit("Bo", "ana@site.com", "abcd").await.is_none());
        assert_eq!(form.state().error.as_deref(), Some("Email is already registered."));

        let user = form.submit("Bo", "bo@site.com", "abcd").await.unwrap();
        assert_eq!(session.current(), Some(user));
    }
}
