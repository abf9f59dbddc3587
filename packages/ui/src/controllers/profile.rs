use std::sync::{Arc, Mutex};

use api::{ResourceClient, Transport};
use futures::future::join;
use store::SessionUser;

use super::lock;
use crate::LoadGeneration;

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileState {
    pub favorite_count: usize,
    pub meal_plan_count: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            favorite_count: 0,
            meal_plan_count: 0,
            loading: true,
            error: None,
        }
    }
}

/// Identity card with activity counts.
pub struct ProfileController<T> {
    client: ResourceClient<T>,
    state: Arc<Mutex<ProfileState>>,
    generation: LoadGeneration,
}

impl<T> Clone for ProfileController<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            generation: self.generation.clone(),
        }
    }
}

impl<T: Transport> ProfileController<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(ProfileState::default())),
            generation: LoadGeneration::new(),
        }
    }

    pub fn state(&self) -> ProfileState {
        lock(&self.state).clone()
    }

    pub fn generation(&self) -> &LoadGeneration {
        &self.generation
    }

    pub async fn load(&self, user: &SessionUser) {
        let ticket = self.generation.begin();
        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let (favorites, plans) = join(
            self.client.list_favorites(&user.id),
            self.client.list_meal_plans(&user.id),
        )
        .await;

        let mut state = lock(&self.state);
        if !ticket.is_current() {
            return;
        }
        state.loading = false;
        match (favorites, plans) {
            (Ok(favorites), Ok(plans)) => {
                state.favorite_count = favorites.len();
                state.meal_plan_count = plans.len();
            }
            (Err(e), _) | (_, Err(e)) => state.error = Some(e.to_string()),
        }
    }
}
