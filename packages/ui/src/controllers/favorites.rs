use std::sync::{Arc, Mutex};

use api::{ResourceClient, Transport};
use store::join::enrich_favorites;
use store::{EntityId, FavoriteView, SessionUser};

use super::lock;
use crate::batch::fetch_recipes_by_id;
use crate::{LoadGeneration, Notice};

#[derive(Clone, Debug, PartialEq)]
pub struct FavoritesState {
    /// Favorites whose recipe resolved. Orphans are left out.
    pub items: Vec<FavoriteView>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Notice,
}

impl Default for FavoritesState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            notice: Notice::default(),
        }
    }
}

pub struct FavoritesController<T> {
    client: ResourceClient<T>,
    state: Arc<Mutex<FavoritesState>>,
    generation: LoadGeneration,
}

impl<T> Clone for FavoritesController<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            generation: self.generation.clone(),
        }
    }
}

impl<T: Transport> FavoritesController<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(FavoritesState::default())),
            generation: LoadGeneration::new(),
        }
    }

    pub fn state(&self) -> FavoritesState {
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

        let result = match self.client.list_favorites(&user.id).await {
            Ok(favorites) => {
                let recipes =
                    fetch_recipes_by_id(&self.client, favorites.iter().map(|f| &f.recipe_id)).await;
                Ok(enrich_favorites(&favorites, &recipes))
            }
            Err(e) => Err(e),
        };

        let mut state = lock(&self.state);
        if !ticket.is_current() {
            return;
        }
        state.loading = false;
        match result {
            Ok(items) => state.items = items,
            Err(e) => state.error = Some(e.to_string()),
        }
    }

    pub async fn remove(&self, favorite_id: &EntityId) {
        lock(&self.state).notice.clear();
        let result = self.client.delete_favorite(favorite_id).await;

        let mut state = lock(&self.state);
        match result {
            Ok(()) => {
                state.items.retain(|item| &item.favorite.id != favorite_id);
                state.notice.show("Removed from favorites.");
            }
            Err(e) => state.notice.fail_with(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::{client, seeded_backend, user, DelayedTransport};
    use api::ResourceClient;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_orphaned_favorites_are_dropped() {
        let backend = seeded_backend();
        backend.seed("favorites", json!({ "id": 1, "userId": 7, "recipeId": 2 }));
        backend.seed("favorites", json!({ "id": 2, "userId": 7, "recipeId": 99 }));
        backend.seed("favorites", json!({ "id": 3, "userId": "7", "recipeId": "1" }));
        backend.seed("favorites", json!({ "id": 4, "userId": 8, "recipeId": 1 }));

        let favorites = FavoritesController::new(client(&backend));
        favorites.load(&user(7)).await;

        let state = favorites.state();
        assert!(!state.loading);
        let titles: Vec<&str> = state.items.iter().map(|i| i.recipe.title.as_str()).collect();
        assert_eq!(titles, vec!["Tomato Soup", "Pancakes"]);
    }

    #[tokio::test]
    async fn test_one_failed_lookup_does_not_sink_the_list() {
        let backend = seeded_backend();
        backend.seed("favorites", json!({ "id": 1, "userId": 7, "recipeId": 1 }));
        backend.seed("favorites", json!({ "id": 2, "userId": 7, "recipeId": 2 }));
        backend.fail_path("/recipes/1");

        let favorites = FavoritesController::new(client(&backend));
        favorites.load(&user(7)).await;

        let state = favorites.state();
        assert!(state.error.is_none());
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].recipe.title, "Tomato Soup");
    }

    #[tokio::test]
    async fn test_remove_patches_after_confirmation() {
        let backend = seeded_backend();
        backend.seed("favorites", json!({ "id": 1, "userId": 7, "recipeId": 1 }));
        let favorites = FavoritesController::new(client(&backend));
        favorites.load(&user(7)).await;

        backend.fail_path("/favorites/1");
        favorites.remove(&EntityId::Num(1)).await;
        let state = favorites.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.notice.error.as_deref(), Some("Failed to delete favorite"));

        let backend = seeded_backend();
        backend.seed("favorites", json!({ "id": 1, "userId": 7, "recipeId": 1 }));
        let favorites = FavoritesController::new(client(&backend));
        favorites.load(&user(7)).await;
        favorites.remove(&EntityId::Text("1".into())).await;
        assert!(favorites.state().items.is_empty());
        assert!(backend.records("favorites").is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_is_not_an_error() {
        let backend = seeded_backend();
        let favorites = FavoritesController::new(client(&backend));
        favorites.load(&user(7)).await;
        let state = favorites.state();
        assert!(state.items.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recipe_lookups_run_concurrently() {
        let backend = seeded_backend();
        for recipe_id in 1..=3 {
            backend.seed("favorites", json!({ "userId": 7, "recipeId": recipe_id }));
        }
        let transport = DelayedTransport::new(backend)
            .delay("/recipes/1", 100)
            .delay("/recipes/2", 100)
            .delay("/recipes/3", 100);
        let favorites = FavoritesController::new(ResourceClient::new(transport));

        let started = Instant::now();
        favorites.load(&user(7)).await;

        assert!(started.elapsed() < Duration::from_millis(200));
        assert_eq!(favorites.state().items.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_load_is_discarded() {
        let backend = seeded_backend();
        backend.seed("favorites", json!({ "userId": 7, "recipeId": 1 }));
        backend.seed("favorites", json!({ "userId": 8, "recipeId": 2 }));
        let transport = DelayedTransport::new(backend)
            .delay("/recipes/1", 500)
            .delay("/recipes/2", 10);
        let favorites = FavoritesController::new(ResourceClient::new(transport));

        let (user7, user8) = (user(7), user(8));
        tokio::join!(favorites.load(&user7), favorites.load(&user8));

        let state = favorites.state();
        assert!(!state.loading);
        let titles: Vec<&str> = state.items.iter().map(|i| i.recipe.title.as_str()).collect();
        assert_eq!(titles, vec!["Tomato Soup"]);
    }
}
