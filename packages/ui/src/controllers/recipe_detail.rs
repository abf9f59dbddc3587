use std::sync::{Arc, Mutex};

use api::{Error, ResourceClient, Transport};
use chrono::Utc;
use futures::future::join;
use store::join::{categories_by_id, resolve_category_name};
use store::{
    Category, Day, EntityId, Favorite, MealPlanDraft, MealType, NewFavorite, Recipe, SessionUser,
};

use super::lock;
use crate::{LoadGeneration, Notice};

pub const SIGN_IN_TO_FAVORITE: &str = "Please sign in to save favorites.";
pub const SIGN_IN_TO_PLAN: &str = "Please sign in to plan meals.";

#[derive(Clone, Debug, PartialEq)]
pub struct RecipeDetailState {
    pub recipe: Option<Recipe>,
    pub categories: Vec<Category>,
    pub favorite: Option<Favorite>,
    pub loading: bool,
    pub busy: bool,
    /// Load failure. Shown instead of the recipe.
    pub error: Option<String>,
    pub notice: Notice,
    pub day: Day,
    pub meal_type: MealType,
}

impl Default for RecipeDetailState {
    fn default() -> Self {
        Self {
            recipe: None,
            categories: Vec::new(),
            favorite: None,
            loading: true,
            busy: false,
            error: None,
            notice: Notice::default(),
            day: Day::Monday,
            meal_type: MealType::Lunch,
        }
    }
}

impl RecipeDetailState {
    pub fn category_name(&self) -> String {
        match &self.recipe {
            Some(recipe) => resolve_category_name(recipe, &categories_by_id(&self.categories)).to_string(),
            None => store::join::MISSING_CATEGORY.to_string(),
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite.is_some()
    }

    fn shows(&self, recipe_id: &EntityId) -> bool {
        self.recipe.as_ref().map(|r| &r.id) == Some(recipe_id)
    }
}

/// One recipe with its favorite toggle and meal-plan picker.
pub struct RecipeDetailController<T> {
    client: ResourceClient<T>,
    state: Arc<Mutex<RecipeDetailState>>,
    generation: LoadGeneration,
}

impl<T> Clone for RecipeDetailController<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            generation: self.generation.clone(),
        }
    }
}

impl<T: Transport> RecipeDetailController<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(RecipeDetailState::default())),
            generation: LoadGeneration::new(),
        }
    }

    pub fn state(&self) -> RecipeDetailState {
        lock(&self.state).clone()
    }

    pub fn generation(&self) -> &LoadGeneration {
        &self.generation
    }

    /// Load the recipe named by a route segment. Only the latest call commits.
    pub async fn load(&self, raw_id: &str, user: Option<&SessionUser>) {
        let ticket = self.generation.begin();
        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
            state.notice.clear();
        }

        let result = self.fetch(raw_id, user).await;

        let mut state = lock(&self.state);
        if !ticket.is_current() {
            tracing::debug!(recipe_id = raw_id, "Discarding superseded recipe load");
            return;
        }
        state.loading = false;
        match result {
            Ok((recipe, categories, favorite)) => {
                state.recipe = Some(recipe);
                state.categories = categories;
                state.favorite = favorite;
            }
            Err(e) => {
                state.recipe = None;
                state.favorite = None;
                state.error = Some(e.to_string());
            }
        }
    }

    async fn fetch(
        &self,
        raw_id: &str,
        user: Option<&SessionUser>,
    ) -> api::Result<(Recipe, Vec<Category>, Option<Favorite>)> {
        let id = EntityId::parse(raw_id)
            .ok_or_else(|| Error::validation("id", "Invalid recipe id."))?;
        let (recipe, categories) =
            join(self.client.get_recipe(&id), self.client.list_categories()).await;
        let recipe = recipe?;
        let categories = categories?;
        let favorite = match user {
            Some(user) => self.client.find_favorite(&user.id, &recipe.id).await?,
            None => None,
        };
        Ok((recipe, categories, favorite))
    }

    pub fn select_day(&self, day: Day) {
        lock(&self.state).day = day;
    }

    pub fn select_meal(&self, meal_type: MealType) {
        lock(&self.state).meal_type = meal_type;
    }

    /// Add or remove the shown recipe from the user's favorites.
    pub async fn toggle_favorite(&self, user: Option<&SessionUser>) {
        let Some((recipe_id, existing)) = self.begin_action() else {
            return;
        };
        let Some(user) = user else {
            self.finish_action(&recipe_id, |state| state.notice.show(SIGN_IN_TO_FAVORITE));
            return;
        };

        let result = match existing {
            Some(favorite) => self
                .client
                .delete_favorite(&favorite.id)
                .await
                .map(|()| (None, "Removed from favorites.")),
            None => self.add_favorite(user, &recipe_id).await.map(|f| (Some(f), "Added to favorites.")),
        };

        self.finish_action(&recipe_id, |state| match result {
            Ok((favorite, message)) => {
                state.favorite = favorite;
                state.notice.show(message);
            }
            Err(e) => state.notice.fail_with(&e),
        });
    }

    async fn add_favorite(&self, user: &SessionUser, recipe_id: &EntityId) -> api::Result<Favorite> {
        if let Some(existing) = self.client.find_favorite(&user.id, recipe_id).await? {
            return Ok(existing);
        }
        let favorite = self
            .client
            .add_favorite(&NewFavorite {
                user_id: user.id.clone(),
                recipe_id: recipe_id.clone(),
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(user_id = %user.id, recipe_id = %recipe_id, "Added favorite");
        Ok(favorite)
    }

    /// Schedule the shown recipe for the selected day and meal.
    pub async fn add_to_meal_plan(&self, user: Option<&SessionUser>) {
        let Some((recipe_id, _)) = self.begin_action() else {
            return;
        };
        let Some(user) = user else {
            self.finish_action(&recipe_id, |state| state.notice.show(SIGN_IN_TO_PLAN));
            return;
        };
        let (day, meal_type) = {
            let state = lock(&self.state);
            (state.day, state.meal_type)
        };

        let result = self
            .client
            .add_meal_plan(MealPlanDraft {
                user_id: Some(user.id.clone()),
                recipe_id: Some(recipe_id.clone()),
                day: Some(day),
                meal_type: Some(meal_type),
                created_at: None,
            })
            .await;

        self.finish_action(&recipe_id, |state| match result {
            Ok(_) => state.notice.show(format!("Added to meal plan: {day} • {meal_type}.")),
            Err(e) => state.notice.fail_with(&e),
        });
    }

    /// Mark busy and clear the notice. `None` when no recipe is shown.
    fn begin_action(&self) -> Option<(EntityId, Option<Favorite>)> {
        let mut state = lock(&self.state);
        let recipe_id = state.recipe.as_ref()?.id.clone();
        state.notice.clear();
        state.busy = true;
        Some((recipe_id, state.favorite.clone()))
    }

    /// Apply `patch` unless the screen has moved on to another recipe.
    fn finish_action(&self, recipe_id: &EntityId, patch: impl FnOnce(&mut RecipeDetailState)) {
        let mut state = lock(&self.state);
        state.busy = false;
        if state.shows(recipe_id) {
            patch(&mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::{client, seeded_backend, user, DelayedTransport};
    use api::{MemoryBackend, ResourceClient};
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_load_is_discarded() {
        let transport = DelayedTransport::new(seeded_backend())
            .delay("/recipes/1", 500)
            .delay("/recipes/2", 10);
        let detail = RecipeDetailController::new(ResourceClient::new(transport));

        // A starts first and resolves last; B starts second and resolves first.
        tokio::join!(detail.load("1", None), detail.load("2", None));

        let state = detail.state();
        assert_eq!(state.recipe.map(|r| r.title), Some("Tomato Soup".to_string()));
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_earlier_load_is_superseded() {
        let transport = DelayedTransport::new(seeded_backend())
            .delay("/recipes/1", 10)
            .delay("/recipes/2", 500);
        let detail = RecipeDetailController::new(ResourceClient::new(transport));

        let observer = detail.clone();
        let watch = async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            // A has resolved by now but must not be visible.
            observer.state()
        };
        let (_, _, midway) = tokio::join!(detail.load("1", None), detail.load("2", None), watch);

        assert!(midway.recipe.is_none());
        assert!(midway.loading);
        assert_eq!(detail.state().recipe.map(|r| r.title), Some("Tomato Soup".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_and_missing_ids() {
        let backend = seeded_backend();
        let detail = RecipeDetailController::new(client(&backend));

        detail.load("  ", None).await;
        assert_eq!(detail.state().error.as_deref(), Some("Invalid recipe id."));
        assert_eq!(backend.request_count(), 0);

        detail.load("404", None).await;
        assert_eq!(detail.state().error.as_deref(), Some("Recipe not found."));
    }

    #[tokio::test]
    async fn test_toggle_favorite_round_trip() {
        let backend = seeded_backend();
        let detail = RecipeDetailController::new(client(&backend));
        let me = user(7);

        detail.load("2", Some(&me)).await;
        assert!(!detail.state().is_favorite());
        assert_eq!(detail.state().category_name(), "Soups");

        detail.toggle_favorite(Some(&me)).await;
        let state = detail.state();
        assert!(state.is_favorite());
        assert_eq!(state.notice.message.as_deref(), Some("Added to favorites."));
        assert_eq!(backend.records("favorites").len(), 1);

        // Reload picks the favorite up from the server.
        detail.load("2", Some(&me)).await;
        assert!(detail.state().is_favorite());

        detail.toggle_favorite(Some(&me)).await;
        assert!(!detail.state().is_favorite());
        assert!(backend.records("favorites").is_empty());
    }

    #[tokio::test]
    async fn test_add_favorite_reuses_existing_record() {
        let backend = seeded_backend();
        let detail = RecipeDetailController::new(client(&backend));
        let me = user(7);

        detail.load("1", Some(&me)).await;
        // Someone else created the favorite after the page loaded.
        backend.seed("favorites", json!({ "userId": 7, "recipeId": "1" }));

        detail.toggle_favorite(Some(&me)).await;
        assert!(detail.state().is_favorite());
        assert_eq!(backend.records("favorites").len(), 1);
    }

    #[tokio::test]
    async fn test_date_only_favorite_is_not_duplicated() {
        let backend = seeded_backend();
        backend.seed("favorites", json!({ "userId": 7, "recipeId": 1, "createdAt": "2025-01-10" }));
        let detail = RecipeDetailController::new(client(&backend));
        let me = user(7);

        detail.load("1", Some(&me)).await;
        assert!(detail.state().is_favorite());

        detail.toggle_favorite(Some(&me)).await;
        assert!(!detail.state().is_favorite());
        assert!(backend.records("favorites").is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_actions_ask_to_sign_in() {
        let backend = seeded_backend();
        let detail = RecipeDetailController::new(client(&backend));
        detail.load("1", None).await;
        let before = backend.request_count();

        detail.toggle_favorite(None).await;
        assert_eq!(detail.state().notice.message.as_deref(), Some(SIGN_IN_TO_FAVORITE));

        detail.add_to_meal_plan(None).await;
        assert_eq!(detail.state().notice.message.as_deref(), Some(SIGN_IN_TO_PLAN));
        assert_eq!(backend.request_count(), before);
    }

    #[tokio::test]
    async fn test_add_to_meal_plan_uses_selection() {
        let backend = MemoryBackend::new();
        backend.seed("recipes", json!({ "id": 5, "title": "Soup" }));
        backend.seed("categories", json!({ "id": 1, "name": "Soups" }));
        let detail = RecipeDetailController::new(client(&backend));
        let me = user(1);

        detail.load("5", Some(&me)).await;
        detail.select_day(Day::Friday);
        detail.select_meal(MealType::Dinner);
        detail.add_to_meal_plan(Some(&me)).await;

        let state = detail.state();
        assert!(state.notice.error.is_none());
        assert!(!state.busy);
        let stored = backend.records("mealPlans");
        assert_eq!(stored[0]["day"], json!("Friday"));
        assert_eq!(stored[0]["mealType"], json!("Dinner"));
        assert_eq!(stored[0]["recipeId"], json!(5));
    }

    #[tokio::test]
    async fn test_failed_toggle_reports_error() {
        let backend = seeded_backend();
        let detail = RecipeDetailController::new(client(&backend));
        let me = user(7);
        detail.load("1", Some(&me)).await;

        backend.fail_path("/favorites");
        detail.toggle_favorite(Some(&me)).await;
        let state = detail.state();
        assert!(!state.is_favorite());
        assert_eq!(state.notice.error.as_deref(), Some("Failed to fetch favorite"));
    }
}
