use std::sync::{Arc, Mutex};

use api::{ResourceClient, Transport};
use futures::future::join;
use store::join::{categories_by_id, filter_recipes, resolve_category_name};
use store::{Category, CategoryFilter, Recipe};

use super::lock;
use crate::LoadGeneration;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeState {
    pub recipes: Vec<Recipe>,
    pub categories: Vec<Category>,
    pub search: String,
    pub category: CategoryFilter,
    pub loading: bool,
    pub error: Option<String>,
}

impl HomeState {
    /// Recipes passing the current search and category filter.
    pub fn visible(&self) -> Vec<&Recipe> {
        filter_recipes(&self.recipes, &self.search, &self.category)
    }

    pub fn category_name(&self, recipe: &Recipe) -> String {
        resolve_category_name(recipe, &categories_by_id(&self.categories)).to_string()
    }
}

/// Recipe listing: every recipe, filtered client-side.
pub struct HomeController<T> {
    client: ResourceClient<T>,
    state: Arc<Mutex<HomeState>>,
    generation: LoadGeneration,
}

impl<T> Clone for HomeController<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            generation: self.generation.clone(),
        }
    }
}

impl<T: Transport> HomeController<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(HomeState {
                loading: true,
                ..HomeState::default()
            })),
            generation: LoadGeneration::new(),
        }
    }

    pub fn state(&self) -> HomeState {
        lock(&self.state).clone()
    }

    pub fn generation(&self) -> &LoadGeneration {
        &self.generation
    }

    pub async fn load(&self) {
        let ticket = self.generation.begin();
        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let (recipes, categories) =
            join(self.client.list_recipes(), self.client.list_categories()).await;

        let mut state = lock(&self.state);
        if !ticket.is_current() {
            return;
        }
        state.loading = false;
        match (recipes, categories) {
            (Ok(recipes), Ok(categories)) => {
                state.recipes = recipes;
                state.categories = categories;
            }
            (Err(e), _) | (_, Err(e)) => state.error = Some(e.to_string()),
        }
    }

    pub fn set_search(&self, search: &str) {
        lock(&self.state).search = search.to_string();
    }

    /// Apply a category select value; `"all"` clears the filter.
    pub fn set_category(&self, raw: &str) {
        lock(&self.state).category = CategoryFilter::parse(raw);
    }

    pub fn visible(&self) -> Vec<Recipe> {
        lock(&self.state).visible().into_iter().cloned().collect()
    }

    pub fn result_count(&self) -> usize {
        lock(&self.state).visible().len()
    }
}
