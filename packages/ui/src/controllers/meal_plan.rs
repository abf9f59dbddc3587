use std::sync::{Arc, Mutex};

use api::{ResourceClient, Transport};
use store::join::group_meal_plan;
use store::{EntityId, MealPlanGroup, SessionUser};

use super::lock;
use crate::batch::fetch_recipes_by_id;
use crate::{LoadGeneration, Notice};

#[derive(Clone, Debug, PartialEq)]
pub struct MealPlanState {
    pub groups: Vec<MealPlanGroup>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Notice,
}

impl Default for MealPlanState {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            loading: true,
            error: None,
            notice: Notice::default(),
        }
    }
}

impl MealPlanState {
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

/// The user's meal plan, grouped by `(day, meal)`.
///
/// Entries whose recipe is gone stay listed with a placeholder title.
pub struct MealPlanController<T> {
    client: ResourceClient<T>,
    state: Arc<Mutex<MealPlanState>>,
    generation: LoadGeneration,
}

impl<T> Clone for MealPlanController<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
            generation: self.generation.clone(),
        }
    }
}

impl<T: Transport> MealPlanController<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(MealPlanState::default())),
            generation: LoadGeneration::new(),
        }
    }

    pub fn state(&self) -> MealPlanState {
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

        let result = match self.client.list_meal_plans(&user.id).await {
            Ok(entries) => {
                let recipes =
                    fetch_recipes_by_id(&self.client, entries.iter().map(|e| &e.recipe_id)).await;
                Ok(group_meal_plan(&entries, &recipes))
            }
            Err(e) => Err(e),
        };

        let mut state = lock(&self.state);
        if !ticket.is_current() {
            return;
        }
        state.loading = false;
        match result {
            Ok(groups) => state.groups = groups,
            Err(e) => state.error = Some(e.to_string()),
        }
    }

    pub async fn remove(&self, entry_id: &EntityId) {
        lock(&self.state).notice.clear();
        let result = self.client.delete_meal_plan(entry_id).await;

        let mut state = lock(&self.state);
        match result {
            Ok(()) => {
                for group in &mut state.groups {
                    group.items.retain(|item| &item.entry.id != entry_id);
                }
                state.groups.retain(|group| !group.items.is_empty());
                state.notice.show("Removed from meal plan.");
            }
            Err(e) => state.notice.fail_with(&e),
        }
    }
}
