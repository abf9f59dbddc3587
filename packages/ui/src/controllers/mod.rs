//! # Screen controllers
//!
//! One controller per screen. Each owns its state behind `Arc<Mutex<_>>`, a
//! [`ResourceClient`](api::ResourceClient) handle and a
//! [`LoadGeneration`](crate::LoadGeneration). Views call the async methods
//! and re-render from [`state()`](HomeController::state) snapshots.
//!
//! Every load follows the same shape:
//!
//! 1. `begin()` a ticket, mark the screen loading.
//! 2. Issue the reads concurrently.
//! 3. Commit only if the ticket is still current; otherwise drop the result.
//!
//! Mutations patch local state only after the server confirms, using the
//! record the server returned. Failures become screen messages, never panics.
//!
//! | Controller | Screen |
//! |------------|--------|
//! | [`HomeController`] | Recipe listing with search and category filter |
//! | [`RecipeDetailController`] | One recipe, favorite toggle, add to meal plan |
//! | [`FavoritesController`] | The user's favorites, joined with recipes |
//! | [`MealPlanController`] | The user's meal plan grouped by day and meal |
//! | [`ProfileController`] | Identity badge plus favorite and meal-plan counts |
//! | [`AdminController`] | Recipe and category CRUD |
//! | [`LoginForm`] / [`RegisterForm`] | Session sign-in forms |

use std::sync::{Mutex, MutexGuard};

mod admin;
mod auth_forms;
mod favorites;
mod home;
mod meal_plan;
mod profile;
mod recipe_detail;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::{AdminController, AdminState};
pub use auth_forms::{FormState, LoginForm, RegisterForm};
pub use favorites::{FavoritesController, FavoritesState};
pub use home::{HomeController, HomeState};
pub use meal_plan::{MealPlanController, MealPlanState};
pub use profile::{ProfileController, ProfileState};
pub use recipe_detail::{RecipeDetailController, RecipeDetailState};

/// A blocking yes/no gate in front of a destructive call.
pub trait Confirm {
    fn confirm(self, prompt: &str) -> bool;
}

impl<F: FnOnce(&str) -> bool> Confirm for F {
    fn confirm(self, prompt: &str) -> bool {
        self(prompt)
    }
}

fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
