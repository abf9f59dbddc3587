//! Domain models, join logic, local storage and configuration shared by every
//! recipe-manager crate. Nothing here performs network I/O.

pub mod config;
pub mod join;
pub mod models;
pub mod storage;

mod file_store;
mod memory;
pub use file_store::FileStorage;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use config::AppConfig;
pub use join::{CategoryFilter, FavoriteView, MealPlanGroup, MealPlanItem};
pub use models::{
    Category, Day, EntityId, Favorite, MealPlanDraft, MealPlanEntry, MealType, NewCategory,
    NewFavorite, NewMealPlanEntry, NewUser, Recipe, RecipePayload, Role, SessionUser, User,
};
pub use storage::KeyValueStorage;
