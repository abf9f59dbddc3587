mod admin;
pub use admin::AdminView;

mod favorites;
pub use favorites::FavoritesView;

mod login;
pub use login::LoginView;

mod meal_plan;
pub use meal_plan::MealPlanView;

mod profile;
pub use profile::ProfileView;

mod recipe_detail;
pub use recipe_detail::RecipeDetailView;

mod recipe_list;
pub use recipe_list::RecipeListView;

mod register;
pub use register::RegisterView;
