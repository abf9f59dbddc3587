mod admin;
pub use admin::Admin;

mod favorites;
pub use favorites::Favorites;

mod guard;
pub use guard::{RequireAdmin, RequireUser};

mod home;
pub use home::Home;

mod layout;
pub use layout::AppLayout;

mod login;
pub use login::Login;

mod meal_plan;
pub use meal_plan::MealPlan;

mod not_found;
pub use not_found::NotFound;

mod profile;
pub use profile::Profile;

mod recipe_detail;
pub use recipe_detail::RecipeDetail;

mod register;
pub use register::Register;
