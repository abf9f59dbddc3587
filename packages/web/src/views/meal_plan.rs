use dioxus::prelude::*;
use ui::views::MealPlanView;

use super::RequireUser;
use crate::Route;

#[component]
pub fn MealPlan() -> Element {
    let nav = use_navigator();

    rsx! {
        RequireUser {
            MealPlanView {
                on_open: move |id: String| {
                    nav.push(Route::RecipeDetail { id });
                },
            }
        }
    }
}
