use dioxus::prelude::*;
use ui::views::RecipeListView;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        RecipeListView {
            on_open: move |id: String| {
                nav.push(Route::RecipeDetail { id });
            },
        }
    }
}
