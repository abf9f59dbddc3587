use dioxus::prelude::*;
use ui::views::FavoritesView;

use super::RequireUser;
use crate::Route;

#[component]
pub fn Favorites() -> Element {
    let nav = use_navigator();

    rsx! {
        RequireUser {
            FavoritesView {
                on_open: move |id: String| {
                    nav.push(Route::RecipeDetail { id });
                },
            }
        }
    }
}
