use dioxus::prelude::*;

use crate::{use_session, FavoritesController};

/// Shared favorites view. Expects a signed-in user.
#[component]
pub fn FavoritesView(on_open: EventHandler<String>) -> Element {
    let ctx = use_session();
    let user = ctx.user;
    let favorites = use_hook(|| FavoritesController::new(ctx.client()));
    let mut snapshot = use_signal(|| favorites.state());

    let _loader = use_resource({
        let favorites = favorites.clone();
        move || {
            let favorites = favorites.clone();
            let user = user();
            async move {
                if let Some(user) = user {
                    favorites.load(&user).await;
                    snapshot.set(favorites.state());
                }
            }
        }
    });

    use_drop({
        let favorites = favorites.clone();
        move || favorites.generation().invalidate()
    });

    let state = snapshot();

    rsx! {
        div {
            class: "page",
            h1 { "Favorites" }

            if let Some(msg) = state.notice.message.clone() {
                p { class: "msg", "{msg}" }
            }
            if let Some(err) = state.notice.error.clone() {
                p { class: "error", "{err}" }
            }

            if state.loading {
                p { class: "muted", "Loading..." }
            } else if let Some(err) = state.error.clone() {
                p { class: "error", "{err}" }
            } else if state.items.is_empty() {
                p { class: "muted", "You have no favorite recipes yet." }
            } else {
                for item in state.items.clone() {
                    div {
                        key: "{item.favorite.id}",
                        class: "row",
                        div {
                            strong { "{item.recipe.title}" }
                            p {
                                class: "muted",
                                "Calories: {item.recipe.calories} • Prep: {item.recipe.prep_minutes} min"
                            }
                            button {
                                onclick: {
                                    let id = item.recipe.id.to_string();
                                    move |_| on_open.call(id.clone())
                                },
                                "View details"
                            }
                        }
                        button {
                            onclick: {
                                let favorites = favorites.clone();
                                let id = item.favorite.id.clone();
                                move |_| {
                                    let favorites = favorites.clone();
                                    let id = id.clone();
                                    async move {
                                        favorites.remove(&id).await;
                                        snapshot.set(favorites.state());
                                    }
                                }
                            },
                            "Remove"
                        }
                    }
                }
            }
        }
    }
}
