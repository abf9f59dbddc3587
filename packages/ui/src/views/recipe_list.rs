use dioxus::prelude::*;

use crate::{use_session, HomeController};

/// Shared recipe listing with search and category filter.
#[component]
pub fn RecipeListView(
    /// Called with the recipe id when a card is clicked.
    on_open: EventHandler<String>,
) -> Element {
    let ctx = use_session();
    let home = use_hook(|| HomeController::new(ctx.client()));
    let mut snapshot = use_signal(|| home.state());

    let _loader = use_resource({
        let home = home.clone();
        move || {
            let home = home.clone();
            async move {
                home.load().await;
                snapshot.set(home.state());
            }
        }
    });

    use_drop({
        let home = home.clone();
        move || home.generation().invalidate()
    });

    let on_search = {
        let home = home.clone();
        move |evt: FormEvent| {
            home.set_search(&evt.value());
            snapshot.set(home.state());
        }
    };
    let on_category = {
        let home = home.clone();
        move |evt: FormEvent| {
            home.set_category(&evt.value());
            snapshot.set(home.state());
        }
    };

    let state = snapshot();
    let cards: Vec<_> = state
        .visible()
        .into_iter()
        .map(|recipe| (recipe.clone(), state.category_name(recipe)))
        .collect();
    let count = cards.len();

    rsx! {
        div {
            class: "page",
            h1 { "Recipes" }

            div {
                class: "filters",
                input {
                    r#type: "search",
                    placeholder: "Search by title...",
                    value: "{state.search}",
                    oninput: on_search,
                }
                select {
                    onchange: on_category,
                    option { value: "all", "All categories" }
                    for category in state.categories.iter() {
                        option { key: "{category.id}", value: "{category.id}", "{category.name}" }
                    }
                }
            }

            if state.loading {
                p { class: "muted", "Loading..." }
            } else if let Some(err) = state.error.clone() {
                p { class: "error", "{err}" }
            } else {
                p { class: "muted", "{count} recipes" }
                div {
                    class: "grid",
                    for (recipe, category) in cards {
                        div {
                            key: "{recipe.id}",
                            class: "card",
                            onclick: {
                                let id = recipe.id.to_string();
                                move |_| on_open.call(id.clone())
                            },
                            img { src: "{recipe.image_url}", alt: "{recipe.title}" }
                            h3 { "{recipe.title}" }
                            p {
                                class: "muted",
                                "{category} • {recipe.calories} kcal • {recipe.prep_minutes} min"
                            }
                        }
                    }
                }
            }
        }
    }
}
