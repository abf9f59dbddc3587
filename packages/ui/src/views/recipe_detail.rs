use dioxus::prelude::*;

use store::{Day, MealType};

use crate::{use_session, RecipeDetailController};

/// Shared recipe detail view.
///
/// Loads the recipe named by the route, shows ingredients and steps, and
/// offers the favorite toggle and the meal-plan picker.
#[component]
pub fn RecipeDetailView(
    /// Raw id from the route segment.
    recipe_id: String,
    on_back: EventHandler<()>,
) -> Element {
    // Track the id in a signal so use_resource re-runs on route param change
    let mut id_signal = use_signal(|| recipe_id.clone());
    if *id_signal.peek() != recipe_id {
        id_signal.set(recipe_id.clone());
    }

    let ctx = use_session();
    let user = ctx.user;
    let detail = use_hook(|| RecipeDetailController::new(ctx.client()));
    let mut snapshot = use_signal(|| detail.state());

    let _loader = use_resource({
        let detail = detail.clone();
        move || {
            let detail = detail.clone();
            let id = id_signal();
            let user = user();
            async move {
                detail.load(&id, user.as_ref()).await;
                snapshot.set(detail.state());
            }
        }
    });

    use_drop({
        let detail = detail.clone();
        move || detail.generation().invalidate()
    });

    let toggle_favorite = {
        let detail = detail.clone();
        move |_| {
            let detail = detail.clone();
            async move {
                let current = user.peek().clone();
                detail.toggle_favorite(current.as_ref()).await;
                snapshot.set(detail.state());
            }
        }
    };
    let add_to_plan = {
        let detail = detail.clone();
        move |_| {
            let detail = detail.clone();
            async move {
                let current = user.peek().clone();
                detail.add_to_meal_plan(current.as_ref()).await;
                snapshot.set(detail.state());
            }
        }
    };
    let on_day = {
        let detail = detail.clone();
        move |evt: FormEvent| {
            if let Ok(day) = evt.value().parse::<Day>() {
                detail.select_day(day);
                snapshot.set(detail.state());
            }
        }
    };
    let on_meal = {
        let detail = detail.clone();
        move |evt: FormEvent| {
            if let Ok(meal) = evt.value().parse::<MealType>() {
                detail.select_meal(meal);
                snapshot.set(detail.state());
            }
        }
    };

    let state = snapshot();
    let category = state.category_name();
    let favorite_label = if state.is_favorite() {
        "★ Remove favorite"
    } else {
        "☆ Add to favorites"
    };
    let selected_day = state.day;
    let selected_meal = state.meal_type;

    rsx! {
        div {
            class: "page",
            button { onclick: move |_| on_back.call(()), "← Back" }

            if state.loading {
                p { class: "muted", "Loading..." }
            } else if let Some(err) = state.error.clone() {
                p { class: "error", "{err}" }
            } else if let Some(recipe) = state.recipe.clone() {
                h1 { "{recipe.title}" }
                p {
                    class: "muted",
                    "Category: {category} • Calories: {recipe.calories} • Prep: {recipe.prep_minutes} min"
                }
                div {
                    class: "hero",
                    img { src: "{recipe.image_url}", alt: "{recipe.title}" }
                }

                div {
                    class: "actions",
                    button {
                        class: "primary",
                        disabled: state.busy,
                        onclick: toggle_favorite,
                        "{favorite_label}"
                    }
                    select {
                        disabled: state.busy,
                        onchange: on_day,
                        for day in Day::ALL {
                            option {
                                key: "{day}",
                                value: "{day}",
                                selected: day == selected_day,
                                "{day}"
                            }
                        }
                    }
                    select {
                        disabled: state.busy,
                        onchange: on_meal,
                        for meal in MealType::ALL {
                            option {
                                key: "{meal}",
                                value: "{meal}",
                                selected: meal == selected_meal,
                                "{meal}"
                            }
                        }
                    }
                    button {
                        disabled: state.busy,
                        onclick: add_to_plan,
                        "Add to meal plan"
                    }
                }

                if let Some(msg) = state.notice.message.clone() {
                    p { class: "msg", "{msg}" }
                }
                if let Some(err) = state.notice.error.clone() {
                    p { class: "error", "{err}" }
                }

                div {
                    class: "columns",
                    section {
                        h2 { "Ingredients" }
                        ul {
                            for (idx, item) in recipe.ingredients.iter().enumerate() {
                                li { key: "{idx}", "{item}" }
                            }
                        }
                    }
                    section {
                        h2 { "Steps" }
                        ol {
                            for (idx, step) in recipe.steps.iter().enumerate() {
                                li { key: "{idx}", "{step}" }
                            }
                        }
                    }
                }
            } else {
                p { class: "error", "Recipe not found." }
            }
        }
    }
}
