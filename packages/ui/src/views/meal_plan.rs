use dioxus::prelude::*;

use crate::{use_session, MealPlanController};

/// Shared meal-plan view, one section per `(day, meal)`.
#[component]
pub fn MealPlanView(on_open: EventHandler<String>) -> Element {
    let ctx = use_session();
    let user = ctx.user;
    let meal_plan = use_hook(|| MealPlanController::new(ctx.client()));
    let mut snapshot = use_signal(|| meal_plan.state());

    let _loader = use_resource({
        let meal_plan = meal_plan.clone();
        move || {
            let meal_plan = meal_plan.clone();
            let user = user();
            async move {
                if let Some(user) = user {
                    meal_plan.load(&user).await;
                    snapshot.set(meal_plan.state());
                }
            }
        }
    });

    use_drop({
        let meal_plan = meal_plan.clone();
        move || meal_plan.generation().invalidate()
    });

    let state = snapshot();
    let groups: Vec<_> = state
        .groups
        .iter()
        .map(|group| {
            let items: Vec<_> = group
                .items
                .iter()
                .map(|item| (item.clone(), item.title().to_string()))
                .collect();
            (group.label(), items)
        })
        .collect();

    rsx! {
        div {
            class: "page",
            h1 { "Meal Plan" }

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
            } else if groups.is_empty() {
                p { class: "muted", "Your meal plan is empty." }
            } else {
                for (label, items) in groups {
                    section {
                        key: "{label}",
                        h2 { "{label}" }
                        for (item, title) in items {
                            div {
                                key: "{item.entry.id}",
                                class: "row",
                                div {
                                    strong { "{title}" }
                                    if let Some(recipe) = item.recipe.clone() {
                                        button {
                                            onclick: {
                                                let id = recipe.id.to_string();
                                                move |_| on_open.call(id.clone())
                                            },
                                            "View details"
                                        }
                                    }
                                }
                                button {
                                    onclick: {
                                        let meal_plan = meal_plan.clone();
                                        let id = item.entry.id.clone();
                                        move |_| {
                                            let meal_plan = meal_plan.clone();
                                            let id = id.clone();
                                            async move {
                                                meal_plan.remove(&id).await;
                                                snapshot.set(meal_plan.state());
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
    }
}
