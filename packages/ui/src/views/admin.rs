use api::{CategoryForm, RecipeForm};
use dioxus::prelude::*;

use crate::{use_session, AdminController};

/// Blocking browser confirm. Native builds have no dialog and refuse.
fn confirm_dialog(prompt: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!(prompt, "No confirm dialog on this platform, refusing");
        false
    }
}

/// Admin screen: recipe form, recipe list and category list.
#[component]
pub fn AdminView() -> Element {
    let ctx = use_session();
    let user = ctx.user;
    let admin = use_hook(|| AdminController::new(ctx.client()));
    let mut snapshot = use_signal(|| admin.state());
    let mut category_name = use_signal(String::new);

    let _loader = use_resource({
        let admin = admin.clone();
        move || {
            let admin = admin.clone();
            let user = user();
            async move {
                admin.load(user.as_ref()).await;
                snapshot.set(admin.state());
            }
        }
    });

    use_drop({
        let admin = admin.clone();
        move || admin.generation().invalidate()
    });

    // One input handler per form field.
    let field = |set: fn(&mut RecipeForm, String)| {
        let admin = admin.clone();
        move |evt: FormEvent| {
            admin.update_form(|form| set(form, evt.value()));
            snapshot.set(admin.state());
        }
    };

    let on_submit = {
        let admin = admin.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let admin = admin.clone();
            spawn(async move {
                admin.submit().await;
                snapshot.set(admin.state());
            });
        }
    };
    let on_cancel = {
        let admin = admin.clone();
        move |_| {
            admin.reset_form();
            snapshot.set(admin.state());
        }
    };
    let on_add_category = {
        let admin = admin.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let admin = admin.clone();
            spawn(async move {
                let form = CategoryForm {
                    name: category_name(),
                };
                if admin.add_category(&form).await {
                    category_name.set(String::new());
                }
                snapshot.set(admin.state());
            });
        }
    };

    let state = snapshot();
    let form = state.form.clone();
    let submit_label = if state.editing.is_some() {
        "Update recipe"
    } else {
        "Create recipe"
    };
    let rows: Vec<_> = state
        .recipes
        .iter()
        .map(|recipe| (recipe.clone(), state.category_label(recipe)))
        .collect();

    if let Some(err) = state.error.clone() {
        return rsx! {
            div {
                class: "page",
                h1 { "Admin" }
                p { class: "error", "{err}" }
            }
        };
    }

    rsx! {
        div {
            class: "page",
            h1 { "Admin" }

            if let Some(msg) = state.notice.message.clone() {
                p { class: "msg", "{msg}" }
            }
            if let Some(err) = state.notice.error.clone() {
                p { class: "error", "{err}" }
            }

            if state.loading {
                p { class: "muted", "Loading..." }
            }

            form {
                class: "form",
                onsubmit: on_submit,
                h2 { "{submit_label}" }
                input {
                    placeholder: "Title",
                    value: "{form.title}",
                    oninput: field(|f, v| f.title = v),
                }
                select {
                    onchange: field(|f, v| f.category_id = v),
                    option { value: "", selected: form.category_id.is_empty(), "Choose a category" }
                    for category in state.categories.iter() {
                        option {
                            key: "{category.id}",
                            value: "{category.id}",
                            selected: form.category_id == category.id.to_string(),
                            "{category.name}"
                        }
                    }
                }
                input {
                    placeholder: "Image URL",
                    value: "{form.image_url}",
                    oninput: field(|f, v| f.image_url = v),
                }
                textarea {
                    placeholder: "Ingredients, one per line",
                    value: "{form.ingredients}",
                    oninput: field(|f, v| f.ingredients = v),
                }
                textarea {
                    placeholder: "Steps, one per line",
                    value: "{form.steps}",
                    oninput: field(|f, v| f.steps = v),
                }
                input {
                    r#type: "number",
                    placeholder: "Calories",
                    value: "{form.calories}",
                    oninput: field(|f, v| f.calories = v),
                }
                input {
                    r#type: "number",
                    placeholder: "Prep minutes",
                    value: "{form.prep_minutes}",
                    oninput: field(|f, v| f.prep_minutes = v),
                }
                div {
                    class: "actions",
                    button { class: "primary", r#type: "submit", "{submit_label}" }
                    if state.editing.is_some() {
                        button { r#type: "button", onclick: on_cancel, "Cancel" }
                    }
                }
            }

            div {
                class: "columns",
                section {
                    h2 { "Recipes" }
                    for (recipe, category) in rows {
                        div {
                            key: "{recipe.id}",
                            class: "row",
                            div {
                                strong { "{recipe.title}" }
                                p { class: "muted", "{category}" }
                            }
                            div {
                                class: "actions",
                                button {
                                    onclick: {
                                        let admin = admin.clone();
                                        let recipe = recipe.clone();
                                        move |_| {
                                            admin.edit(&recipe);
                                            snapshot.set(admin.state());
                                        }
                                    },
                                    "Edit"
                                }
                                button {
                                    onclick: {
                                        let admin = admin.clone();
                                        let id = recipe.id.clone();
                                        move |_| {
                                            let admin = admin.clone();
                                            let id = id.clone();
                                            async move {
                                                admin.delete_recipe(&id, confirm_dialog).await;
                                                snapshot.set(admin.state());
                                            }
                                        }
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
                section {
                    h2 { "Categories" }
                    form {
                        class: "filters",
                        onsubmit: on_add_category,
                        input {
                            placeholder: "New category",
                            value: "{category_name}",
                            oninput: move |evt: FormEvent| category_name.set(evt.value()),
                        }
                        button { r#type: "submit", "Add" }
                    }
                    for category in state.categories.clone() {
                        div {
                            key: "{category.id}",
                            class: "row",
                            span { "{category.name}" }
                            button {
                                onclick: {
                                    let admin = admin.clone();
                                    let id = category.id.clone();
                                    move |_| {
                                        let admin = admin.clone();
                                        let id = id.clone();
                                        async move {
                                            admin.delete_category(&id, confirm_dialog).await;
                                            snapshot.set(admin.state());
                                        }
                                    }
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}
