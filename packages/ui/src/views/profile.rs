use dioxus::prelude::*;

use crate::{use_session, LogoutButton, ProfileController};

/// Shared profile view: identity, role badge and activity counts.
#[component]
pub fn ProfileView(#[props(default)] on_logout: EventHandler<()>) -> Element {
    let ctx = use_session();
    let user = ctx.user;
    let profile = use_hook(|| ProfileController::new(ctx.client()));
    let mut snapshot = use_signal(|| profile.state());

    let _loader = use_resource({
        let profile = profile.clone();
        move || {
            let profile = profile.clone();
            let user = user();
            async move {
                if let Some(user) = user {
                    profile.load(&user).await;
                    snapshot.set(profile.state());
                }
            }
        }
    });

    use_drop({
        let profile = profile.clone();
        move || profile.generation().invalidate()
    });

    let Some(me) = user() else {
        return rsx! {};
    };
    let name = me.display_name().to_string();
    let badge = me.badge();
    let state = snapshot();

    rsx! {
        div {
            class: "page",
            h1 { "Profile" }

            div {
                class: "row",
                div {
                    h2 { "{name}" }
                    p { b { "Email: " } "{me.email}" }
                    p { b { "User ID: " } "{me.id}" }
                }
                span { class: "badge", "{badge}" }
            }

            if state.loading {
                p { class: "muted", "Loading..." }
            } else if let Some(err) = state.error.clone() {
                p { class: "error", "{err}" }
            } else {
                div {
                    class: "columns",
                    div { class: "row", "Favorites" strong { "{state.favorite_count}" } }
                    div { class: "row", "Meal plan entries" strong { "{state.meal_plan_count}" } }
                }
            }

            LogoutButton { on_logout: on_logout }
        }
    }
}
