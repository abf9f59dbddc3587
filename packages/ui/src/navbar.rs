use dioxus::prelude::*;

use crate::{use_session, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar. Platform packages pass their route links as children.
#[component]
pub fn Navbar(#[props(default)] on_logout: EventHandler<()>, children: Element) -> Element {
    let ctx = use_session();
    let user = ctx
        .current()
        .map(|u| (u.display_name().to_string(), u.badge()));

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "navbar",
            {children}
            span { class: "spacer" }
            if let Some((name, badge)) = user {
                span { class: "muted", "{name}" }
                span { class: "badge", "{badge}" }
                LogoutButton { on_logout: on_logout }
            }
        }
    }
}
