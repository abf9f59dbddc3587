use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div {
            class: "page",
            h1 { "404" }
            p { class: "muted", "Nothing lives at /{path}." }
            Link { to: Route::Home {}, "Back to recipes" }
        }
    }
}
