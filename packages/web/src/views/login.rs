//! Login page.

use dioxus::prelude::*;
use ui::views::LoginView;

use crate::Route;

/// Signed-in visitors are sent straight to the recipe list.
#[component]
pub fn Login() -> Element {
    let ctx = ui::use_session();
    let nav = use_navigator();

    if ctx.current().is_some() {
        nav.replace(Route::Home {});
    }

    rsx! {
        LoginView {
            on_success: move |_| {
                nav.replace(Route::Home {});
            },
            on_register: move |_| {
                nav.push(Route::Register {});
            },
        }
    }
}
