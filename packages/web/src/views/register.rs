//! Registration page.

use dioxus::prelude::*;
use ui::views::RegisterView;

use crate::Route;

#[component]
pub fn Register() -> Element {
    let ctx = ui::use_session();
    let nav = use_navigator();

    if ctx.current().is_some() {
        nav.replace(Route::Home {});
    }

    rsx! {
        RegisterView {
            on_success: move |_| {
                nav.replace(Route::Home {});
            },
            on_login: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}
