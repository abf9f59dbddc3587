//! Route guards for signed-in and admin-only pages.

use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

/// Render `children` only for a signed-in user; everyone else goes to login.
#[component]
pub fn RequireUser(children: Element) -> Element {
    let ctx = use_session();
    let nav = use_navigator();

    if ctx.current().is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        {children}
    }
}

/// Render `children` only for admins. Anonymous users go to login, other
/// users back to the recipe list.
#[component]
pub fn RequireAdmin(children: Element) -> Element {
    let ctx = use_session();
    let nav = use_navigator();

    match ctx.current() {
        None => {
            nav.replace(Route::Login {});
            rsx! {}
        }
        Some(user) if !user.is_admin() => {
            nav.replace(Route::Home {});
            rsx! {}
        }
        Some(_) => rsx! {
            {children}
        },
    }
}
