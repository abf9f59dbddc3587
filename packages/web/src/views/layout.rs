use dioxus::prelude::*;
use ui::{use_session, Navbar};

use crate::Route;

/// Shared chrome: the navbar with links for the current role, then the page.
#[component]
pub fn AppLayout() -> Element {
    let ctx = use_session();
    let nav = use_navigator();
    let user = ctx.current();
    let signed_in = user.is_some();
    let is_admin = user.as_ref().is_some_and(|u| u.is_admin());

    rsx! {
        Navbar {
            on_logout: move |_| {
                nav.push(Route::Home {});
            },
            Link { class: "brand", to: Route::Home {}, "RecipeMS" }
            Link { to: Route::Home {}, "Home" }
            if signed_in {
                Link { to: Route::Favorites {}, "Favorites" }
                Link { to: Route::MealPlan {}, "Meal Plan" }
                Link { to: Route::Profile {}, "Profile" }
            }
            if is_admin {
                Link { to: Route::Admin {}, "Admin" }
            }
            if !signed_in {
                Link { to: Route::Login {}, "Login" }
                Link { to: Route::Register {}, "Register" }
            }
        }
        main {
            Outlet::<Route> {}
        }
    }
}
