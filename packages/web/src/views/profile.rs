use dioxus::prelude::*;
use ui::views::ProfileView;

use super::RequireUser;
use crate::Route;

#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();

    rsx! {
        RequireUser {
            ProfileView {
                on_logout: move |_| {
                    nav.push(Route::Home {});
                },
            }
        }
    }
}
