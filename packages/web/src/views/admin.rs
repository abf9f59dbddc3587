use dioxus::prelude::*;
use ui::views::AdminView;

use super::RequireAdmin;

#[component]
pub fn Admin() -> Element {
    rsx! {
        RequireAdmin {
            AdminView {}
        }
    }
}
