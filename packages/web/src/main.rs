use dioxus::prelude::*;

use ui::SessionProvider;
use views::{
    Admin, AppLayout, Favorites, Home, Login, MealPlan, NotFound, Profile, RecipeDetail, Register,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/recipe/:id")]
        RecipeDetail { id: String },
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/favorites")]
        Favorites {},
        #[route("/meal-plan")]
        MealPlan {},
        #[route("/profile")]
        Profile {},
        #[route("/admin")]
        Admin {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

fn main() {
    init_logging();
    tracing::info!("Starting recipe manager");
    dioxus::launch(App);
}

// A subscriber may already be installed by the launcher; keep whichever came first.
#[cfg(target_arch = "wasm32")]
fn init_logging() {
    let _ = dioxus::logger::init(tracing::Level::INFO);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

#[component]
fn App() -> Element {
    rsx! {
        SessionProvider {
            Router::<Route> {}
        }
    }
}
