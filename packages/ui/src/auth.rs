//! Session context and hooks for the UI.

use api::{HttpTransport, ResourceClient, Session};
use dioxus::prelude::*;
use store::SessionUser;

use crate::storage::{make_storage, AppStorage};

pub type AppClient = ResourceClient<HttpTransport>;
pub type AppSession = Session<HttpTransport, AppStorage>;

/// The shared session plus a signal mirroring its identity, so screens
/// re-render when someone signs in or out.
#[derive(Clone)]
pub struct SessionContext {
    pub session: AppSession,
    pub user: Signal<Option<SessionUser>>,
}

impl SessionContext {
    pub fn client(&self) -> AppClient {
        self.session.client().clone()
    }

    pub fn current(&self) -> Option<SessionUser> {
        (self.user)()
    }

    /// Copy the session's identity into the signal after it changed.
    pub fn sync(&mut self) {
        let current = self.session.current();
        if *self.user.peek() != current {
            self.user.set(current);
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.sync();
    }
}

/// Get the session context provided by [`SessionProvider`].
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Restores the persisted session once and provides it to every screen.
/// Wrap your app with this component.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_hook(|| {
        let config = api::config::load();
        Session::restore(
            api::connect(&config),
            make_storage(),
            config.session.storage_key.clone(),
        )
    });
    let user = use_signal(|| session.current());

    use_context_provider(|| SessionContext {
        session: session.clone(),
        user,
    });

    rsx! {
        {children}
    }
}

/// Button that signs the current user out.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let mut ctx = use_session();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                ctx.logout();
                on_logout.call(());
            },
            "{label}"
        }
    }
}
