use dioxus::prelude::*;

use crate::{use_session, LoginForm};

/// Email and password sign-in.
#[component]
pub fn LoginView(on_success: EventHandler<()>, on_register: EventHandler<()>) -> Element {
    let ctx = use_session();
    let login = use_hook(|| LoginForm::new(ctx.session.clone()));
    let mut snapshot = use_signal(|| login.state());
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    let handle_login = {
        let login = login.clone();
        let ctx = ctx.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let login = login.clone();
            let mut ctx = ctx.clone();
            spawn(async move {
                let (email, password) = (email(), password());
                let signed_in = login.submit(&email, &password).await;
                snapshot.set(login.state());
                if signed_in.is_some() {
                    ctx.sync();
                    on_success.call(());
                }
            });
        }
    };

    let state = snapshot();

    rsx! {
        div {
            class: "page",
            h1 { "Sign in" }

            form {
                class: "form",
                onsubmit: handle_login,

                if let Some(err) = state.error.clone() {
                    p { class: "error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: state.busy,
                    if state.busy { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "muted",
                "No account yet? "
                button { onclick: move |_| on_register.call(()), "Register" }
            }
        }
    }
}
