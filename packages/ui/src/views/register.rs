use dioxus::prelude::*;

use crate::{use_session, RegisterForm};

/// Registration form. A new account is signed in right away.
#[component]
pub fn RegisterView(on_success: EventHandler<()>, on_login: EventHandler<()>) -> Element {
    let ctx = use_session();
    let register = use_hook(|| RegisterForm::new(ctx.session.clone()));
    let mut snapshot = use_signal(|| register.state());
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    let handle_register = {
        let register = register.clone();
        let ctx = ctx.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let register = register.clone();
            let mut ctx = ctx.clone();
            spawn(async move {
                let (name, email, password) = (name(), email(), password());
                let signed_in = register.submit(&name, &email, &password).await;
                snapshot.set(register.state());
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
            h1 { "Create account" }

            form {
                class: "form",
                onsubmit: handle_register,

                if let Some(err) = state.error.clone() {
                    p { class: "error", "{err}" }
                }

                input {
                    r#type: "text",
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (min 4 characters)",
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: state.busy,
                    if state.busy { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "muted",
                "Already have an account? "
                button { onclick: move |_| on_login.call(()), "Sign in" }
            }
        }
    }
}
