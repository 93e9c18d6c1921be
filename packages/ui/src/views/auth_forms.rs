//! Sign-in and sign-up pages.

use dioxus::prelude::*;
use store::forms::{validate_login, validate_registration};
use store::models::RegisterRequest;

use crate::auth::{remembered_email, sign_in, sign_up};
use crate::client::{use_api, use_config};
use crate::components::ErrorBanner;
use crate::nav::{use_navigate, Destination};

/// Email/password sign-in. "Remember me" pre-fills the email next time.
#[component]
pub fn LoginView() -> Element {
    let config = use_config();
    let api = use_api();
    let navigate = use_navigate();

    let remembered = use_hook({
        let config = config.clone();
        move || remembered_email(&config)
    });
    let mut email = use_signal({
        let remembered = remembered.clone();
        move || remembered.unwrap_or_default()
    });
    let mut password = use_signal(String::new);
    let mut remember = use_signal(move || remembered.is_some());
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if let Err(message) = validate_login(&email(), &password()) {
            error.set(Some(message));
            return;
        }
        let config = config.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            match sign_in(api, &config, &email(), &password(), remember()).await {
                Ok(user) => {
                    tracing::info!("signed in as {}", user.email);
                    navigate.call(Destination::Home);
                }
                Err(message) => error.set(Some(message)),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_submit,
                h1 { "Sign In" }
                if let Some(message) = error() {
                    ErrorBanner { message }
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                label {
                    class: "auth-card__remember",
                    input {
                        r#type: "checkbox",
                        checked: remember(),
                        onchange: move |evt: FormEvent| remember.set(evt.checked()),
                    }
                    "Remember me"
                }
                button {
                    class: "btn btn--primary btn--block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign In" }
                }
                p {
                    class: "auth-card__switch",
                    "New to Moviel? "
                    a { onclick: move |_| navigate.call(Destination::Register), "Sign up now." }
                }
            }
        }
    }
}

#[component]
pub fn RegisterView() -> Element {
    let config = use_config();
    let api = use_api();
    let navigate = use_navigate();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if let Err(message) = validate_registration(&name(), &email(), &password()) {
            error.set(Some(message));
            return;
        }
        let request = RegisterRequest {
            email: email().trim().to_string(),
            password: password(),
            name: name().trim().to_string(),
        };
        let config = config.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            match sign_up(api, &config, &request).await {
                Ok(user) => {
                    tracing::info!("registered {}", user.email);
                    navigate.call(Destination::Home);
                }
                Err(message) => error.set(Some(message)),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_submit,
                h1 { "Sign Up" }
                if let Some(message) = error() {
                    ErrorBanner { message }
                }
                input {
                    r#type: "text",
                    placeholder: "Name",
                    autocomplete: "name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (at least 6 characters)",
                    autocomplete: "new-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "btn btn--primary btn--block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign Up" }
                }
                p {
                    class: "auth-card__switch",
                    "Already have an account? "
                    a { onclick: move |_| navigate.call(Destination::Login), "Sign in." }
                }
            }
        }
    }
}
