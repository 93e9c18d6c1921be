use dioxus::prelude::*;

use crate::hooks::Flash;

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "spinner-wrap",
            div { class: "spinner" }
            span { "{label}" }
        }
    }
}

/// The one error line a view shows in place of its content.
#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        div { class: "error-banner", role: "alert", "{message}" }
    }
}

/// Green success notice; hidden once the flash expires.
#[component]
pub fn FlashNotice(flash: Flash) -> Element {
    match flash.message() {
        Some(message) => rsx! {
            div { class: "flash-notice", role: "status", "{message}" }
        },
        None => rsx! {},
    }
}
