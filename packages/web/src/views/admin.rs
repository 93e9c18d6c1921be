//! Admin tables. Access is checked by the `RequireAdmin` layout.

use dioxus::prelude::*;
use ui::views::{FilmsAdminView, UsersAdminView};

#[component]
pub fn FilmsAdmin() -> Element {
    rsx! { FilmsAdminView {} }
}

#[component]
pub fn UsersAdmin() -> Element {
    rsx! { UsersAdminView {} }
}
