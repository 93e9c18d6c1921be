//! Sign-in pages and the signed-in user's lists.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::{FavoritesView, HistoryView, LoginView, RegisterView};

use crate::Route;

/// Leave the sign-in pages once a session exists.
fn use_signed_in_redirect() {
    let auth = use_auth();
    let nav = use_navigator();
    use_effect(move || {
        if auth().is_signed_in() {
            nav.replace(Route::Home {});
        }
    });
}

#[component]
pub fn Login() -> Element {
    use_signed_in_redirect();
    rsx! { LoginView {} }
}

#[component]
pub fn Register() -> Element {
    use_signed_in_redirect();
    rsx! { RegisterView {} }
}

#[component]
pub fn Favorites() -> Element {
    rsx! { FavoritesView {} }
}

#[component]
pub fn History() -> Element {
    rsx! { HistoryView {} }
}
