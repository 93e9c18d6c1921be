//! Page chrome: navigation bar, genre strip, footer.

use dioxus::prelude::*;

use crate::auth::{sign_out, use_auth};
use crate::client::{use_api, use_config};
use crate::hooks::{use_api_resource, FetchState};
use crate::icons::FaMagnifyingGlass;
use crate::nav::{use_navigate, Destination};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Shared layout around every page except the player. The platform crate
/// passes its router outlet as `children`.
#[component]
pub fn ShellView(children: Element) -> Element {
    let auth = use_auth();
    let api = use_api();
    let config = use_config();
    let navigate = use_navigate();
    let mut query = use_signal(String::new);

    let genres = use_api_resource(|client| async move { client.genres().await });

    let state = auth();
    let is_admin = state.is_admin();
    let display_name = state
        .user
        .as_ref()
        .map(|u| u.display_name().to_string());

    let handle_search = move |evt: FormEvent| {
        evt.prevent_default();
        let search = query().trim().to_string();
        if !search.is_empty() {
            navigate.call(Destination::Movies { search });
        }
    };

    let handle_logout = move |_| {
        let config = config.clone();
        spawn(async move {
            sign_out(api, &config).await;
            navigate.call(Destination::Login);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "shell",
            nav {
                class: "navbar",
                a {
                    class: "navbar__brand",
                    onclick: move |_| navigate.call(Destination::Home),
                    "MOVIEL"
                }
                form {
                    class: "navbar__search",
                    onsubmit: handle_search,
                    input {
                        r#type: "search",
                        placeholder: "Search movies...",
                        value: query(),
                        oninput: move |evt: FormEvent| query.set(evt.value()),
                    }
                    button {
                        r#type: "submit",
                        aria_label: "Search",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    }
                }
                div {
                    class: "navbar__links",
                    if is_admin {
                        a { onclick: move |_| navigate.call(Destination::AdminUsers), "Users" }
                        a { onclick: move |_| navigate.call(Destination::AdminFilms), "Films" }
                    } else if display_name.is_some() {
                        a { onclick: move |_| navigate.call(Destination::Favorites), "My List" }
                        a { onclick: move |_| navigate.call(Destination::History), "History" }
                    }
                }
                div {
                    class: "navbar__user",
                    if let Some(name) = display_name {
                        span { class: "navbar__name", "{name}" }
                        button { class: "btn btn--primary", onclick: handle_logout, "Logout" }
                    } else {
                        a { onclick: move |_| navigate.call(Destination::Login), "Sign In" }
                        button {
                            class: "btn btn--primary",
                            onclick: move |_| navigate.call(Destination::Register),
                            "Sign Up"
                        }
                    }
                }
            }

            if !is_admin {
                div {
                    class: "genre-strip",
                    a { onclick: move |_| navigate.call(Destination::Home), "Movies" }
                    a { onclick: move |_| navigate.call(Destination::Genres), "All Genres" }
                    {match FetchState::of(&genres, "Failed to load genres") {
                        FetchState::Loading => rsx! {
                            span { class: "genre-strip__status", "Loading genres..." }
                        },
                        FetchState::Failed(message) => rsx! {
                            span { class: "genre-strip__error", "{message}" }
                        },
                        FetchState::Ready(list) => rsx! {
                            for genre in list {
                                a {
                                    key: "{genre.id}",
                                    onclick: move |_| navigate.call(Destination::Genre(genre.id)),
                                    "{genre.name}"
                                }
                            }
                        },
                    }}
                }
            }

            main { class: "shell__main", {children} }

            footer {
                class: "footer",
                h3 { "About Moviel" }
                p {
                    "Your ultimate destination for discovering and enjoying movies. "
                    "Find your next favorite film and share your thoughts with the community."
                }
                p { class: "footer__copy", "© {store::clock::current_year()} Moviel. All rights reserved." }
            }
        }
    }
}
