//! The signed-in user's own lists.

use dioxus::prelude::*;
use store::clock::format_long_date;

use crate::components::{ErrorBanner, FilmCard, FilmGrid, Spinner};
use crate::hooks::{use_api_resource, FetchState};

#[component]
pub fn FavoritesView() -> Element {
    let favorites = use_api_resource(|client| async move { client.favorites().await });

    rsx! {
        section {
            class: "page-section",
            h1 { class: "page-section__title", "My List" }
            {match FetchState::of(&favorites, "Failed to load your list") {
                FetchState::Loading => rsx! { Spinner {} },
                FetchState::Failed(message) => rsx! { ErrorBanner { message } },
                FetchState::Ready(favorites) => {
                    let films = favorites.into_iter().filter_map(|f| f.film).collect::<Vec<_>>();
                    rsx! {
                        FilmGrid { films, empty: "Your list is empty. Add movies from their detail page." }
                    }
                }
            }}
        }
    }
}

/// Watched films, most recent first as the backend returns them.
#[component]
pub fn HistoryView() -> Element {
    let history = use_api_resource(|client| async move { client.watch_history().await });

    rsx! {
        section {
            class: "page-section",
            h1 { class: "page-section__title", "Watch History" }
            {match FetchState::of(&history, "Failed to load watch history") {
                FetchState::Loading => rsx! { Spinner {} },
                FetchState::Failed(message) => rsx! { ErrorBanner { message } },
                FetchState::Ready(entries) if entries.iter().all(|e| e.film.is_none()) => rsx! {
                    p { class: "empty-state", "You haven't watched anything yet." }
                },
                FetchState::Ready(entries) => rsx! {
                    div {
                        class: "film-grid",
                        for entry in entries {
                            if let Some(film) = entry.film {
                                div {
                                    key: "{entry.id}",
                                    class: "history-entry",
                                    FilmCard { film }
                                    span {
                                        class: "history-entry__date",
                                        "Watched {format_long_date(&entry.watched_at)}"
                                    }
                                }
                            }
                        }
                    }
                },
            }}
        }
    }
}
