use dioxus::prelude::*;
use store::catalog::group_by_genre;

use crate::components::{ErrorBanner, FilmGrid, Spinner};
use crate::hooks::{use_api_resource, use_prop_signal, FetchState};
use crate::nav::{use_navigate, Destination};

/// Every genre with its films; a film is listed under each of its genres.
#[component]
pub fn GenresView() -> Element {
    let navigate = use_navigate();
    let films = use_api_resource(|client| async move { client.all_films().await });

    match FetchState::of(&films, "Failed to load genres") {
        FetchState::Loading => rsx! { Spinner {} },
        FetchState::Failed(message) => rsx! { ErrorBanner { message } },
        FetchState::Ready(films) => {
            let groups = group_by_genre(&films);
            rsx! {
                h1 { class: "page-section__title", "Browse by Genre" }
                if groups.is_empty() {
                    p { class: "empty-state", "No genres found." }
                }
                for (genre, members) in groups {
                    section {
                        key: "{genre.id}",
                        class: "page-section",
                        h2 {
                            class: "page-section__title page-section__title--link",
                            onclick: move |_| navigate.call(Destination::Genre(genre.id)),
                            "{genre.name}"
                        }
                        FilmGrid { films: members }
                    }
                }
            }
        }
    }
}

/// Films of a single genre.
#[component]
pub fn GenreFilmsView(id: i64) -> Element {
    let id = use_prop_signal(id);

    let genre = use_api_resource(move |client| {
        let id = id();
        async move { client.genre(id).await }
    });
    let films = use_api_resource(move |client| {
        let id = id();
        async move { client.films_by_genre(id).await }
    });

    let title = match FetchState::of(&genre, "Failed to load genre") {
        FetchState::Ready(genre) => genre.name,
        _ => "Genre".to_string(),
    };

    rsx! {
        section {
            class: "page-section",
            h1 { class: "page-section__title", "{title}" }
            {match FetchState::of(&films, "Failed to load movies") {
                FetchState::Loading => rsx! { Spinner {} },
                FetchState::Failed(message) => rsx! { ErrorBanner { message } },
                FetchState::Ready(films) => rsx! {
                    FilmGrid { films, empty: "No movies found in this genre." }
                },
            }}
        }
    }
}
