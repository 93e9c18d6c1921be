use api::FilmQuery;
use dioxus::prelude::*;
use store::catalog::year_options;
use store::clock::current_year;

use crate::client::use_config;
use crate::components::{ErrorBanner, FilmGrid, Spinner};
use crate::hooks::{use_api_resource, use_prop_signal, FetchState};

/// Catalog search with genre and year filters and server-side paging.
///
/// Changing the search text or either filter returns to the first page.
#[component]
pub fn MoviesView(#[props(default)] search: String) -> Element {
    let config = use_config();
    let page_size = config.catalog.search_page_size;

    let search = use_prop_signal(search);
    let mut genre_id = use_signal(|| Option::<i64>::None);
    let mut year = use_signal(|| Option::<i32>::None);
    let mut page = use_signal(|| 1u32);
    let mut last_search = use_signal(|| search.peek().clone());

    if *last_search.peek() != *search.peek() {
        last_search.set(search.peek().clone());
        page.set(1);
    }

    let genres = use_api_resource(|client| async move { client.genres().await });
    let results = use_api_resource(move |client| {
        let query = FilmQuery {
            search: Some(search()),
            genre_id: genre_id(),
            year: year(),
            page: Some(page()),
            page_size: Some(page_size),
        };
        async move { client.films_page(&query).await }
    });

    let years = year_options(current_year());
    let genre_options = match FetchState::of(&genres, "Failed to load genres") {
        FetchState::Ready(list) => list,
        _ => Vec::new(),
    };

    let heading = if search().trim().is_empty() {
        "All Movies".to_string()
    } else {
        format!("Results for \"{}\"", search().trim())
    };

    rsx! {
        section {
            class: "page-section",
            h1 { class: "page-section__title", "{heading}" }

            div {
                class: "filters",
                select {
                    class: "filters__select",
                    onchange: move |evt: FormEvent| {
                        genre_id.set(evt.value().parse().ok());
                        page.set(1);
                    },
                    option { value: "", "All Genres" }
                    for genre in genre_options {
                        option {
                            key: "{genre.id}",
                            value: "{genre.id}",
                            selected: genre_id() == Some(genre.id),
                            "{genre.name}"
                        }
                    }
                }
                select {
                    class: "filters__select",
                    onchange: move |evt: FormEvent| {
                        year.set(evt.value().parse().ok());
                        page.set(1);
                    },
                    option { value: "", "All Years" }
                    for y in years {
                        option {
                            key: "{y}",
                            value: "{y}",
                            selected: year() == Some(y),
                            "{y}"
                        }
                    }
                }
            }

            {match FetchState::of(&results, "Failed to load movies") {
                FetchState::Loading => rsx! { Spinner { label: "Searching..." } },
                FetchState::Failed(message) => rsx! { ErrorBanner { message } },
                FetchState::Ready(result) => {
                    let current = result.current_page.max(1);
                    let total = result.total_pages;
                    rsx! {
                        p { class: "filters__count", "{result.total_count} movies" }
                        FilmGrid { films: result.items }
                        if total > 1 {
                            div {
                                class: "pager",
                                button {
                                    class: "btn btn--ghost",
                                    disabled: current <= 1,
                                    onclick: move |_| page.set(current.saturating_sub(1).max(1)),
                                    "Previous"
                                }
                                span { class: "pager__status", "Page {current} of {total}" }
                                button {
                                    class: "btn btn--ghost",
                                    disabled: current >= total,
                                    onclick: move |_| page.set(current + 1),
                                    "Next"
                                }
                            }
                        }
                    }
                }
            }}
        }
    }
}
