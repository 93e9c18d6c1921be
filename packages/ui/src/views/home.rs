use dioxus::prelude::*;

use crate::components::{ErrorBanner, FilmGrid, Spinner};
use crate::hooks::{use_api_resource, FetchState};
use crate::nav::{use_navigate, Destination};

/// Landing page: a featured film over the full catalog grid.
#[component]
pub fn HomeView() -> Element {
    let navigate = use_navigate();
    let films = use_api_resource(|client| async move { client.all_films().await });

    match FetchState::of(&films, "Failed to load films") {
        FetchState::Loading => rsx! { Spinner { label: "Loading movies..." } },
        FetchState::Failed(message) => rsx! { ErrorBanner { message } },
        FetchState::Ready(films) => {
            let featured = films.first().cloned();
            rsx! {
                if let Some(film) = featured {
                    section {
                        class: "hero",
                        style: "background-image: url('{film.cover_url}')",
                        div {
                            class: "hero__content",
                            h1 { class: "hero__title", "{film.title}" }
                            p { class: "hero__description", "{film.description}" }
                            button {
                                class: "btn btn--primary",
                                onclick: move |_| navigate.call(Destination::Movie(film.id)),
                                "More Info"
                            }
                        }
                    }
                }
                section {
                    class: "page-section",
                    h2 { class: "page-section__title", "Popular on Moviel" }
                    FilmGrid { films }
                }
            }
        }
    }
}
