use dioxus::prelude::*;
use store::Film;

use crate::icons::FaStar;
use crate::nav::{use_navigate, Destination};
use crate::Icon;

/// Poster card linking to the film's detail page.
#[component]
pub fn FilmCard(film: Film) -> Element {
    let navigate = use_navigate();
    let id = film.id;
    let year = film.release_year;
    let score = film.rating.score();
    let genres = film
        .genres
        .iter()
        .take(2)
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(" · ");

    rsx! {
        div {
            class: "film-card",
            onclick: move |_| navigate.call(Destination::Movie(id)),
            img {
                class: "film-card__cover",
                src: "{film.cover_url}",
                alt: "{film.title}",
                loading: "lazy",
            }
            div {
                class: "film-card__body",
                h3 { class: "film-card__title", "{film.title}" }
                div {
                    class: "film-card__meta",
                    if year > 0 {
                        span { "{year}" }
                    }
                    if let Some(score) = score {
                        span {
                            class: "film-card__score",
                            Icon { icon: FaStar, width: 12, height: 12 }
                            " {score:.1}"
                        }
                    }
                }
                if !genres.is_empty() {
                    div { class: "film-card__genres", "{genres}" }
                }
            }
        }
    }
}

/// Responsive grid of [`FilmCard`]s, or `empty` when there are none.
#[component]
pub fn FilmGrid(films: Vec<Film>, #[props(default = "No movies found.".to_string())] empty: String) -> Element {
    if films.is_empty() {
        return rsx! {
            p { class: "empty-state", "{empty}" }
        };
    }

    rsx! {
        div {
            class: "film-grid",
            for film in films {
                FilmCard { key: "{film.id}", film }
            }
        }
    }
}
