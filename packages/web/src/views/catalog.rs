//! Public catalog pages.

use dioxus::prelude::*;
use ui::views::{
    GenreFilmsView, GenresView, HomeView, MovieDetailsView, MoviesView, VideoPlayerView,
};

#[component]
pub fn Home() -> Element {
    rsx! { HomeView {} }
}

#[component]
pub fn Movies(search: String) -> Element {
    rsx! { MoviesView { search } }
}

#[component]
pub fn MovieDetails(id: i64) -> Element {
    rsx! { MovieDetailsView { id } }
}

#[component]
pub fn Genres() -> Element {
    rsx! { GenresView {} }
}

#[component]
pub fn GenreFilms(id: i64) -> Element {
    rsx! { GenreFilmsView { id } }
}

/// Full-window player, outside the navigation shell.
#[component]
pub fn Watch(id: i64, src: String, title: String) -> Element {
    rsx! { VideoPlayerView { id, src, title } }
}
