//! Navigation targets shared views can request.
//!
//! Views live in this crate and do not know the platform's route enum, so
//! they ask for a [`Destination`] and the platform crate maps it to a route.

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum Destination {
    Home,
    Movies { search: String },
    Movie(i64),
    Genres,
    Genre(i64),
    Watch { id: i64, src: String, title: String },
    Login,
    Register,
    Favorites,
    History,
    AdminFilms,
    AdminUsers,
    Back,
}

#[derive(Clone, Copy)]
struct Navigate(Callback<Destination>);

/// Install the handler that performs navigation. Call once, inside the router.
pub fn provide_navigation(handler: Callback<Destination>) {
    use_context_provider(|| Navigate(handler));
}

pub fn use_navigate() -> Callback<Destination> {
    use_context::<Navigate>().0
}
