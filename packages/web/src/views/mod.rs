mod catalog;
pub use catalog::{GenreFilms, Genres, Home, MovieDetails, Movies, Watch};

mod account;
pub use account::{Favorites, History, Login, Register};

mod admin;
pub use admin::{FilmsAdmin, UsersAdmin};
