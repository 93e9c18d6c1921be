mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod shell;
pub use shell::ShellView;

mod home;
pub use home::HomeView;

mod movies;
pub use movies::MoviesView;

mod genres;
pub use genres::{GenreFilmsView, GenresView};

mod movie_details;
pub use movie_details::MovieDetailsView;

mod library;
pub use library::{FavoritesView, HistoryView};

mod player;
pub use player::VideoPlayerView;

mod auth_forms;
pub use auth_forms::{LoginView, RegisterView};

mod admin_table;

mod admin_films;
pub use admin_films::FilmsAdminView;

mod admin_users;
pub use admin_users::UsersAdminView;
