pub mod admin;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod download;
pub mod error;
pub mod forms;
pub mod models;
pub mod player;
pub mod reviews;
pub mod session;
pub mod table;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::AppConfig;
pub use error::StoreError;
pub use models::{
    AdminUser, AuthResponse, AuthSession, Favorite, Film, FilmRating, Genre, Review, User,
    WatchHistory,
};
pub use session::{KeyValueStore, SessionStore};
pub use table::{SortDirection, TablePage, TableRow, TableState};
