//! # API crate — REST client for the Moviel backend
//!
//! Every network call the frontend makes goes through [`ApiClient`]. The client
//! builds [`ApiRequest`]s (method, path below the base URL, query, JSON body,
//! bearer token) and hands them to a [`Transport`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] with one method per endpoint, [`FilmQuery`] and [`Paginated`] |
//! | [`transport`] | The [`Transport`] seam and its [`reqwest`] implementation |
//! | [`cache`] | [`CachedTransport`], a keyed cache-on-fetch decorator |
//! | [`error`] | [`ApiError`]: transport, status, decode and encode failures |
//!
//! ## Endpoints
//!
//! - **Films**: `GET /films/all`, `GET /films?search&genreId&year&page&pageSize`,
//!   `GET|PUT|DELETE /films/:id`, `POST /films`, `PUT /films/:id/video-url`
//! - **Genres**: `GET /genres`, `GET /genres/:id`
//! - **Auth**: `POST /auth/login`, `POST /auth/register`, `POST /auth/logout`
//! - **Favorites**: `GET|POST /favorites`, `DELETE /favorites/:filmId`
//! - **Reviews**: `GET /reviews/film/:id`, `GET /reviews/user/:id`, `POST /reviews`,
//!   `PUT|DELETE /reviews/:id`
//! - **Watch history**: `GET|POST /watch-history`
//! - **Users** (admin): `GET /users`, `GET|PUT|DELETE /users/:id`

pub mod cache;
pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::CachedTransport;
pub use client::{error_message, ApiClient, FilmQuery, Paginated};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};

/// The transport the app uses: reqwest behind the shared cache.
pub type HttpTransport = CachedTransport<ReqwestTransport>;

/// Build the app's transport for `base_url`.
pub fn http_transport(base_url: &str, cache_ttl_secs: u32) -> HttpTransport {
    CachedTransport::new(ReqwestTransport::new(base_url), cache_ttl_secs)
}
