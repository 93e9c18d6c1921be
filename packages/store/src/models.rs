//! # Catalog and account models mirrored from the backend
//!
//! Every type here is a plain record with the same JSON shape the REST backend
//! produces (camelCase keys). The client never adds invariants beyond "shape
//! matches what was fetched"; records are page-scoped copies.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`User`] | The signed-in account as returned by the auth endpoints. |
//! | [`AdminUser`] | A row of the admin users table, including audit fields the edit flow must echo back. |
//! | [`Film`] | A catalog entry with playable (`video_url`) or downloadable (`torrent_url`) media. |
//! | [`Genre`] | A named genre. |
//! | [`Review`] | A rating plus optional comment on a film. |
//! | [`Favorite`] / [`WatchHistory`] | User-film relations, each with the film embedded. |
//! | [`AuthResponse`] | Login/register payload: the user fields plus a bearer token. |
//! | [`AuthSession`] | What the client persists: user, token and expiry. |
//!
//! ## Genre associations
//!
//! The backend is inconsistent about how a film lists its genres: sometimes an
//! array of genre objects, sometimes raw ids, sometimes `filmGenres` link rows
//! (`{filmId, genreId, genre?}`). [`Film::genres`] accepts all three and always
//! holds resolved [`Genre`] values; a link without an embedded genre gets the
//! placeholder name `Genre <id>`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Role string that grants access to the admin tables.
pub const ADMIN_ROLE: &str = "admin";

/// The authenticated account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

impl User {
    /// Single authorization predicate for admin-only views.
    pub fn is_admin(&self) -> bool {
        self.role.trim().eq_ignore_ascii_case(ADMIN_ROLE)
    }

    /// Name to show in the navigation bar, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Payload returned by `POST /auth/login` and `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i64,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    pub token: String,
}

impl AuthResponse {
    /// Split into the user record and the bearer token.
    pub fn into_parts(self) -> (User, String) {
        let user = User {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role,
        };
        (user, self.token)
    }
}

/// Client-persisted session. `expires_at` is a unix timestamp in milliseconds;
/// a session without one never expires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl AuthSession {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self.expires_at, Some(expires_at) if now_ms >= expires_at)
    }
}

/// Credentials for `POST /auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Details for `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A user row as exposed by the admin `/users` endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl From<AuthResponse> for AdminUser {
    fn from(resp: AuthResponse) -> Self {
        Self {
            id: resp.id,
            name: resp.name,
            email: resp.email,
            role: resp.role,
            created_at: String::new(),
            password_hash: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    fn placeholder(id: i64) -> Self {
        Self {
            id,
            name: format!("Genre {id}"),
        }
    }
}

/// One entry of a film's genre list in any of the shapes the backend emits.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenreRef {
    Link {
        #[serde(rename = "genreId")]
        genre_id: i64,
        #[serde(default)]
        genre: Option<Genre>,
    },
    Embedded(Genre),
    Id(i64),
}

impl GenreRef {
    fn resolve(self) -> Genre {
        match self {
            GenreRef::Link {
                genre: Some(genre), ..
            } => genre,
            GenreRef::Link { genre_id, .. } => Genre::placeholder(genre_id),
            GenreRef::Embedded(genre) => genre,
            GenreRef::Id(id) => Genre::placeholder(id),
        }
    }
}

fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<Genre>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<GenreRef>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(refs.into_iter().map(GenreRef::resolve).collect())
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A film's rating: a numeric score on public listings, a content label
/// (`"PG"`, `"R"`) in the admin catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilmRating {
    Score(f64),
    Label(String),
}

impl FilmRating {
    /// Parse form input: anything numeric is a score, the rest a label.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<f64>() {
            Ok(score) if score.is_finite() => FilmRating::Score(score),
            _ => FilmRating::Label(trimmed.to_string()),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            FilmRating::Score(score) => Some(*score),
            FilmRating::Label(_) => None,
        }
    }
}

impl Default for FilmRating {
    fn default() -> Self {
        FilmRating::Score(0.0)
    }
}

impl fmt::Display for FilmRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilmRating::Score(score) => write!(f, "{score:.1}"),
            FilmRating::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FilmRecord")]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    /// Runtime in minutes.
    pub duration: u32,
    pub rating: FilmRating,
    pub cover_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torrent_url: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub genres: Vec<Genre>,
}

/// Wire shape of a film. `genres` and `filmGenres` may both be present; they
/// are merged by genre id, embedded genres first.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilmRecord {
    id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    release_year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    duration: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    rating: FilmRating,
    #[serde(default, deserialize_with = "null_as_default")]
    cover_url: String,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    torrent_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_genres")]
    genres: Vec<Genre>,
    #[serde(default, deserialize_with = "deserialize_genres")]
    film_genres: Vec<Genre>,
}

impl From<FilmRecord> for Film {
    fn from(record: FilmRecord) -> Self {
        let mut genres = record.genres;
        for genre in record.film_genres {
            if !genres.iter().any(|g| g.id == genre.id) {
                genres.push(genre);
            }
        }
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            release_year: record.release_year,
            duration: record.duration,
            rating: record.rating,
            cover_url: record.cover_url,
            video_url: record.video_url,
            torrent_url: record.torrent_url,
            status: record.status,
            created_at: record.created_at,
            genres,
        }
    }
}

impl Film {
    /// Playable source, treating the backend's `"none"` sentinel as absent.
    pub fn playable_url(&self) -> Option<&str> {
        self.video_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != "none")
    }

    pub fn download_url(&self) -> Option<&str> {
        self.torrent_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn first_genre(&self) -> Option<&Genre> {
        self.genres.first()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub film_id: i64,
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, alias = "comment")]
    pub review_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub film_id: i64,
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub film: Option<Film>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistory {
    pub id: i64,
    pub film_id: i64,
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watched_at: String,
    #[serde(default)]
    pub film: Option<Film>,
}
