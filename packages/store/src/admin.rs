//! Row adapters and edit drafts for the two admin tables.

use serde::Serialize;

use crate::clock::timestamp_millis;
use crate::forms::is_plausible_email;
use crate::models::{AdminUser, Film, FilmRating, RegisterRequest};
use crate::table::{SortKey, TableRow};

pub const RATING_LABELS: [&str; 5] = ["G", "PG", "PG-13", "R", "NC-17"];
pub const FILM_STATUSES: [&str; 3] = ["pending", "active", "inactive"];
pub const USER_ROLES: [&str; 2] = ["user", "admin"];

/// Oldest release year the film form accepts.
const FIRST_RELEASE_YEAR: i32 = 1888;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilmField {
    Id,
    Title,
    ReleaseYear,
    Duration,
    Rating,
    Status,
    CreatedAt,
}

impl FilmField {
    pub const ALL: [FilmField; 7] = [
        FilmField::Id,
        FilmField::Title,
        FilmField::ReleaseYear,
        FilmField::Duration,
        FilmField::Rating,
        FilmField::Status,
        FilmField::CreatedAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilmField::Id => "ID",
            FilmField::Title => "Title",
            FilmField::ReleaseYear => "Year",
            FilmField::Duration => "Duration",
            FilmField::Rating => "Rating",
            FilmField::Status => "Status",
            FilmField::CreatedAt => "Created",
        }
    }
}

impl TableRow for Film {
    type Field = FilmField;

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_key(&self, field: FilmField) -> SortKey {
        match field {
            FilmField::Id => SortKey::Int(self.id),
            FilmField::Title => SortKey::Text(self.title.to_lowercase()),
            FilmField::ReleaseYear => SortKey::Int(self.release_year.into()),
            FilmField::Duration => SortKey::Int(self.duration.into()),
            FilmField::Rating => match &self.rating {
                FilmRating::Score(score) => SortKey::Float(*score),
                FilmRating::Label(label) => SortKey::Text(label.to_lowercase()),
            },
            FilmField::Status => SortKey::Text(self.status.to_lowercase()),
            FilmField::CreatedAt => {
                SortKey::Time(timestamp_millis(self.created_at.as_deref().unwrap_or("")))
            }
        }
    }

    fn haystack(&self) -> Vec<&str> {
        let rating = match &self.rating {
            FilmRating::Label(label) => label.as_str(),
            FilmRating::Score(_) => "",
        };
        vec![&self.title, &self.description, rating, &self.status]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::Id,
        UserField::Name,
        UserField::Email,
        UserField::Role,
        UserField::CreatedAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserField::Id => "ID",
            UserField::Name => "Name",
            UserField::Email => "Email",
            UserField::Role => "Role",
            UserField::CreatedAt => "Created",
        }
    }
}

impl TableRow for AdminUser {
    type Field = UserField;

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_key(&self, field: UserField) -> SortKey {
        match field {
            UserField::Id => SortKey::Int(self.id),
            UserField::Name => SortKey::Text(self.name.to_lowercase()),
            UserField::Email => SortKey::Text(self.email.to_lowercase()),
            UserField::Role => SortKey::Text(self.role.to_lowercase()),
            UserField::CreatedAt => SortKey::Time(timestamp_millis(&self.created_at)),
        }
    }

    fn haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.role]
    }
}

/// Form state for adding or editing a film. Serialises to the body of
/// `POST /films`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDraft {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub duration: u32,
    pub rating: String,
    pub status: String,
    pub cover_url: String,
    pub video_url: String,
}

impl FilmDraft {
    /// Empty add form.
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            release_year: current_year,
            duration: 0,
            rating: "PG".into(),
            status: "pending".into(),
            cover_url: String::new(),
            video_url: String::new(),
        }
    }

    pub fn from_film(film: &Film) -> Self {
        Self {
            title: film.title.clone(),
            description: film.description.clone(),
            release_year: film.release_year,
            duration: film.duration,
            rating: film.rating.to_string(),
            status: film.status.clone(),
            cover_url: film.cover_url.clone(),
            video_url: film.video_url.clone().unwrap_or_default(),
        }
    }

    /// First problem with the draft, if any.
    pub fn validate(&self, current_year: i32) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        if !(FIRST_RELEASE_YEAR..=current_year + 5).contains(&self.release_year) {
            return Err(format!(
                "Release year must be between {FIRST_RELEASE_YEAR} and {}",
                current_year + 5
            ));
        }
        if self.duration == 0 {
            return Err("Duration must be greater than zero".into());
        }
        if self.rating.trim().is_empty() {
            return Err("Rating is required".into());
        }
        if self.status.trim().is_empty() {
            return Err("Status is required".into());
        }
        if self.cover_url.trim().is_empty() {
            return Err("Cover URL is required".into());
        }
        if self.video_url.trim().is_empty() {
            return Err("Video URL is required".into());
        }
        Ok(())
    }

    /// The record sent by `PUT /films/:id`: the original film with the
    /// edited fields laid over it.
    pub fn apply_to(&self, film: &Film) -> Film {
        let video_url = self.video_url.trim();
        Film {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            release_year: self.release_year,
            duration: self.duration,
            rating: FilmRating::parse(&self.rating),
            status: self.status.clone(),
            cover_url: self.cover_url.trim().to_string(),
            video_url: (!video_url.is_empty()).then(|| video_url.to_string()),
            ..film.clone()
        }
    }
}

/// Edit form for an existing user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserDraft {
    pub fn from_user(user: &AdminUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        if !is_plausible_email(&self.email) {
            return Err("Please enter a valid email".into());
        }
        if self.role.trim().is_empty() {
            return Err("Role is required".into());
        }
        Ok(())
    }

    /// Merge onto the stored record. `stored` supplies the audit fields
    /// (`passwordHash`, `createdAt`) the backend requires on update.
    pub fn apply_to(&self, stored: &AdminUser) -> AdminUser {
        AdminUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.clone(),
            ..stored.clone()
        }
    }
}

/// Add-user form. Users are created through the public registration endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewUserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUserDraft {
    pub fn validate(&self) -> Result<(), String> {
        crate::forms::validate_registration(&self.name, &self.email, &self.password)
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
        }
    }
}
