//! Review list paging, star rendering and the write-a-review draft.

use serde::Serialize;

use crate::models::{Film, FilmRating, User};

pub const DEFAULT_REVIEW_RATING: u8 = 5;

/// How many reviews of a film's list are visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReviewWindow {
    visible: usize,
    step: usize,
}

impl ReviewWindow {
    pub fn new(step: usize) -> Self {
        let step = step.max(1);
        Self {
            visible: step,
            step,
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn show_more(&mut self) {
        self.visible += self.step;
    }

    pub fn show_less(&mut self) {
        self.visible = self.step;
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }

    /// Whether "Show less" is offered.
    pub fn is_expanded(&self) -> bool {
        self.visible > self.step
    }

    /// The show more/less controls only appear for lists longer than one step.
    pub fn shows_controls(&self, total: usize) -> bool {
        total > self.step
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Five stars for a 0–5 rating; a fractional part of .5 or more adds a half star.
pub fn star_fills(rating: f64) -> [StarFill; 5] {
    let rating = if rating.is_finite() { rating.clamp(0.0, 5.0) } else { 0.0 };
    let full = rating.floor() as usize;
    let half = rating.fract() >= 0.5;
    std::array::from_fn(|i| {
        let position = i + 1;
        if position <= full {
            StarFill::Full
        } else if position == full + 1 && half {
            StarFill::Half
        } else {
            StarFill::Empty
        }
    })
}

/// Avatar letter for a review author.
pub fn author_initial(user: Option<&User>) -> char {
    user.and_then(|user| user.name.trim().chars().next())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('U')
}

pub fn author_name(user: Option<&User>) -> &str {
    match user {
        Some(user) if !user.name.trim().is_empty() => &user.name,
        _ => "Unknown User",
    }
}

/// The "Write a Review" form.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub text: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            rating: DEFAULT_REVIEW_RATING,
            text: String::new(),
        }
    }
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=5).contains(&self.rating) {
            return Err("Rating must be between 1 and 5".into());
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Body for `POST /reviews`, with snapshots of the author and film.
    pub fn into_submission(&self, user: &User, film: &Film, now_iso: String) -> ReviewSubmission {
        let text = self.text.trim();
        ReviewSubmission {
            user_id: user.id,
            film_id: film.id,
            rating: self.rating,
            review_text: (!text.is_empty()).then(|| text.to_string()),
            created_at: now_iso,
            user: user.clone(),
            film: FilmSnapshot {
                id: film.id,
                title: film.title.clone(),
                description: film.description.clone(),
                release_year: film.release_year,
                rating: film.rating.clone(),
                cover_url: film.cover_url.clone(),
                video_url: film.video_url.clone(),
                torrent_url: film.torrent_url.clone(),
                status: film.status.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub user_id: i64,
    pub film_id: i64,
    pub rating: u8,
    pub review_text: Option<String>,
    pub created_at: String,
    pub user: User,
    pub film: FilmSnapshot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmSnapshot {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub rating: FilmRating,
    pub cover_url: String,
    pub video_url: Option<String>,
    pub torrent_url: Option<String>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_show_more_and_less() {
        let reviews: Vec<u32> = (0..8).collect();
        let mut window = ReviewWindow::new(3);
        assert!(window.shows_controls(reviews.len()));
        assert_eq!(window.slice(&reviews), &[0, 1, 2]);
        assert!(window.has_more(reviews.len()));
        assert!(!window.is_expanded());

        window.show_more();
        window.show_more();
        assert_eq!(window.slice(&reviews).len(), 8);
        assert!(!window.has_more(reviews.len()));
        assert!(window.is_expanded());

        window.show_less();
        assert_eq!(window.visible(), 3);
    }

    #[test]
    fn test_window_controls_hidden_for_short_lists() {
        let window = ReviewWindow::new(3);
        assert!(!window.shows_controls(3));
        assert_eq!(window.slice(&[1, 2]), &[1, 2]);
    }

    #[test]
    fn test_star_fills() {
        use StarFill::*;
        assert_eq!(star_fills(3.5), [Full, Full, Full, Half, Empty]);
        assert_eq!(star_fills(3.4), [Full, Full, Full, Empty, Empty]);
        assert_eq!(star_fills(5.0), [Full; 5]);
        assert_eq!(star_fills(0.0), [Empty; 5]);
        assert_eq!(star_fills(f64::NAN), [Empty; 5]);
        assert_eq!(star_fills(9.0), [Full; 5]);
    }

    #[test]
    fn test_author_initial() {
        let user = User {
            id: 1,
            email: "e@x".into(),
            name: "ana".into(),
            role: String::new(),
        };
        assert_eq!(author_initial(Some(&user)), 'A');
        assert_eq!(author_initial(None), 'U');
        assert_eq!(author_name(None), "Unknown User");
    }

    #[test]
    fn test_draft_submission() {
        let user = User {
            id: 4,
            email: "e@x".into(),
            name: "Eve".into(),
            role: "user".into(),
        };
        let film: Film = serde_json::from_str(r#"{"id":9,"title":"Heat","rating":8.3}"#).unwrap();

        let mut draft = ReviewDraft::default();
        assert_eq!(draft.rating, 5);
        draft.text = "  ".into();
        let body = draft.into_submission(&user, &film, "2024-05-01T00:00:00.000Z".into());
        assert_eq!(body.review_text, None);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userId"], 4);
        assert_eq!(json["filmId"], 9);
        assert_eq!(json["film"]["title"], "Heat");
        assert_eq!(json["film"]["rating"], 8.3);

        draft.rating = 0;
        assert!(draft.validate().is_err());
        draft.reset();
        assert_eq!(draft, ReviewDraft::default());
    }
}
