mod film_card;
pub use film_card::{FilmCard, FilmGrid};

mod stars;
pub use stars::StarRating;

mod status;
pub use status::{ErrorBanner, FlashNotice, Spinner};
