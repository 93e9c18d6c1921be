//! Catalog views derived from a fetched film list.

use crate::models::{Film, Genre};

/// Number of selectable years in the movie filter.
pub const YEAR_OPTIONS: i32 = 30;

/// Films grouped by genre, in first-seen genre order. A film with several
/// genres appears in each group.
pub fn group_by_genre(films: &[Film]) -> Vec<(Genre, Vec<Film>)> {
    let mut groups: Vec<(Genre, Vec<Film>)> = Vec::new();
    for film in films {
        for genre in &film.genres {
            match groups.iter_mut().find(|(g, _)| g.id == genre.id) {
                Some((_, members)) => members.push(film.clone()),
                None => groups.push((genre.clone(), vec![film.clone()])),
            }
        }
    }
    groups
}

/// Up to `limit` other films sharing `film`'s first genre.
pub fn similar_films(film: &Film, candidates: &[Film], limit: usize) -> Vec<Film> {
    let Some(genre) = film.first_genre() else {
        return Vec::new();
    };
    candidates
        .iter()
        .filter(|other| other.id != film.id && other.genres.iter().any(|g| g.id == genre.id))
        .take(limit)
        .cloned()
        .collect()
}

/// `current_year` and the 29 years before it, newest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_OPTIONS).map(|offset| current_year - offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: i64, name: &str) -> Genre {
        Genre { id, name: name.into() }
    }

    fn film(id: i64, genres: Vec<Genre>) -> Film {
        let mut film: Film =
            serde_json::from_str(&format!(r#"{{"id":{id},"title":"Film {id}"}}"#)).unwrap();
        film.genres = genres;
        film
    }

    #[test]
    fn test_group_by_genre() {
        let drama = genre(1, "Drama");
        let crime = genre(2, "Crime");
        let films = vec![
            film(1, vec![crime.clone(), drama.clone()]),
            film(2, vec![drama.clone()]),
            film(3, vec![]),
        ];
        let groups = group_by_genre(&films);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, crime);
        assert_eq!(groups[1].1.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_similar_films() {
        let drama = genre(1, "Drama");
        let target = film(1, vec![drama.clone()]);
        let mut all: Vec<Film> = (1..=7).map(|id| film(id, vec![drama.clone()])).collect();
        all.push(film(8, vec![genre(2, "Crime")]));

        let similar = similar_films(&target, &all, 4);
        assert_eq!(similar.iter().map(|f| f.id).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert!(similar_films(&film(9, vec![]), &all, 4).is_empty());
    }

    #[test]
    fn test_year_options() {
        let years = year_options(2024);
        assert_eq!(years.len(), 30);
        assert_eq!(years[0], 2024);
        assert_eq!(years[29], 1995);
    }
}
