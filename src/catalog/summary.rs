use super::{record::AlbumRecord, search::distinct};
use serde::Serialize;
use std::fmt;

/// Aggregate statistics, derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_albums: usize,
    /// Mean rating rounded to two decimals, `0.0` for an empty collection.
    pub average_rating: f64,
    pub unique_genres: usize,
    pub genres_list: Vec<String>,
}

impl Summary {
    pub fn of(records: &[AlbumRecord]) -> Self {
        let total_albums = records.len();
        let average_rating = if total_albums == 0 {
            0.0
        } else {
            let sum: u64 = records.iter().map(|r| u64::from(r.rating)).sum();
            (sum as f64 / total_albums as f64 * 100.0).round() / 100.0
        };
        let genres_list: Vec<String> = distinct(records.iter().map(|r| r.genre.as_str()))
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            total_albums,
            average_rating,
            unique_genres: genres_list.len(),
            genres_list,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Albums: {}", self.total_albums)?;
        writeln!(f, "Average Rating: {:.2}", self.average_rating)?;
        writeln!(f, "Unique Genres: {}", self.unique_genres)?;
        write!(f, "Genres: {}", self.genres_list.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::library::Library;

    #[test]
    fn summarizes_the_seed() {
        let summary = Summary::of(&Library::seed().records);
        assert_eq!(summary.total_albums, 6);
        assert_eq!(summary.average_rating, 4.5);
        assert_eq!(summary.unique_genres, 2);
        assert_eq!(summary.genres_list, vec!["Rock", "Alternative"]);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let mut records = Library::seed().records;
        records.truncate(3);
        // 4 + 5 + 5 = 14 / 3
        assert_eq!(Summary::of(&records).average_rating, 4.67);
    }

    #[test]
    fn empty_collection() {
        let summary = Summary::of(&[]);
        assert_eq!(summary.total_albums, 0);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.unique_genres, 0);
        assert!(summary.genres_list.is_empty());
        assert!(summary.to_string().contains("Average Rating: 0.00"));
    }

    #[test]
    fn genres_are_case_sensitive() {
        let mut records = Library::seed().records;
        records[0].genre = "rock".to_string();
        assert_eq!(
            Summary::of(&records).genres_list,
            vec!["rock", "Rock", "Alternative"]
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Summary::of(&Library::seed().records)).unwrap();
        assert_eq!(json["totalAlbums"], 6);
        assert_eq!(json["averageRating"], 4.5);
        assert_eq!(json["uniqueGenres"], 2);
    }
}
