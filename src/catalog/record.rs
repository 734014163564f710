use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub type RecordId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    Artist,
    Genre,
    YearPublished,
    Status,
    Rating,
}

impl Field {
    /// Fields a new record must carry, in the order they are checked.
    pub const REQUIRED: [Field; 6] = [
        Field::Title,
        Field::Artist,
        Field::Genre,
        Field::YearPublished,
        Field::Status,
        Field::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Genre => "genre",
            Field::YearPublished => "yearPublished",
            Field::Status => "status",
            Field::Rating => "rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Field::Id),
            "title" => Ok(Field::Title),
            "artist" => Ok(Field::Artist),
            "genre" => Ok(Field::Genre),
            "yearPublished" | "year_published" | "year" => Ok(Field::YearPublished),
            "status" => Ok(Field::Status),
            "rating" => Ok(Field::Rating),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    pub id: RecordId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year_published: u32,
    pub status: String,
    pub rating: u8,
}

impl AlbumRecord {
    pub fn from_new(id: RecordId, album: NewAlbum) -> Self {
        Self {
            id,
            title: album.title,
            artist: album.artist,
            genre: album.genre,
            year_published: album.year_published,
            status: album.status,
            rating: album.rating,
        }
    }

    /// Value of `field` rendered as text, the form searches compare against.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.to_string(),
            Field::Title => self.title.clone(),
            Field::Artist => self.artist.clone(),
            Field::Genre => self.genre.clone(),
            Field::YearPublished => self.year_published.to_string(),
            Field::Status => self.status.clone(),
            Field::Rating => self.rating.to_string(),
        }
    }
}

/// A record that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year_published: u32,
    pub status: String,
    pub rating: u8,
}

/// Untyped inbound shape for record creation: field name to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(Map<String, Value>);

impl Candidate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        self.0.insert(field.as_str().to_string(), value.into());
    }

    #[cfg(test)]
    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.0.remove(field.as_str())
    }

    /// Present and not `null`.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.as_str()).filter(|v| !v.is_null())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<&AlbumRecord> for Candidate {
    fn from(record: &AlbumRecord) -> Self {
        Candidate::new()
            .with(Field::Id, record.id)
            .with(Field::Title, record.title.as_str())
            .with(Field::Artist, record.artist.as_str())
            .with(Field::Genre, record.genre.as_str())
            .with(Field::YearPublished, record.year_published)
            .with(Field::Status, record.status.as_str())
            .with(Field::Rating, record.rating)
    }
}

/// Partial update. Carries no id, so an update can never renumber a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year_published: Option<i64>,
    pub status: Option<String>,
    pub rating: Option<i64>,
}

impl AlbumPatch {
    pub fn rating(rating: i64) -> Self {
        Self {
            rating: Some(rating),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlays the supplied fields onto `candidate`.
    pub fn apply_to(&self, candidate: &mut Candidate) {
        if let Some(title) = &self.title {
            candidate.set(Field::Title, title.as_str());
        }
        if let Some(artist) = &self.artist {
            candidate.set(Field::Artist, artist.as_str());
        }
        if let Some(genre) = &self.genre {
            candidate.set(Field::Genre, genre.as_str());
        }
        if let Some(year) = self.year_published {
            candidate.set(Field::YearPublished, year);
        }
        if let Some(status) = &self.status {
            candidate.set(Field::Status, status.as_str());
        }
        if let Some(rating) = self.rating {
            candidate.set(Field::Rating, rating);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn abbey_road() -> AlbumRecord {
        AlbumRecord {
            id: 2,
            title: "Abbey Road".to_string(),
            artist: "The Beatles".to_string(),
            genre: "Rock".to_string(),
            year_published: 1969,
            status: "listened".to_string(),
            rating: 5,
        }
    }

    #[rstest]
    #[case("title", Field::Title)]
    #[case("yearPublished", Field::YearPublished)]
    #[case("year_published", Field::YearPublished)]
    #[case("rating", Field::Rating)]
    #[case("id", Field::Id)]
    fn parses_field_names(#[case] name: &str, #[case] expected: Field) {
        assert_eq!(name.parse::<Field>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_field_names() {
        assert_eq!(
            "label".parse::<Field>(),
            Err(UnknownField("label".to_string()))
        );
    }

    #[test]
    fn record_serializes_with_camel_case_names_in_order() {
        let json = serde_json::to_string(&abbey_road()).unwrap();
        assert_eq!(
            json,
            r#"{"id":2,"title":"Abbey Road","artist":"The Beatles","genre":"Rock","yearPublished":1969,"status":"listened","rating":5}"#
        );
    }

    #[test]
    fn field_text_renders_numbers() {
        let record = abbey_road();
        assert_eq!(record.field_text(Field::YearPublished), "1969");
        assert_eq!(record.field_text(Field::Rating), "5");
        assert_eq!(record.field_text(Field::Id), "2");
    }

    #[test]
    fn candidate_treats_null_as_absent() {
        let candidate = Candidate::from_json(r#"{"title": null, "artist": "Oasis"}"#).unwrap();
        assert!(candidate.get(Field::Title).is_none());
        assert_eq!(candidate.get(Field::Artist), Some(&json!("Oasis")));
    }

    #[test]
    fn candidate_rejects_non_objects() {
        assert!(Candidate::from_json("[1, 2]").is_err());
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut candidate = Candidate::from(&abbey_road());
        AlbumPatch::rating(4).apply_to(&mut candidate);

        assert_eq!(candidate.get(Field::Rating), Some(&json!(4)));
        assert_eq!(candidate.get(Field::Title), Some(&json!("Abbey Road")));
        assert_eq!(candidate.get(Field::Id), Some(&json!(2)));
    }
}
