use super::record::{Candidate, Field, NewAlbum};
use serde_json::Value;
use thiserror::Error;

pub const MAX_RATING: u8 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing field: {0}")]
    MissingField(Field),

    #[error("Invalid yearPublished")]
    InvalidYear,

    #[error("Rating must be between 0 and 5")]
    InvalidRating,

    #[error("Invalid {0}: expected non-empty text")]
    InvalidText(Field),
}

/// Checks a candidate and returns the typed album it describes.
///
/// Checks run in a fixed order and the first failure is reported:
/// presence of every required field, then `yearPublished`, then `rating`,
/// then the text fields. Any `id` in the candidate is ignored.
pub fn validate(candidate: &Candidate) -> Result<NewAlbum, ValidationError> {
    for field in Field::REQUIRED {
        if candidate.get(field).is_none() {
            return Err(ValidationError::MissingField(field));
        }
    }

    let year_published = candidate
        .get(Field::YearPublished)
        .and_then(Value::as_u64)
        .and_then(|year| u32::try_from(year).ok())
        .ok_or(ValidationError::InvalidYear)?;

    let rating = candidate
        .get(Field::Rating)
        .and_then(Value::as_u64)
        .and_then(|rating| u8::try_from(rating).ok())
        .filter(|rating| *rating <= MAX_RATING)
        .ok_or(ValidationError::InvalidRating)?;

    let text = |field: Field| -> Result<String, ValidationError> {
        candidate
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ValidationError::InvalidText(field))
    };
    let title = text(Field::Title)?;
    if title.trim().is_empty() {
        return Err(ValidationError::InvalidText(Field::Title));
    }
    let artist = text(Field::Artist)?;
    let genre = text(Field::Genre)?;
    let status = text(Field::Status)?;

    Ok(NewAlbum {
        title,
        artist,
        genre,
        year_published,
        status,
        rating,
    })
}
