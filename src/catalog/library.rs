use super::{
    record::{AlbumRecord, RecordId},
    serde_datetime,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "My Album Collection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    pub total_records: usize,
    #[serde(with = "serde_datetime")]
    pub last_updated: DateTime<Utc>,
}

/// The serialized document: project label, records in insertion order and
/// metadata derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub project_name: String,
    pub records: Vec<AlbumRecord>,
    pub metadata: CollectionMetadata,
}

impl Library {
    pub fn new(project_name: impl Into<String>, records: Vec<AlbumRecord>) -> Self {
        let metadata = CollectionMetadata {
            total_records: records.len(),
            last_updated: serde_datetime::now(),
        };
        Self {
            project_name: project_name.into(),
            records,
            metadata,
        }
    }

    pub fn empty(project_name: impl Into<String>) -> Self {
        Self::new(project_name, vec![])
    }

    pub fn seed() -> Self {
        let records = [
            ("(What's the Story) Morning Glory?", "Oasis", "Rock", 1995, 4),
            ("Abbey Road", "The Beatles", "Rock", 1969, 5),
            ("Grace", "Jeff Buckley", "Alternative", 1994, 5),
            ("The Queen is Dead", "The Smiths", "Alternative", 1986, 4),
            ("Either/Or", "Elliott Smith", "Alternative", 1997, 5),
            ("Is This It", "The Strokes", "Rock", 2001, 4),
        ]
        .into_iter()
        .zip(1..)
        .map(|((title, artist, genre, year, rating), id)| AlbumRecord {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            genre: genre.to_string(),
            year_published: year,
            status: "listened".to_string(),
            rating,
        })
        .collect();
        Self::new(DEFAULT_PROJECT_NAME, records)
    }

    /// `None` once the highest id is `RecordId::MAX`.
    pub fn next_id(&self) -> Option<RecordId> {
        match self.records.iter().map(|r| r.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Re-derives the metadata after a mutation.
    pub fn touch(&mut self) {
        self.metadata.total_records = self.records.len();
        self.metadata.last_updated = serde_datetime::now();
    }
}
