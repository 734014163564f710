use super::{
    library::{CollectionMetadata, Library},
    record::{AlbumPatch, AlbumRecord, Candidate, RecordId},
    search::{distinct, Criteria, Query},
    summary::Summary,
    validate::{validate, ValidationError},
};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("record id={0} not found")]
    NotFound(RecordId),

    #[error("malformed library document: {0}")]
    MalformedDocument(String),

    #[error("record id={id} in document is invalid: {source}")]
    InvalidRecord {
        id: RecordId,
        source: ValidationError,
    },

    #[error("record id={0} appears more than once in document")]
    DuplicateId(RecordId),

    #[error("no record ids left above {}", RecordId::MAX)]
    IdSpaceExhausted,

    #[error("failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Emitted to observers after every completed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    RecordAdded(RecordId),
    RecordRemoved(RecordId),
    RecordUpdated(RecordId),
    /// The whole library was replaced by a loaded document.
    Loaded,
}

pub trait LibraryObserver {
    fn on_change(&mut self, event: &LibraryEvent, library: &Library);
}

impl<F> LibraryObserver for F
where
    F: FnMut(&LibraryEvent, &Library),
{
    fn on_change(&mut self, event: &LibraryEvent, library: &Library) {
        self(event, library)
    }
}

/// Owns the library and is the only way to change it.
pub struct AlbumStore {
    library: Library,
    observers: Vec<Box<dyn LibraryObserver>>,
}

impl std::fmt::Debug for AlbumStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumStore")
            .field("library", &self.library)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for AlbumStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AlbumStore {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            observers: vec![],
        }
    }

    pub fn seeded() -> Self {
        Self::new(Library::seed())
    }

    pub fn subscribe(&mut self, observer: impl LibraryObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn commit(&mut self, event: LibraryEvent) {
        self.library.touch();
        log::debug!(
            "{:?}: {} records",
            event,
            self.library.metadata.total_records
        );
        self.notify(&event);
    }

    fn notify(&mut self, event: &LibraryEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_change(event, &self.library);
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn records(&self) -> &[AlbumRecord] {
        &self.library.records
    }

    pub fn metadata(&self) -> &CollectionMetadata {
        &self.library.metadata
    }

    pub fn project_name(&self) -> &str {
        &self.library.project_name
    }

    pub fn get(&self, id: RecordId) -> Option<&AlbumRecord> {
        self.library.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.library.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.records.is_empty()
    }

    pub fn add_record(&mut self, candidate: &Candidate) -> Result<RecordId, StoreError> {
        let album = validate(candidate).map_err(|e| {
            log::warn!("Error adding record: {}", e);
            e
        })?;
        let id = self.library.next_id().ok_or_else(|| {
            log::warn!("Error adding record: id space exhausted");
            StoreError::IdSpaceExhausted
        })?;
        self.library.records.push(AlbumRecord::from_new(id, album));
        self.commit(LibraryEvent::RecordAdded(id));
        Ok(id)
    }

    pub fn remove_record(&mut self, id: RecordId) -> Result<AlbumRecord, StoreError> {
        let index = self
            .library
            .position(id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.library.records.remove(index);
        self.commit(LibraryEvent::RecordRemoved(id));
        Ok(removed)
    }

    /// Applies `patch` on top of record `id`. The merged record must pass
    /// the same validation as a new one, otherwise nothing changes.
    pub fn update_record(
        &mut self,
        id: RecordId,
        patch: &AlbumPatch,
    ) -> Result<&AlbumRecord, StoreError> {
        let index = self
            .library
            .position(id)
            .ok_or(StoreError::NotFound(id))?;
        let mut merged = Candidate::from(&self.library.records[index]);
        patch.apply_to(&mut merged);
        let album = validate(&merged).map_err(|e| {
            log::warn!("Error updating record id={}: {}", id, e);
            e
        })?;
        self.library.records[index] = AlbumRecord::from_new(id, album);
        self.commit(LibraryEvent::RecordUpdated(id));
        Ok(&self.library.records[index])
    }

    pub fn search_records(&self, criteria: &Criteria) -> Vec<&AlbumRecord> {
        self.library
            .records
            .iter()
            .filter(|r| criteria.matches(r))
            .collect()
    }

    pub fn query(&self, query: &Query) -> Vec<&AlbumRecord> {
        self.library
            .records
            .iter()
            .filter(|r| query.matches(r))
            .collect()
    }

    pub fn genres(&self) -> Vec<&str> {
        distinct(self.library.records.iter().map(|r| r.genre.as_str()))
    }

    pub fn statuses(&self) -> Vec<&str> {
        distinct(self.library.records.iter().map(|r| r.status.as_str()))
    }

    pub fn generate_summary(&self) -> Summary {
        Summary::of(&self.library.records)
    }

    /// Replaces the whole library with the document in `json`.
    ///
    /// Every record is validated and ids must be unique; on any failure the
    /// current library is left untouched. The record count in the metadata
    /// is re-derived, the timestamp and project name are kept as loaded.
    pub fn load_data(&mut self, json: &str) -> Result<(), StoreError> {
        let mut library: Library = serde_json::from_str(json)
            .map_err(|e| StoreError::MalformedDocument(e.to_string()))?;

        let mut seen = HashSet::new();
        for record in library.records.iter() {
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            validate(&Candidate::from(record)).map_err(|source| StoreError::InvalidRecord {
                id: record.id,
                source,
            })?;
        }

        if library.metadata.total_records != library.records.len() {
            log::warn!(
                "document claims {} records but holds {}",
                library.metadata.total_records,
                library.records.len()
            );
            library.metadata.total_records = library.records.len();
        }

        log::info!(
            "loaded '{}' with {} records",
            library.project_name,
            library.records.len()
        );
        self.library = library;
        self.notify(&LibraryEvent::Loaded);
        Ok(())
    }

    pub fn save_data(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.library)?)
    }
}
