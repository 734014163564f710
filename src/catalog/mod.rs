pub mod library;
pub mod record;
pub mod search;
mod serde_datetime;
pub mod store;
pub mod summary;
pub mod validate;

pub use library::Library;
pub use record::{AlbumPatch, AlbumRecord, Candidate, Field, RecordId};
pub use search::{Criteria, Query};
pub use store::{AlbumStore, LibraryEvent, StoreError};
pub use summary::Summary;
