use crate::catalog::{AlbumStore, Library, LibraryEvent};
use anyhow::{Context, Result};
use std::{
    cell::Cell,
    path::{Path, PathBuf},
    rc::Rc,
};

/// A store opened from the library file. Changes are written back on
/// `close` only if the store reported one.
pub struct Session {
    pub store: AlbumStore,
    path: PathBuf,
    changed: Rc<Cell<bool>>,
}

impl Session {
    pub fn open(path: &Path) -> Result<Self> {
        let store = if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let mut store = AlbumStore::new(Library::empty(""));
            store
                .load_data(&json)
                .with_context(|| format!("loading {}", path.display()))?;
            store
        } else {
            log::debug!("{} not found, starting from the seed", path.display());
            AlbumStore::seeded()
        };
        Ok(Self::watch(store, path))
    }

    /// A session whose library is about to be replaced wholesale, so the
    /// current file at `path` is never read.
    pub fn replacing(path: &Path) -> Self {
        Self::watch(AlbumStore::new(Library::empty("")), path)
    }

    fn watch(mut store: AlbumStore, path: &Path) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = changed.clone();
        store.subscribe(move |event: &LibraryEvent, library: &Library| {
            log::debug!("{:?} ({} records)", event, library.metadata.total_records);
            flag.set(true);
        });

        Self {
            store,
            path: path.to_path_buf(),
            changed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed.get()
    }

    pub fn close(self) -> Result<()> {
        if !self.is_changed() {
            return Ok(());
        }
        write_library(&self.store, &self.path)
    }
}

pub fn write_library(store: &AlbumStore, path: &Path) -> Result<()> {
    let json = store.save_data()?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("saved {} records to {}", store.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AlbumPatch;

    #[test]
    fn missing_file_opens_the_seed() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&dir.path().join("albums.json")).unwrap();
        assert_eq!(session.store.len(), 6);
        assert!(!session.is_changed());
    }

    #[test]
    fn unchanged_session_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("albums.json");
        Session::open(&path).unwrap().close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn changes_are_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("albums.json");

        let mut session = Session::open(&path).unwrap();
        session.store.remove_record(1).unwrap();
        session.store.update_record(2, &AlbumPatch::rating(1)).unwrap();
        assert!(session.is_changed());
        session.close().unwrap();

        let reopened = Session::open(&path).unwrap();
        assert_eq!(reopened.store.len(), 5);
        assert_eq!(reopened.store.get(2).unwrap().rating, 1);
    }

    #[test]
    fn replacing_ignores_the_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("albums.json");
        std::fs::write(&path, "{").unwrap();

        let mut session = Session::replacing(&path);
        assert!(session.store.is_empty());
        assert!(!session.is_changed());

        let seed = AlbumStore::seeded().save_data().unwrap();
        session.store.load_data(&seed).unwrap();
        session.close().unwrap();
        assert_eq!(Session::open(&path).unwrap().store.len(), 6);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("albums.json");
        std::fs::write(&path, "{").unwrap();
        assert!(Session::open(&path).is_err());
    }
}
