//! JsonFileStore - in-memory store persisted to a single JSON file.
//!
//! File layout: `{ "<collection>": [document, ...], ... }`. The whole file is
//! rewritten after every mutating call, via a temp file and rename so a crash
//! mid-write never leaves a truncated file behind. If the write fails the
//! mutation is rolled back, so memory never holds a change the file lacks.
//!
//! All calls do blocking file IO; async callers should run them on a blocking
//! thread (the resource router does).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use super::{
    Document, DocumentStore, InMemoryDocumentStore, RemoveOutcome, StoreError, UpdateOutcome,
};

pub struct JsonFileStore {
    inner: InMemoryDocumentStore,
    path: PathBuf,
    // Held for mutate + persist, so writers see and write a consistent state.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = match fs::read(&path) {
            Ok(bytes) => {
                let data: HashMap<String, Vec<Document>> = serde_json::from_slice(&bytes)?;
                let count: usize = data.values().map(Vec::len).sum();
                info!(path = %path.display(), documents = count, "loaded document store");
                InMemoryDocumentStore::from_collections(data)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "document store file not found, starting empty");
                InMemoryDocumentStore::new()
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            inner,
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` and persist the result. When `changed` says nothing
    /// changed the file is left alone; when the write fails the store is
    /// restored to its state before `mutate`.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&InMemoryDocumentStore) -> Result<T, StoreError>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("commit"))?;

        let before = self.inner.snapshot()?;
        let result = mutate(&self.inner)?;
        if !changed(&result) {
            return Ok(result);
        }

        if let Err(e) = self.write_file() {
            warn!(path = %self.path.display(), error = %e, "persist failed, rolling back");
            self.inner.restore(before)?;
            return Err(e);
        }
        Ok(result)
    }

    fn write_file(&self) -> Result<(), StoreError> {
        let snapshot = self.inner.snapshot()?;
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "persisted document store");

        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.inner.find_all(collection)
    }

    fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.find_one(collection, id)
    }

    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        self.commit(|inner| inner.insert(collection, doc), |_| true)
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        self.commit(
            |inner| inner.update_fields(collection, id, fields),
            |outcome| outcome.modified > 0,
        )
    }

    fn remove(&self, collection: &str, id: &str) -> Result<RemoveOutcome, StoreError> {
        self.commit(
            |inner| inner.remove(collection, id),
            |outcome| outcome.removed > 0,
        )
    }
}
