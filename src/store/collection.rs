//! Collection - named accessor over a DocumentStore.

use super::{Document, DocumentStore, RemoveOutcome, StoreError, UpdateOutcome};

/// A handle on one collection of a store.
///
/// Provides short method names by delegating to `DocumentStore` with the
/// collection name filled in.
pub struct Collection<'a, S: ?Sized> {
    store: &'a S,
    name: &'a str,
}

impl<'a, S: DocumentStore + ?Sized> Collection<'a, S> {
    pub fn new(store: &'a S, name: &'a str) -> Self {
        Self { store, name }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// All documents in the collection.
    pub fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        self.store.find_all(self.name)
    }

    /// A document by identifier.
    pub fn find_one(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.store.find_one(self.name, id)
    }

    /// Insert a document; the store assigns the identifier.
    pub fn insert(&self, doc: Document) -> Result<Document, StoreError> {
        self.store.insert(self.name, doc)
    }

    /// Merge fields into a document by identifier.
    pub fn update_fields(&self, id: &str, fields: Document) -> Result<UpdateOutcome, StoreError> {
        self.store.update_fields(self.name, id, fields)
    }

    /// Remove a document by identifier.
    pub fn remove(&self, id: &str) -> Result<RemoveOutcome, StoreError> {
        self.store.remove(self.name, id)
    }
}

/// Extension trait for collection access on any DocumentStore.
pub trait CollectionExt: DocumentStore {
    fn collection<'a>(&'a self, name: &'a str) -> Collection<'a, Self> {
        Collection::new(self, name)
    }
}

impl<S: DocumentStore + ?Sized> CollectionExt for S {}
