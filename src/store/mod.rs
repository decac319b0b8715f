//! Document Store - the minimal driver interface the resource router needs.
//!
//! Documents are schema-less JSON objects grouped into named collections and
//! addressed by an opaque identifier stored under [`ID_FIELD`]. The store is
//! authoritative for identifiers: `insert` always assigns a fresh one.
//!
//! ## Example
//!
//! ```ignore
//! use vidzy::store::{CollectionExt, InMemoryDocumentStore};
//! use serde_json::json;
//!
//! let store = InMemoryDocumentStore::new();
//! let videos = store.collection("videos");
//! let doc = videos.insert(json!({ "title": "A" }).as_object().unwrap().clone())?;
//! let loaded = videos.find_one(doc["_id"].as_str().unwrap())?;
//! ```

mod collection;
mod in_memory;
mod json_file;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// A schema-less JSON object.
pub type Document = Map<String, Value>;

/// Result of a field-scoped update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// Number of documents whose identifier matched (0 or 1).
    pub matched: u64,
    /// Number of documents whose stored fields actually changed.
    pub modified: u64,
}

/// Result of a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveOutcome {
    pub removed: u64,
}

/// Error type for document store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A lock guarding storage was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// Serialization/deserialization error.
    Serde(String),
    /// Filesystem error from a persistent store.
    Io(std::io::Error),
    /// A stored document does not have the expected shape.
    InvalidDocument { collection: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::Io(e) => write!(f, "store io error: {}", e),
            StoreError::InvalidDocument { collection, reason } => {
                write!(f, "invalid document in {}: {}", collection, reason)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Abstract document storage, shared across requests.
///
/// Every method is one atomic call against the store. There is no
/// cross-call locking, so concurrent updates to the same document are
/// last-write-wins.
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection, in no particular order.
    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// The document with the given identifier, if any.
    fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Store a new document under a freshly assigned identifier.
    ///
    /// Any identifier already present in `doc` is replaced.
    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// Merge `fields` into an existing document. The identifier never changes
    /// and fields not named in `fields` are preserved.
    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Remove the document with the given identifier.
    fn remove(&self, collection: &str, id: &str) -> Result<RemoveOutcome, StoreError>;
}

/// Generate a new opaque document identifier (32 lowercase hex chars).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub use collection::{Collection, CollectionExt};
pub use in_memory::InMemoryDocumentStore;
pub use json_file::JsonFileStore;
