//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::debug;

use super::{
    new_id, Document, DocumentStore, RemoveOutcome, StoreError, UpdateOutcome, ID_FIELD,
};

type Collections = HashMap<String, HashMap<String, Document>>;

/// In-memory document store.
///
/// Collections map identifier to document. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a store from previously persisted collections.
    ///
    /// Documents without a string identifier, or sharing one, are rejected.
    pub(crate) fn from_collections(
        data: HashMap<String, Vec<Document>>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            collections: Arc::new(RwLock::new(index(data)?)),
        })
    }

    /// Replace every collection with `data`, e.g. to roll back a failed write.
    pub(crate) fn restore(&self, data: HashMap<String, Vec<Document>>) -> Result<(), StoreError> {
        let indexed = index(data)?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned("restore"))?;
        *collections = indexed;
        Ok(())
    }

    /// Copy of every collection, for persistence.
    pub(crate) fn snapshot(&self) -> Result<HashMap<String, Vec<Document>>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned("snapshot"))?;

        Ok(collections
            .iter()
            .map(|(name, docs)| (name.clone(), docs.values().cloned().collect()))
            .collect())
    }
}

fn index(data: HashMap<String, Vec<Document>>) -> Result<Collections, StoreError> {
    let mut collections = Collections::new();
    for (name, docs) in data {
        let entries = collections.entry(name.clone()).or_default();
        for doc in docs {
            let id = doc
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .ok_or_else(|| StoreError::InvalidDocument {
                    collection: name.clone(),
                    reason: format!("missing string {}", ID_FIELD),
                })?
                .to_string();
            if entries.contains_key(&id) {
                return Err(StoreError::InvalidDocument {
                    collection: name,
                    reason: format!("duplicate {} {}", ID_FIELD, id),
                });
            }
            entries.insert(id, doc);
        }
    }
    Ok(collections)
}

impl DocumentStore for InMemoryDocumentStore {
    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_all"))?;

        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_one"))?;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn insert(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        let docs = collections.entry(collection.to_string()).or_default();
        let mut id = new_id();
        while docs.contains_key(&id) {
            id = new_id();
        }

        doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        docs.insert(id.clone(), doc.clone());
        debug!(collection, id = %id, "inserted document");

        Ok(doc)
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned("update_fields"))?;

        let Some(doc) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            });
        };

        let mut changed = false;
        for (key, value) in fields {
            if key == ID_FIELD {
                continue;
            }
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                changed = true;
            }
        }
        debug!(collection, id, changed, "updated document fields");

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    fn remove(&self, collection: &str, id: &str) -> Result<RemoveOutcome, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned("remove"))?;

        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some();
        debug!(collection, id, removed, "removed document");

        Ok(RemoveOutcome {
            removed: u64::from(removed),
        })
    }
}
