//! Test server harness.

use std::sync::Arc;
use std::time::Duration;

use vidzy::{
    api, Document, DocumentStore, InMemoryDocumentStore, RemoveOutcome, StoreError, UpdateOutcome,
};

/// Bind to port 0 and return the base URL.
pub async fn start_server(store: Arc<dyn DocumentStore>) -> String {
    serve_on_random_port(api::router(store)).await
}

/// Like `start_server`, with the per-request timeout layer applied.
pub async fn start_server_with_timeout(
    store: Arc<dyn DocumentStore>,
    request_timeout: Duration,
) -> String {
    serve_on_random_port(api::app(store, request_timeout)).await
}

async fn serve_on_random_port(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A server over a fresh in-memory store.
pub async fn start_memory_server() -> String {
    start_server(Arc::new(InMemoryDocumentStore::new())).await
}

/// A store whose every call fails, for exercising 500 responses.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "database unavailable",
    ))
}

impl DocumentStore for FailingStore {
    fn find_all(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(unavailable())
    }

    fn find_one(&self, _collection: &str, _id: &str) -> Result<Option<Document>, StoreError> {
        Err(unavailable())
    }

    fn insert(&self, _collection: &str, _doc: Document) -> Result<Document, StoreError> {
        Err(unavailable())
    }

    fn update_fields(
        &self,
        _collection: &str,
        _id: &str,
        _fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(unavailable())
    }

    fn remove(&self, _collection: &str, _id: &str) -> Result<RemoveOutcome, StoreError> {
        Err(unavailable())
    }
}

/// Wraps a store and stalls every read, for exercising the request timeout.
pub struct SlowStore {
    pub inner: InMemoryDocumentStore,
    pub delay: Duration,
}

impl DocumentStore for SlowStore {
    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        std::thread::sleep(self.delay);
        self.inner.find_all(collection)
    }

    fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        std::thread::sleep(self.delay);
        self.inner.find_one(collection, id)
    }

    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        self.inner.insert(collection, doc)
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        self.inner.update_fields(collection, id, fields)
    }

    fn remove(&self, collection: &str, id: &str) -> Result<RemoveOutcome, StoreError> {
        self.inner.remove(collection, id)
    }
}
