pub mod store;
pub mod video;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
mod config;

#[cfg(feature = "client")]
pub mod client;

pub use store::{
    Collection, CollectionExt, Document, DocumentStore, InMemoryDocumentStore, JsonFileStore,
    RemoveOutcome, StoreError, UpdateOutcome, ID_FIELD,
};
pub use video::{Video, VideoInput};

#[cfg(feature = "server")]
pub use config::Config;
