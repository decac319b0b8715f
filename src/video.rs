//! The video record and the request body used to create or edit one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Document, StoreError};

/// Name of the collection holding video records.
pub const COLLECTION: &str = "videos";

/// A stored video record.
///
/// `title` and `description` are unconstrained; a value the client never
/// supplied is stored as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Video {
    /// Decode a stored document.
    pub fn from_document(doc: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::InvalidDocument {
            collection: COLLECTION.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Body of a create or update request. Any identifier in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl VideoInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    /// The fields this input writes: always exactly `title` and `description`.
    pub fn into_fields(self) -> Document {
        let mut fields = Document::new();
        fields.insert("title".into(), self.title.map_or(Value::Null, Value::String));
        fields.insert(
            "description".into(),
            self.description.map_or(Value::Null, Value::String),
        );
        fields
    }
}
