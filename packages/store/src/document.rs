//! # Documents and the document store boundary
//!
//! Every persistent read or write in ClubConnect goes through [`DocumentStore`]:
//! an async interface over named collections of untyped key/value documents.
//! The same view code works against Cloud Firestore ([`crate::FirestoreStore`]),
//! the in-process [`crate::MemoryStore`] (demo mode and tests), or the
//! [`crate::AnyStore`] that picks one of them at startup.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Collection`] | One of the five collections, named after the entity kind it holds. |
//! | [`Document`] | A stored document: its store-assigned id plus a JSON object of fields. No schema is enforced; callers decode with [`Document::decode`] and default defensively. |
//! | [`Write`] | Fields to write, plus the names of fields the store must fill with its own clock (`createdAt`, `updatedAt`). |
//!
//! ## Operations
//!
//! | Method | Behaviour |
//! |--------|-----------|
//! | [`list`](DocumentStore::list) | All documents of a collection, in store order. |
//! | [`get`](DocumentStore::get) | One document, `None` when it does not exist. |
//! | [`add`](DocumentStore::add) | Creates a document under a fresh id and returns the id. |
//! | [`set`](DocumentStore::set) | Writes a document at a known id, merging into existing fields when `merge` is set. |
//! | [`update`](DocumentStore::update) | Merges fields into an existing document; fails with [`StoreError::NotFound`] otherwise. |
//! | [`delete`](DocumentStore::delete) | Removes a document. Deleting a missing document is not an error. |

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::StoreError;

/// Untyped document body.
pub type Fields = Map<String, Value>;

/// Collections known to the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Clubs,
    Skills,
    Requests,
    Leaderboard,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Clubs,
        Collection::Skills,
        Collection::Requests,
        Collection::Leaderboard,
        Collection::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Clubs => "clubs",
            Collection::Skills => "skills",
            Collection::Requests => "requests",
            Collection::Leaderboard => "leaderboard",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode into a typed record. The document id is exposed to the record
    /// as an `id` field, overriding any `id` key stored in the body.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| StoreError::Decode(format!("{}: {e}", self.id)))
    }
}

/// Fields to write plus the fields to stamp with the store's clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Write {
    pub fields: Fields,
    pub server_timestamps: Vec<String>,
}

impl Write {
    pub fn new(fields: Fields) -> Self {
        Self {
            fields,
            server_timestamps: Vec::new(),
        }
    }

    /// Build a write from a serializable record. The record must serialize to
    /// a JSON object; its `id` key, if any, is dropped since ids live in the
    /// document path.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, StoreError> {
        match serde_json::to_value(record).map_err(|e| StoreError::Decode(e.to_string()))? {
            Value::Object(mut fields) => {
                fields.remove("id");
                Ok(Self::new(fields))
            }
            other => Err(StoreError::Decode(format!(
                "expected an object, got {other}"
            ))),
        }
    }

    /// Builder method to set a single field.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Builder method to have the store stamp `field` with its own time.
    pub fn with_server_timestamp(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self.server_timestamps.push(field.to_string());
        self
    }

    /// Top-level field names written by this write, excluding server timestamps.
    pub fn field_paths(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

/// Async interface over the external document database.
pub trait DocumentStore {
    fn list(
        &self,
        collection: Collection,
    ) -> impl std::future::Future<Output = Result<Vec<Document>, StoreError>>;
    fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Document>, StoreError>>;
    fn add(
        &self,
        collection: Collection,
        write: Write,
    ) -> impl std::future::Future<Output = Result<String, StoreError>>;
    fn set(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
        merge: bool,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn update(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn delete(
        &self,
        collection: Collection,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Note {
        id: String,
        #[serde(default)]
        title: String,
    }

    #[test]
    fn test_decode_uses_document_id() {
        let fields = json!({ "id": "stale", "title": "Hi" });
        let doc = Document::new("abc", fields.as_object().cloned().unwrap_or_default());
        let note: Note = doc.decode().unwrap();
        assert_eq!(note.id, "abc");
        assert_eq!(note.title, "Hi");
    }

    #[test]
    fn test_write_from_record_drops_id() {
        let write = Write::from_record(&Note {
            id: "x".into(),
            title: "T".into(),
        })
        .unwrap()
        .with_server_timestamp("createdAt");
        assert!(!write.fields.contains_key("id"));
        assert_eq!(write.field_paths(), vec!["title".to_string()]);
        assert_eq!(write.server_timestamps, vec!["createdAt".to_string()]);
    }

    #[test]
    fn test_server_timestamp_replaces_client_value() {
        let write = Write::default()
            .field("updatedAt", "yesterday")
            .with_server_timestamp("updatedAt");
        assert!(write.fields.is_empty());
    }
}
