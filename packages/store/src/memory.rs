use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::document::{Collection, Document, DocumentStore, Write};
use crate::{auto_id, StoreError};

/// In-memory DocumentStore for demo mode and testing.
///
/// Collections keep insertion order. Clones share the same data, so a clone
/// handed to a view sees writes made through any other clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<Collection, Vec<Document>>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of a collection.
    pub fn seed(&self, collection: Collection, documents: Vec<Document>) {
        self.lock().insert(collection, documents);
    }

    /// Make every subsequent call fail with [`StoreError::Offline`], modelling
    /// an unreachable backend.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Collection, Vec<Document>>> {
        self.collections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.is_offline() {
            Err(StoreError::Offline)
        } else {
            Ok(())
        }
    }

    fn materialize(write: Write) -> crate::Fields {
        let mut fields = write.fields;
        if !write.server_timestamps.is_empty() {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            for field in write.server_timestamps {
                fields.insert(field, Value::String(now.clone()));
            }
        }
        fields
    }
}

impl DocumentStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        self.check_online()?;
        Ok(self.lock().get(&collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        Ok(self
            .lock()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn add(&self, collection: Collection, write: Write) -> Result<String, StoreError> {
        self.check_online()?;
        let id = auto_id();
        let fields = Self::materialize(write);
        self.lock()
            .entry(collection)
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
        merge: bool,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        let fields = Self::materialize(write);
        let mut collections = self.lock();
        let docs = collections.entry(collection).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) if merge => existing.fields.extend(fields),
            Some(existing) => existing.fields = fields,
            None => docs.push(Document::new(id, fields)),
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        let fields = Self::materialize(write);
        let mut collections = self.lock();
        let existing = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::not_found(collection.as_str(), id))?;
        existing.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        if let Some(docs) = self.lock().get_mut(&collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn club(name: &str) -> Write {
        Write::default().field("name", name).field("members", 0)
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let store = MemoryStore::new();

        // Initially empty
        assert!(store.list(Collection::Clubs).await.unwrap().is_empty());

        let first = store.add(Collection::Clubs, club("Chess")).await.unwrap();
        let second = store.add(Collection::Clubs, club("Debate")).await.unwrap();
        assert_ne!(first, second);

        let docs = store.list(Collection::Clubs).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, first);
        assert_eq!(docs[0].fields["name"], json!("Chess"));
        assert_eq!(docs[1].fields["name"], json!("Debate"));

        // Other collections are untouched
        assert!(store.list(Collection::Skills).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_timestamp_is_filled() {
        let store = MemoryStore::new();
        let id = store
            .add(Collection::Clubs, club("Chess").with_server_timestamp("createdAt"))
            .await
            .unwrap();

        let doc = store.get(Collection::Clubs, &id).await.unwrap().unwrap();
        let stamp = doc.fields["createdAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let write = Write::default().field("status", "pending").field("from", "Priya");
        let id = store.add(Collection::Requests, write).await.unwrap();

        store
            .update(Collection::Requests, &id, Write::default().field("status", "accepted"))
            .await
            .unwrap();

        let doc = store.get(Collection::Requests, &id).await.unwrap().unwrap();
        assert_eq!(doc.fields["status"], json!("accepted"));
        assert_eq!(doc.fields["from"], json!("Priya"));
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryStore::new();
        let err = store
            .update(Collection::Requests, "r1", Write::default().field("status", "accepted"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_set_with_and_without_merge() {
        let store = MemoryStore::new();
        store
            .set(
                Collection::Users,
                "u1",
                Write::default().field("bio", "hi").field("displayName", "Ann"),
                false,
            )
            .await
            .unwrap();

        store
            .set(Collection::Users, "u1", Write::default().field("bio", "hello"), true)
            .await
            .unwrap();
        let doc = store.get(Collection::Users, "u1").await.unwrap().unwrap();
        assert_eq!(doc.fields["bio"], json!("hello"));
        assert_eq!(doc.fields["displayName"], json!("Ann"));

        store
            .set(Collection::Users, "u1", Write::default().field("bio", "reset"), false)
            .await
            .unwrap();
        let doc = store.get(Collection::Users, "u1").await.unwrap().unwrap();
        assert!(!doc.fields.contains_key("displayName"));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let first = store.add(Collection::Clubs, club("First")).await.unwrap();
        store.add(Collection::Clubs, club("Second")).await.unwrap();

        store.delete(Collection::Clubs, &first).await.unwrap();

        let docs = store.list(Collection::Clubs).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].fields["name"], json!("Second"));

        // Deleting again is not an error
        store.delete(Collection::Clubs, &first).await.unwrap();
    }

    #[tokio::test]
    async fn test_offline_store_rejects_everything() {
        let store = MemoryStore::new();
        store.add(Collection::Clubs, club("Chess")).await.unwrap();
        store.set_offline(true);

        assert_eq!(store.list(Collection::Clubs).await, Err(StoreError::Offline));
        assert_eq!(store.add(Collection::Clubs, club("Go")).await, Err(StoreError::Offline));

        store.set_offline(false);
        assert_eq!(store.list(Collection::Clubs).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::new();
        let view_copy = store.clone();
        store.add(Collection::Skills, Write::default().field("title", "Rust")).await.unwrap();
        assert_eq!(view_copy.list(Collection::Skills).await.unwrap().len(), 1);
    }
}
