//! # Cloud Firestore over REST
//!
//! [`FirestoreStore`] is the [`DocumentStore`] used when a Firebase project is
//! configured. It speaks the Firestore v1 REST API with `reqwest`, which works
//! both in the browser (fetch) and natively.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET  .../documents/{collection}?pageSize=300[&pageToken=...]`, following `nextPageToken` |
//! | get | `GET  .../documents/{collection}/{id}` (404 → `None`) |
//! | add / set / update | `POST .../documents:commit` with a single write |
//! | delete | `DELETE .../documents/{collection}/{id}` |
//!
//! Writes go through `commit` so that server timestamps can be applied as
//! `updateTransforms` (`setToServerValue: REQUEST_TIME`) in the same write,
//! the way the Firebase SDKs do it. Preconditions map the write modes:
//! `add` requires the document not to exist, `update` requires it to exist,
//! `set` has none. Merging writes carry an `updateMask` with the written fields.
//!
//! Every request carries `?key=<api key>`. When someone is signed in, the
//! identity layer puts their ID token into the shared [`AccessToken`] and it is
//! sent as a bearer token so security rules see the user.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

use crate::codec::{decode_document, encode_fields};
use crate::config::FirebaseConfig;
use crate::document::{Collection, Document, DocumentStore, Write};
use crate::{auto_id, StoreError};

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: &str = "300";

/// Shared slot for the signed-in user's ID token.
#[derive(Clone, Debug, Default)]
pub struct AccessToken(Arc<RwLock<Option<String>>>);

impl AccessToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: Option<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// How a commit write treats an existing document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Fail if the document exists.
    Create,
    /// Replace the whole document.
    Replace,
    /// Merge into the document, creating it when missing.
    Merge,
    /// Merge into the document, failing when missing.
    Update,
}

#[derive(Clone, Debug)]
pub struct FirestoreStore {
    client: Client,
    project_id: String,
    api_key: String,
    token: AccessToken,
}

impl FirestoreStore {
    pub fn new(config: &FirebaseConfig, token: AccessToken) -> Self {
        Self {
            client: Client::new(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            token,
        }
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    pub(crate) fn document_name(&self, collection: Collection, id: &str) -> String {
        format!("{}/documents/{}/{}", self.database_path(), collection, id)
    }

    pub(crate) fn collection_url(&self, collection: Collection) -> String {
        format!("{FIRESTORE_BASE}/{}/documents/{}", self.database_path(), collection)
    }

    pub(crate) fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{FIRESTORE_BASE}/{}", self.document_name(collection, id))
    }

    pub(crate) fn commit_url(&self) -> String {
        format!("{FIRESTORE_BASE}/{}/documents:commit", self.database_path())
    }

    /// Build the `commit` request body for a single write.
    pub(crate) fn commit_body(
        &self,
        collection: Collection,
        id: &str,
        write: &Write,
        mode: WriteMode,
    ) -> Value {
        let mut entry = json!({
            "update": {
                "name": self.document_name(collection, id),
                "fields": encode_fields(&write.fields),
            }
        });

        if matches!(mode, WriteMode::Merge | WriteMode::Update) {
            entry["updateMask"] = json!({ "fieldPaths": write.field_paths() });
        }
        match mode {
            WriteMode::Create => entry["currentDocument"] = json!({ "exists": false }),
            WriteMode::Update => entry["currentDocument"] = json!({ "exists": true }),
            WriteMode::Replace | WriteMode::Merge => {}
        }
        if !write.server_timestamps.is_empty() {
            let transforms: Vec<Value> = write
                .server_timestamps
                .iter()
                .map(|field| json!({ "fieldPath": field, "setToServerValue": "REQUEST_TIME" }))
                .collect();
            entry["updateTransforms"] = Value::Array(transforms);
        }

        json!({ "writes": [entry] })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.query(&[("key", self.api_key.as_str())]);
        match self.token.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Http {
            status,
            message: error_message(&body),
        })
    }

    async fn json(response: Response) -> Result<Value, StoreError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn commit(
        &self,
        collection: Collection,
        id: &str,
        write: &Write,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        let body = self.commit_body(collection, id, write, mode);
        let result = self.send(self.client.post(self.commit_url()).json(&body)).await;
        match result {
            Ok(_) => {
                tracing::debug!("committed {collection}/{id} ({mode:?})");
                Ok(())
            }
            // A failed `exists: true` precondition comes back as 404.
            Err(StoreError::Http { status: 404, .. }) if mode == WriteMode::Update => {
                Err(StoreError::not_found(collection.as_str(), id))
            }
            Err(e) => Err(e),
        }
    }
}

/// Pull the human-readable message out of a Google API error body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Decode one page of a `list` response, returning its documents and the
/// token of the next page.
pub(crate) fn decode_page(page: &Value) -> Result<(Vec<Document>, Option<String>), StoreError> {
    let documents = match page.get("documents") {
        Some(Value::Array(raw)) => raw.iter().map(decode_document).collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };
    let next = page
        .get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Ok((documents, next))
}

impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .client
                .get(self.collection_url(collection))
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let page = Self::json(self.send(request).await?).await?;
            let (mut batch, next) = decode_page(&page)?;
            documents.append(&mut batch);
            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(documents)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let request = self.client.get(self.document_url(collection, id));
        match self.send(request).await {
            Ok(response) => decode_document(&Self::json(response).await?).map(Some),
            Err(StoreError::Http { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn add(&self, collection: Collection, write: Write) -> Result<String, StoreError> {
        let id = auto_id();
        self.commit(collection, &id, &write, WriteMode::Create).await?;
        Ok(id)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
        merge: bool,
    ) -> Result<(), StoreError> {
        let mode = if merge { WriteMode::Merge } else { WriteMode::Replace };
        self.commit(collection, id, &write, mode).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
    ) -> Result<(), StoreError> {
        self.commit(collection, id, &write, WriteMode::Update).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.send(self.client.delete(self.document_url(collection, id)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FirestoreStore {
        let config = FirebaseConfig {
            api_key: "key".to_string(),
            project_id: "clubconnect-test".to_string(),
            ..Default::default()
        };
        FirestoreStore::new(&config, AccessToken::new())
    }

    #[test]
    fn test_urls() {
        let store = store();
        assert_eq!(
            store.collection_url(Collection::Clubs),
            "https://firestore.googleapis.com/v1/projects/clubconnect-test/databases/(default)/documents/clubs"
        );
        assert_eq!(
            store.document_url(Collection::Users, "u1"),
            "https://firestore.googleapis.com/v1/projects/clubconnect-test/databases/(default)/documents/users/u1"
        );
        assert_eq!(
            store.commit_url(),
            "https://firestore.googleapis.com/v1/projects/clubconnect-test/databases/(default)/documents:commit"
        );
    }

    #[test]
    fn test_create_body_has_precondition_and_transform() {
        let write = Write::default()
            .field("name", "Chess Club")
            .field("members", 0)
            .with_server_timestamp("createdAt");
        let body = store().commit_body(Collection::Clubs, "abc", &write, WriteMode::Create);
        let entry = &body["writes"][0];

        assert_eq!(
            entry["update"]["name"],
            json!("projects/clubconnect-test/databases/(default)/documents/clubs/abc")
        );
        assert_eq!(entry["update"]["fields"]["name"], json!({ "stringValue": "Chess Club" }));
        assert_eq!(entry["update"]["fields"]["members"], json!({ "integerValue": "0" }));
        assert_eq!(entry["currentDocument"], json!({ "exists": false }));
        assert_eq!(
            entry["updateTransforms"],
            json!([{ "fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME" }])
        );
        assert!(entry.get("updateMask").is_none());
    }

    #[test]
    fn test_update_body_masks_written_fields() {
        let write = Write::default().field("status", "accepted");
        let body = store().commit_body(Collection::Requests, "r1", &write, WriteMode::Update);
        let entry = &body["writes"][0];
        assert_eq!(entry["updateMask"], json!({ "fieldPaths": ["status"] }));
        assert_eq!(entry["currentDocument"], json!({ "exists": true }));
        assert!(entry.get("updateTransforms").is_none());
    }

    #[test]
    fn test_replace_body_has_no_mask_or_precondition() {
        let write = Write::default().field("bio", "hi");
        let body = store().commit_body(Collection::Users, "u1", &write, WriteMode::Replace);
        let entry = &body["writes"][0];
        assert!(entry.get("updateMask").is_none());
        assert!(entry.get("currentDocument").is_none());
    }

    #[test]
    fn test_decode_page() {
        let page = json!({
            "documents": [
                {
                    "name": "projects/p/databases/(default)/documents/skills/s1",
                    "fields": { "title": { "stringValue": "Rust" } }
                },
                { "name": "projects/p/databases/(default)/documents/skills/s2" },
            ],
            "nextPageToken": "abc",
        });
        let (docs, next) = decode_page(&page).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "s1");
        assert_eq!(next.as_deref(), Some("abc"));

        let (docs, next) = decode_page(&json!({})).unwrap();
        assert!(docs.is_empty());
        assert!(next.is_none());
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "Missing or insufficient permissions.");
        assert_eq!(error_message(" plain text "), "plain text");
    }

    #[test]
    fn test_access_token_is_shared() {
        let token = AccessToken::new();
        let copy = token.clone();
        token.set(Some("id-token".to_string()));
        assert_eq!(copy.get().as_deref(), Some("id-token"));
        token.set(None);
        assert!(copy.get().is_none());
    }
}
