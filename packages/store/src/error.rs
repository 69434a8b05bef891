use thiserror::Error;

/// Failure reported by a [`crate::DocumentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, TLS, connection reset, CORS).
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    /// The store has been switched offline (memory store only).
    #[error("document store is offline")]
    Offline,
    /// The store answered with a non-success status.
    #[error("document store returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("could not decode document: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Http { status, .. } => *status == 404,
            _ => false,
        }
    }
}
