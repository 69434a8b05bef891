use crate::document::{Collection, Document, DocumentStore, Write};
use crate::{MemoryStore, StoreError};

#[cfg(feature = "firestore")]
use crate::FirestoreStore;

/// The store chosen at startup. `DocumentStore` uses `impl Future` returns,
/// so it cannot be a trait object; this enum stands in for `dyn DocumentStore`.
#[derive(Clone, Debug)]
pub enum AnyStore {
    Memory(MemoryStore),
    #[cfg(feature = "firestore")]
    Firestore(FirestoreStore),
}

impl AnyStore {
    /// Short label for logs and the demo-mode hint.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyStore::Memory(_) => "memory",
            #[cfg(feature = "firestore")]
            AnyStore::Firestore(_) => "firestore",
        }
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(store: MemoryStore) -> Self {
        AnyStore::Memory(store)
    }
}

#[cfg(feature = "firestore")]
impl From<FirestoreStore> for AnyStore {
    fn from(store: FirestoreStore) -> Self {
        AnyStore::Firestore(store)
    }
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            AnyStore::Memory($store) => $call,
            #[cfg(feature = "firestore")]
            AnyStore::Firestore($store) => $call,
        }
    };
}

impl DocumentStore for AnyStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        dispatch!(self, s => s.list(collection).await)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        dispatch!(self, s => s.get(collection, id).await)
    }

    async fn add(&self, collection: Collection, write: Write) -> Result<String, StoreError> {
        dispatch!(self, s => s.add(collection, write).await)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
        merge: bool,
    ) -> Result<(), StoreError> {
        dispatch!(self, s => s.set(collection, id, write, merge).await)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        write: Write,
    ) -> Result<(), StoreError> {
        dispatch!(self, s => s.update(collection, id, write).await)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        dispatch!(self, s => s.delete(collection, id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_variant_delegates() {
        let memory = MemoryStore::new();
        let store = AnyStore::from(memory.clone());
        assert_eq!(store.kind(), "memory");

        let id = store
            .add(Collection::Skills, Write::default().field("title", "Go"))
            .await
            .unwrap();
        let docs = memory.list(Collection::Skills).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
    }
}
