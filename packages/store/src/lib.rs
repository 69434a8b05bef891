pub mod codec;
pub mod config;
pub mod document;

mod error;
pub use error::StoreError;

mod ids;
pub use ids::auto_id;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "firestore")]
mod firestore;
#[cfg(feature = "firestore")]
pub use firestore::{AccessToken, FirestoreStore};

mod any;
pub use any::AnyStore;

pub use config::{ClubConnectConfig, DataConfig, FirebaseConfig, UiConfig};
pub use document::{Collection, Document, DocumentStore, Fields, Write};
