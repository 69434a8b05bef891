//! Shared load path of the entity views.
//!
//! Each view reads its whole collection once per mount. A read that fails or
//! comes back empty degrades to the entity's sample dataset (demo mode); the
//! returned [`Listing`] says which one the view is showing.

use serde::de::DeserializeOwned;
use store::config::DataConfig;
use store::{Collection, DocumentStore, StoreError};

use crate::models::{Club, ExchangeRequest, LeaderboardEntry, SkillListing};
use crate::samples;

/// A record kind stored in its own collection.
pub trait Entity: DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Non-empty demo dataset.
    fn samples() -> Vec<Self>;
}

impl Entity for Club {
    const COLLECTION: Collection = Collection::Clubs;

    fn id(&self) -> &str {
        &self.id
    }

    fn samples() -> Vec<Self> {
        samples::clubs()
    }
}

impl Entity for SkillListing {
    const COLLECTION: Collection = Collection::Skills;

    fn id(&self) -> &str {
        &self.id
    }

    fn samples() -> Vec<Self> {
        samples::skills()
    }
}

impl Entity for ExchangeRequest {
    const COLLECTION: Collection = Collection::Requests;

    fn id(&self) -> &str {
        &self.id
    }

    fn samples() -> Vec<Self> {
        samples::requests()
    }
}

impl Entity for LeaderboardEntry {
    const COLLECTION: Collection = Collection::Leaderboard;

    fn id(&self) -> &str {
        &self.id
    }

    fn samples() -> Vec<Self> {
        samples::leaderboard()
    }
}

/// Where the items of a [`Listing`] came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSource {
    #[default]
    Live,
    Sample,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub source: DataSource,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            source: DataSource::Live,
        }
    }
}

impl<T> Listing<T> {
    pub fn live(items: Vec<T>) -> Self {
        Self {
            items,
            source: DataSource::Live,
        }
    }

    pub fn is_sample(&self) -> bool {
        self.source == DataSource::Sample
    }
}

/// What a failed or empty read turns into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    Samples,
    Empty,
}

impl Fallback {
    pub fn from_config(data: &DataConfig) -> Self {
        if data.sample_fallback {
            Fallback::Samples
        } else {
            Fallback::Empty
        }
    }
}

/// Read and decode a whole collection. Documents that do not decode are
/// skipped.
pub async fn load<T: Entity>(store: &impl DocumentStore) -> Result<Vec<T>, StoreError> {
    let documents = store.list(T::COLLECTION).await?;
    Ok(documents
        .iter()
        .filter_map(|doc| match doc.decode::<T>() {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("skipping {}/{}: {e}", T::COLLECTION, doc.id);
                None
            }
        })
        .collect())
}

/// Read a collection, degrading to samples per `fallback`.
pub async fn load_or_sample<T: Entity>(
    store: &impl DocumentStore,
    fallback: Fallback,
) -> Listing<T> {
    let result = load::<T>(store).await;
    let reason = match result {
        Ok(items) if !items.is_empty() => return Listing::live(items),
        Ok(_) => "collection is empty".to_string(),
        Err(e) => e.to_string(),
    };

    match fallback {
        Fallback::Samples => {
            tracing::warn!("showing sample {}: {reason}", T::COLLECTION);
            Listing {
                items: T::samples(),
                source: DataSource::Sample,
            }
        }
        Fallback::Empty => {
            tracing::warn!("showing no {}: {reason}", T::COLLECTION);
            Listing::default()
        }
    }
}
