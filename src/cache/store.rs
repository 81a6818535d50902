//! Persistent store contract
//!
//! A `ContentStore` keeps at most one `CachedSnapshot`. Inserting replaces
//! whatever was there; deleting an empty store is not an error. Stores
//! never retry and never invent timestamps: the snapshot's timestamp is
//! always the one handed to `insert`.

use std::io;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::data::ContentItem;

/// Errors raised by store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or other I/O failure
    #[error("Store I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be encoded
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Persisted bytes could not be decoded
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

impl StoreError {
    /// Wraps an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Store-side record of a content item
///
/// Mirrors `ContentItem` so the store never depends on how consumers
/// shape their domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalContentItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<&ContentItem> for LocalContentItem {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            location: item.location.clone(),
            url: item.url.clone(),
        }
    }
}

impl From<LocalContentItem> for ContentItem {
    fn from(item: LocalContentItem) -> Self {
        ContentItem::new(item.id, item.description, item.location, item.url)
    }
}

/// What was stored and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSnapshot {
    pub items: Vec<LocalContentItem>,
    pub timestamp: DateTime<Utc>,
}

impl CachedSnapshot {
    /// Pairs items with the instant they were cached
    pub fn new(items: Vec<LocalContentItem>, timestamp: DateTime<Utc>) -> Self {
        Self { items, timestamp }
    }
}

/// Result of `ContentStore::retrieve`
#[derive(Debug)]
pub enum StoreOutcome {
    /// Nothing has been stored
    Empty,
    /// A copy of the stored snapshot
    Found(CachedSnapshot),
    /// Reading or decoding failed
    Failure(StoreError),
}

impl StoreOutcome {
    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the snapshot if one was found
    pub fn found(&self) -> Option<&CachedSnapshot> {
        match self {
            Self::Found(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Storage port used by the cache
///
/// Implementations must make `insert` an atomic replace: a concurrent
/// `retrieve` observes either the old snapshot or the new one, never a mix.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns the stored snapshot without side effects
    async fn retrieve(&self) -> StoreOutcome;

    /// Replaces any stored snapshot with `snapshot`
    async fn insert(&self, snapshot: CachedSnapshot) -> Result<(), StoreError>;

    /// Removes the stored snapshot; succeeds if there is none
    async fn delete_all(&self) -> Result<(), StoreError>;
}
