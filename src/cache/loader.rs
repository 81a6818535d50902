//! Cache use cases: load, save, and validate
//!
//! `ContentCache` composes a `ContentStore` with `CachePolicy`. It holds
//! no state besides the store and a clock, so every call is independent.
//!
//! The `*_with` variants and `validate_cache` run on a spawned task that
//! only keeps a weak reference to the cache. Dropping the `ContentCache`
//! while such an operation is in flight means its completion is never
//! called.

use std::fmt;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::policy::CachePolicy;
use super::store::{CachedSnapshot, ContentStore, LocalContentItem, StoreError, StoreOutcome};
use crate::data::{ContentItem, ContentLoader};
use crate::error::LoadError;

/// Source of the current instant
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result delivered by `load` and `load_with`
pub type LoadResult = Result<Vec<ContentItem>, LoadError>;

/// Result delivered by `save` and `save_with`
pub type SaveResult = Result<(), StoreError>;

struct Inner {
    store: Arc<dyn ContentStore>,
    clock: Clock,
}

impl Inner {
    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn snapshot_of(&self, items: &[ContentItem]) -> CachedSnapshot {
        CachedSnapshot::new(items.iter().map(LocalContentItem::from).collect(), self.now())
    }

    fn complete_load(&self, outcome: StoreOutcome) -> LoadResult {
        match outcome {
            StoreOutcome::Failure(e) => Err(e.into()),
            StoreOutcome::Found(snapshot) if CachePolicy::validate(snapshot.timestamp, self.now()) => {
                Ok(snapshot.items.into_iter().map(ContentItem::from).collect())
            }
            StoreOutcome::Found(snapshot) => {
                debug!("Cached snapshot from {} has expired", snapshot.timestamp);
                Ok(Vec::new())
            }
            StoreOutcome::Empty => Ok(Vec::new()),
        }
    }

    /// Returns true when the stored state should be wiped
    fn needs_pruning(&self, outcome: &StoreOutcome) -> bool {
        match outcome {
            StoreOutcome::Failure(e) => {
                warn!("Cache could not be read, deleting it: {}", e);
                true
            }
            StoreOutcome::Found(snapshot) => !CachePolicy::validate(snapshot.timestamp, self.now()),
            StoreOutcome::Empty => false,
        }
    }
}

/// Local cache of content items
pub struct ContentCache {
    inner: Arc<Inner>,
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCache").finish_non_exhaustive()
    }
}

impl ContentCache {
    /// Creates a cache over `store` that reads time from `clock`
    pub fn new<F>(store: Arc<dyn ContentStore>, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                store,
                clock: Arc::new(clock),
            }),
        }
    }

    /// Creates a cache using the system clock
    pub fn with_system_clock(store: Arc<dyn ContentStore>) -> Self {
        Self::new(store, Utc::now)
    }

    /// Replaces the cached items, timestamped with the current instant
    ///
    /// The old snapshot is deleted first; if that fails nothing is inserted.
    pub async fn save(&self, items: &[ContentItem]) -> SaveResult {
        self.inner.store.delete_all().await?;
        let snapshot = self.inner.snapshot_of(items);
        self.inner.store.insert(snapshot).await
    }

    /// Returns the cached items if they are still valid
    ///
    /// An absent or expired cache yields an empty list, not an error.
    pub async fn load(&self) -> LoadResult {
        let outcome = self.inner.store.retrieve().await;
        self.inner.complete_load(outcome)
    }

    /// Completion-style `load`
    ///
    /// Must be called from within a Tokio runtime. `completion` runs at
    /// most once, and not at all if this cache is dropped first.
    pub fn load_with<F>(&self, completion: F)
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        let weak = Arc::downgrade(&self.inner);
        let store = Arc::clone(&self.inner.store);

        tokio::spawn(async move {
            let outcome = store.retrieve().await;
            let Some(inner) = weak.upgrade() else {
                debug!("Cache dropped before load completed");
                return;
            };
            completion(inner.complete_load(outcome));
        });
    }

    /// Completion-style `save`
    ///
    /// Must be called from within a Tokio runtime. If the cache is dropped
    /// after the deletion step, the insert is skipped and `completion` is
    /// never called.
    pub fn save_with<F>(&self, items: Vec<ContentItem>, completion: F)
    where
        F: FnOnce(SaveResult) + Send + 'static,
    {
        let weak = Arc::downgrade(&self.inner);
        let store = Arc::clone(&self.inner.store);

        tokio::spawn(async move {
            let deleted = store.delete_all().await;
            let Some(inner) = weak.upgrade() else {
                debug!("Cache dropped before save completed");
                return;
            };
            if let Err(e) = deleted {
                completion(Err(e));
                return;
            }

            let snapshot = inner.snapshot_of(&items);
            drop(inner);
            let inserted = store.insert(snapshot).await;

            if still_alive(&weak) {
                completion(inserted);
            }
        });
    }

    /// Deletes the cache if it is expired or unreadable
    ///
    /// Runs in the background; the returned handle only reports that the
    /// sweep finished. Errors from the deletion are logged and dropped.
    pub fn validate_cache(&self) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        let store = Arc::clone(&self.inner.store);

        tokio::spawn(async move {
            let outcome = store.retrieve().await;
            let prune = match weak.upgrade() {
                Some(inner) => inner.needs_pruning(&outcome),
                None => return,
            };

            if prune {
                match store.delete_all().await {
                    Ok(()) => info!("Pruned invalid cache"),
                    Err(e) => warn!("Failed to prune invalid cache: {}", e),
                }
            }
        })
    }
}

fn still_alive(weak: &Weak<Inner>) -> bool {
    weak.strong_count() > 0
}

#[async_trait]
impl ContentLoader for ContentCache {
    async fn load(&self) -> Result<Vec<ContentItem>, LoadError> {
        ContentCache::load(self).await
    }
}
