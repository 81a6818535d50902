//! Remote-first content loading with local fallback
//!
//! Fetches from the remote source and caches what it gets. When the remote
//! source is unavailable, serves whatever valid content the cache still
//! holds.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::cache::ContentCache;
use crate::data::{ContentItem, ContentLoader};
use crate::error::LoadError;

/// Combines a remote loader with the local cache
pub struct ContentRefresher<L> {
    /// Loader for fresh content
    remote: L,
    /// Cache for persisting and falling back
    cache: ContentCache,
}

impl<L: ContentLoader> ContentRefresher<L> {
    /// Creates a refresher that fetches from `remote` and caches into `cache`
    pub fn new(remote: L, cache: ContentCache) -> Self {
        Self { remote, cache }
    }

    /// The cache fresh items are saved into
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Loads fresh content, falling back to the cache
    ///
    /// # Behavior
    /// - Fetches from the remote loader
    /// - On success, saves the items to the cache (a failed save is logged)
    ///   and returns them
    /// - On failure, returns the cached items if there are any
    /// - Returns the remote error if the cache is empty, expired, or unreadable
    pub async fn refresh(&self) -> Result<Vec<ContentItem>, LoadError> {
        match self.remote.load().await {
            Ok(items) => {
                if let Err(e) = self.cache.save(&items).await {
                    warn!("Failed to cache {} items: {}", items.len(), e);
                }
                Ok(items)
            }
            Err(remote_error) => {
                warn!("Remote load failed: {}", remote_error);
                match self.cache.load().await {
                    Ok(items) if !items.is_empty() => {
                        info!("Serving {} cached items", items.len());
                        Ok(items)
                    }
                    Ok(_) => Err(remote_error),
                    Err(cache_error) => {
                        warn!("Cache fallback failed: {}", cache_error);
                        Err(remote_error)
                    }
                }
            }
        }
    }
}

#[async_trait]
impl<L: ContentLoader> ContentLoader for ContentRefresher<L> {
    async fn load(&self) -> Result<Vec<ContentItem>, LoadError> {
        self.refresh().await
    }
}
