//! In-process content store
//!
//! Keeps the snapshot behind a `RwLock`. Useful when persistence across
//! restarts is not wanted.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::store::{CachedSnapshot, ContentStore, StoreError, StoreOutcome};

/// Keeps the snapshot in process memory; contents are lost on drop
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    snapshot: RwLock<Option<CachedSnapshot>>,
}

impl InMemoryContentStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn retrieve(&self) -> StoreOutcome {
        match self.snapshot.read().await.as_ref() {
            Some(snapshot) => StoreOutcome::Found(snapshot.clone()),
            None => StoreOutcome::Empty,
        }
    }

    async fn insert(&self, snapshot: CachedSnapshot) -> Result<(), StoreError> {
        debug!("Replacing in-memory snapshot with {} items", snapshot.items.len());
        *self.snapshot.write().await = Some(snapshot);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.snapshot.write().await.take();
        Ok(())
    }
}
