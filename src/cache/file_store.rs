//! File-backed content store
//!
//! Persists the snapshot as one JSON document. Reads run concurrently;
//! inserts and deletes take the gate exclusively. Inserts encode first,
//! write a sibling temp file, flush it, then rename it over the target so
//! the file on disk is always either the old or the new snapshot.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use super::store::{CachedSnapshot, ContentStore, LocalContentItem, StoreError, StoreOutcome};

/// File name used under the default cache directory
const STORE_FILE_NAME: &str = "content.store";

/// On-disk document
#[derive(Debug, Serialize, Deserialize)]
struct StoredCache {
    items: Vec<StoredItem>,
    timestamp: DateTime<Utc>,
}

/// On-disk shape of one item
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    url: Url,
}

impl From<&LocalContentItem> for StoredItem {
    fn from(item: &LocalContentItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            location: item.location.clone(),
            url: item.url.clone(),
        }
    }
}

impl From<StoredItem> for LocalContentItem {
    fn from(item: StoredItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.url,
        }
    }
}

/// Stores the snapshot in a single file on disk
///
/// One instance owns its path; pointing two instances at the same file
/// is not supported.
#[derive(Debug)]
pub struct FileContentStore {
    /// Location of the store file
    path: PathBuf,
    /// Readers share, writers exclude
    gate: RwLock<()>,
}

impl FileContentStore {
    /// Creates a store backed by the file at `path`
    ///
    /// The file and its parent directories are created on first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: RwLock::new(()),
        }
    }

    /// Returns the XDG-compliant default store path
    ///
    /// Uses `~/.cache/feedcache/content.store` on Linux, or the equivalent on
    /// other platforms. Returns `None` if no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "feedcache")?;
        Some(project_dirs.cache_dir().join(STORE_FILE_NAME))
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the scratch file used while replacing the store
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::io(format!("creating {}", dir.display()), e))
    }

    async fn write_replacing(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let temp_path = self.temp_path();

        if let Err(e) = write_synced(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io(
                format!("writing {}", temp_path.display()),
                e,
            ));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io(
                format!("replacing {}", self.path.display()),
                e,
            ));
        }

        let dir = self.parent_dir();
        sync_dir(dir)
            .await
            .map_err(|e| StoreError::io(format!("syncing {}", dir.display()), e))
    }

    /// Directory holding the store file; "." for a bare file name
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// Flushes a directory entry so a completed rename survives a crash
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

/// Directories cannot be opened for syncing on this platform
#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Writes `bytes` to a fresh file and flushes it to disk
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn retrieve(&self) -> StoreOutcome {
        let _guard = self.gate.read().await;

        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store file at {}", self.path.display());
                return StoreOutcome::Empty;
            }
            Err(e) => {
                return StoreOutcome::Failure(StoreError::io(
                    format!("reading {}", self.path.display()),
                    e,
                ))
            }
        };

        match serde_json::from_slice::<StoredCache>(&bytes) {
            Ok(cache) => {
                debug!(
                    "Retrieved {} items cached at {}",
                    cache.items.len(),
                    cache.timestamp
                );
                StoreOutcome::Found(CachedSnapshot::new(
                    cache.items.into_iter().map(LocalContentItem::from).collect(),
                    cache.timestamp,
                ))
            }
            Err(e) => StoreOutcome::Failure(StoreError::Decode(e)),
        }
    }

    async fn insert(&self, snapshot: CachedSnapshot) -> Result<(), StoreError> {
        let _guard = self.gate.write().await;

        let cache = StoredCache {
            items: snapshot.items.iter().map(StoredItem::from).collect(),
            timestamp: snapshot.timestamp,
        };
        // Encode before touching the disk so a failure leaves the old file alone
        let bytes = serde_json::to_vec(&cache).map_err(StoreError::Encode)?;

        self.ensure_parent_dir().await?;
        self.write_replacing(&bytes).await?;

        info!(
            "Stored {} items at {}",
            snapshot.items.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let _guard = self.gate.write().await;

        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Deleted store file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(
                format!("removing {}", self.path.display()),
                e,
            )),
        }
    }
}
