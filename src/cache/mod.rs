//! Local content cache
//!
//! This module decides whether previously fetched content is still usable,
//! replaces stale content atomically, and persists it behind the
//! `ContentStore` port. `FileContentStore` keeps the snapshot in a single
//! JSON file; `InMemoryContentStore` keeps it in process memory.

mod file_store;
mod loader;
mod memory_store;
mod policy;
mod store;

pub use file_store::FileContentStore;
pub use loader::{Clock, ContentCache, LoadResult, SaveResult};
pub use memory_store::InMemoryContentStore;
pub use policy::{CachePolicy, MAX_CACHE_AGE_DAYS};
pub use store::{CachedSnapshot, ContentStore, LocalContentItem, StoreError, StoreOutcome};
