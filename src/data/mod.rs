//! Core content model and the loader abstraction
//!
//! `ContentItem` is the value type handed to consumers. Anything that can
//! produce a list of items (the remote API, the local cache, or a
//! combination of both) implements `ContentLoader`.

pub mod mapper;
pub mod remote;

pub use remote::{HttpClient, HttpResponse, RemoteContentLoader, ReqwestHttpClient, TransportError};

use async_trait::async_trait;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::error::LoadError;

/// A single piece of content published by the remote source
///
/// Items are immutable once constructed and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    /// Unique identifier assigned by the source
    pub id: Uuid,
    /// Optional human-readable description
    pub description: Option<String>,
    /// Optional place name associated with the item
    pub location: Option<String>,
    /// Location of the item's resource (typically an image)
    pub url: Url,
}

impl ContentItem {
    /// Creates an item from its parts
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}

/// Anything that can deliver the current list of content items
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Loads items in the order the source provides them
    async fn load(&self) -> Result<Vec<ContentItem>, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_item_equality_is_by_value() {
        let id = Uuid::new_v4();
        let url = Url::parse("https://example.com/a.png").unwrap();

        let a = ContentItem::new(id, Some("a".to_string()), None, url.clone());
        let b = ContentItem::new(id, Some("a".to_string()), None, url);

        assert_eq!(a, b);
    }

    #[test]
    fn test_content_item_serializes_missing_optionals_as_null() {
        let item = ContentItem::new(
            Uuid::nil(),
            None,
            Some("Harbour".to_string()),
            Url::parse("https://example.com/b.png").unwrap(),
        );

        let json = serde_json::to_value(&item).expect("Failed to serialize ContentItem");

        assert!(json["description"].is_null());
        assert_eq!(json["location"], "Harbour");
        assert_eq!(json["url"], "https://example.com/b.png");
    }
}
