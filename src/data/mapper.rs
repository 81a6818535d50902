//! Decoding of remote API responses into content items
//!
//! The source answers `GET` with a JSON body of the form
//! `{ "items": [ { "id", "description"?, "location"?, "image" } ] }`.
//! Anything else (wrong status, wrong shape, a single malformed item) is
//! rejected as a whole.

use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use super::ContentItem;
use crate::error::LoadError;

/// The only status code accepted from the source
const OK_200: u16 = 200;

/// Top-level response body
#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteItem>,
}

/// A single item as the API describes it
#[derive(Debug, Deserialize)]
struct RemoteItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteItem> for ContentItem {
    fn from(item: RemoteItem) -> Self {
        ContentItem::new(item.id, item.description, item.location, item.image)
    }
}

/// Maps a raw response into content items, preserving the API's order
///
/// # Returns
/// * `Ok(Vec<ContentItem>)` if the status is 200 and the body has the expected shape
/// * `Err(LoadError::InvalidData)` otherwise
pub fn map(body: &[u8], status: u16) -> Result<Vec<ContentItem>, LoadError> {
    if status != OK_200 {
        return Err(LoadError::InvalidData);
    }

    let root: Root = serde_json::from_slice(body).map_err(|_| LoadError::InvalidData)?;
    Ok(root.items.into_iter().map(ContentItem::from).collect())
}
