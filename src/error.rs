//! Error types for loading content
//!
//! `LoadError` is what every `ContentLoader` reports. Store failures are
//! carried through untranslated so callers can still inspect the I/O or
//! codec error underneath.

use thiserror::Error;

use crate::cache::StoreError;
use crate::data::remote::TransportError;

/// Errors that can occur when loading content from any source
#[derive(Debug, Error)]
pub enum LoadError {
    /// The remote source could not be reached
    #[error("Could not reach content source: {0}")]
    Connectivity(#[source] TransportError),

    /// The remote source answered with something other than a valid item list
    #[error("Invalid data received from content source")]
    InvalidData,

    /// The local store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LoadError {
    /// Returns true if this error came from the transport layer
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}
