//! feedcache library
//!
//! A local content cache that sits between a remote content source and its
//! consumers. Exposes the cache, the remote loader, and the CLI types for
//! use by the binary and integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod error;
pub mod refresh;

pub use error::LoadError;
