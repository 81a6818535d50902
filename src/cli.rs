//! Command-line interface parsing for feedcache
//!
//! This module handles parsing of CLI arguments using clap and resolving
//! them into a `CacheConfig` the binary can act on.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;
use url::Url;

use crate::cache::FileContentStore;

/// Error types for resolving CLI arguments
#[derive(Debug, Error)]
pub enum CliError {
    /// No --store was given and no user cache directory exists
    #[error("Could not determine a cache directory; pass --store <PATH>")]
    NoCacheDirectory,
}

/// feedcache - Fetch remote content and keep a local copy
#[derive(Parser, Debug)]
#[command(name = "feedcache")]
#[command(about = "Fetch remote content and keep a validated local cache")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path of the cache file
    #[arg(long, global = true, value_name = "PATH", env = "FEEDCACHE_STORE")]
    pub store: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print items as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch items from the source, cache them, and print them
    ///
    /// Falls back to the cached items if the source is unreachable.
    Fetch {
        /// URL of the content source
        #[arg(long, env = "FEEDCACHE_URL")]
        url: Url,
    },
    /// Print cached items if they are still valid
    Show,
    /// Delete the cache if it is expired or unreadable
    Validate,
    /// Delete the cache
    Clear,
}

/// Settings resolved from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Location of the store file
    pub store_path: PathBuf,
    /// Whether to print JSON instead of a table
    pub json: bool,
}

impl CacheConfig {
    /// Creates a CacheConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(CacheConfig)` with the explicit or default store path
    /// * `Err(CliError::NoCacheDirectory)` if no path can be determined
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let store_path = match &cli.store {
            Some(path) => path.clone(),
            None => FileContentStore::default_path().ok_or(CliError::NoCacheDirectory)?,
        };

        Ok(Self {
            store_path,
            json: cli.json,
        })
    }
}

/// Returns the log filter for a `-v` count
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "feedcache=warn",
        1 => "feedcache=info",
        _ => "feedcache=debug",
    }
}
