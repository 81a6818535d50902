//! feedcache - Fetch remote content and keep a validated local copy
//!
//! CLI entry point that wires the file store, the cache, and the remote
//! loader together and dispatches to subcommands.

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use feedcache::cache::{ContentCache, ContentStore, FileContentStore};
use feedcache::cli::{log_filter, CacheConfig, Cli, Command};
use feedcache::data::{ContentItem, RemoteContentLoader};
use feedcache::refresh::ContentRefresher;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = CacheConfig::from_cli(&cli)?;
    let store = Arc::new(FileContentStore::new(config.store_path.clone()));
    debug!("Using store at {}", store.path().display());

    let cache = ContentCache::with_system_clock(store.clone());

    match cli.command {
        Command::Fetch { url } => {
            let refresher = ContentRefresher::new(RemoteContentLoader::with_default_client(url), cache);
            let items = refresher.refresh().await?;
            print_items(&items, config.json)?;
        }
        Command::Show => {
            let items = cache.load().await?;
            print_items(&items, config.json)?;
        }
        Command::Validate => {
            cache.validate_cache().await?;
        }
        Command::Clear => {
            store.delete_all().await?;
        }
    }

    Ok(())
}

fn print_items(items: &[ContentItem], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    for item in items {
        println!(
            "{}\t{}\t{}\t{}",
            item.id,
            item.description.as_deref().unwrap_or("-"),
            item.location.as_deref().unwrap_or("-"),
            item.url
        );
    }
    Ok(())
}
