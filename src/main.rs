//! shellcache - precache the meeting app shell and serve requests cache-first
//!
//! `install` fetches the four app shell resources from the origin and stores
//! them in the named cache; `fetch` resolves one request cache-first with
//! network fallback, writing the response body to stdout.

use std::io::{self, Write};

use clap::Parser;

use shellcache::cache::DiskStore;
use shellcache::cli::{Cli, Command, RunConfig};
use shellcache::net::HttpNetwork;
use shellcache::worker::{ResponseSource, ShellWorker, CACHE_NAME, PRECACHE_PATHS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli)?;

    let store = match &config.cache_dir {
        Some(root) => DiskStore::with_root(root.clone(), CACHE_NAME),
        None => DiskStore::new(CACHE_NAME).ok_or("could not determine a cache directory")?,
    };
    let worker = ShellWorker::new(store, HttpNetwork::new(), config.origin);

    match cli.command {
        Command::Install => {
            worker.install().await?;
            println!(
                "cached {} app shell resources into {}",
                PRECACHE_PATHS.len(),
                CACHE_NAME
            );
        }
        Command::Fetch { path, method } => {
            let request = worker.request_for(&method, &path)?;
            let (response, source) = worker.handle_fetch(&request).await?;

            let label = match source {
                ResponseSource::Cache => "cache",
                ResponseSource::Network => "network",
            };
            eprintln!("{} {} {}", label, response.status, response.url);

            io::stdout().write_all(&response.body)?;
        }
    }

    Ok(())
}
