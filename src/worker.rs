//! Shell worker: install-time precache and cache-first fetch handling
//!
//! This module contains the two operations the tool exists for. `install`
//! resolves a fixed list of app shell paths against the origin, fetches them
//! all, and persists them into the named cache — all or nothing, like the
//! bulk add of the browser cache API it mirrors. `handle_fetch` answers a
//! request from the cache when a matching entry exists and otherwise passes
//! it through to the network, returning whatever the network yields.
//!
//! Each operation is stateless apart from the shared store; there is no
//! retry, no refresh of cached entries, and no fallback response on a failed
//! network fetch.

use futures::future::try_join_all;
use thiserror::Error;
use url::Url;

use crate::cache::CacheStore;
use crate::net::{Network, NetworkError, Request, Response};

/// Name of the cache generation written by install
///
/// Bumping the version suffix creates a fresh cache directory; nothing
/// cleans up the previous one.
pub const CACHE_NAME: &str = "meeting-app-v1";

/// App shell paths fetched at install time, resolved against the origin
pub const PRECACHE_PATHS: [&str; 4] = ["/", "/view", "/print", "/static/manifest.json"];

/// Errors that can fail an install
#[derive(Debug, Error)]
pub enum InstallError {
    /// A precache resource could not be fetched
    #[error("Failed to precache {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: NetworkError,
    },

    /// A precache resource answered with a non-success status
    #[error("Precache fetch for {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    /// Writing an entry to the cache store failed
    #[error("Failed to store cache entry: {0}")]
    Store(#[from] std::io::Error),
}

/// Where a fetched response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// Answered from the cache store without touching the network
    Cache,
    /// Answered by a live network fetch
    Network,
}

/// Cache-first worker over injected store and network capabilities
///
/// Generic over [`CacheStore`] and [`Network`] so both operations can be
/// exercised in tests with an in-memory store and a scripted network.
#[derive(Debug)]
pub struct ShellWorker<S, N> {
    store: S,
    network: N,
    origin: Url,
}

impl<S: CacheStore, N: Network> ShellWorker<S, N> {
    /// Creates a worker serving the given origin
    pub fn new(store: S, network: N, origin: Url) -> Self {
        Self {
            store,
            network,
            origin,
        }
    }

    /// The origin shell paths are resolved against
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Builds a request for a path resolved against the worker's origin
    pub fn request_for(&self, method: &str, path: &str) -> Result<Request, NetworkError> {
        Ok(Request::new(method, self.origin.join(path)?))
    }

    /// Populates the cache with every app shell resource, all or nothing
    ///
    /// All paths are fetched concurrently; entries are written only after the
    /// whole batch has come back successful, so a failed fetch leaves the
    /// store untouched. Any network error or non-success status fails the
    /// install. There is no retry and no partial-success reporting.
    pub async fn install(&self) -> Result<(), InstallError> {
        let fetches = PRECACHE_PATHS.iter().map(|&path| async move {
            let request = Request::for_path(&self.origin, path).map_err(|source| {
                InstallError::Fetch {
                    path: path.to_string(),
                    source,
                }
            })?;

            let response =
                self.network
                    .fetch(&request)
                    .await
                    .map_err(|source| InstallError::Fetch {
                        path: path.to_string(),
                        source,
                    })?;

            if !response.is_success() {
                return Err(InstallError::Status {
                    path: path.to_string(),
                    status: response.status,
                });
            }

            Ok((request, response))
        });

        let fetched = try_join_all(fetches).await?;

        for (request, response) in &fetched {
            self.store.put(request, response)?;
        }

        Ok(())
    }

    /// Answers one request: cached response on a hit, one live fetch on a miss
    ///
    /// The cached response is returned exactly as stored and the network is
    /// not touched. On a miss the result of the single network fetch is
    /// returned unmodified — a failure propagates to the caller the same way
    /// an unintercepted fetch failure would, and the store is not updated.
    pub async fn handle_fetch(
        &self,
        request: &Request,
    ) -> Result<(Response, ResponseSource), NetworkError> {
        if let Some(hit) = self.store.lookup(request) {
            return Ok((hit.response, ResponseSource::Cache));
        }

        let response = self.network.fetch(request).await?;
        Ok((response, ResponseSource::Network))
    }
}
