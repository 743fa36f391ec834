//! Cache store capability for persisted responses
//!
//! This module provides the store the worker writes precached responses into
//! and answers fetches from. The store is an injected capability rather than
//! a global, so install and fetch logic can be tested against the in-memory
//! substitute. The disk store persists one entry per request identity and
//! never expires or evicts anything; a cached response is returned exactly as
//! stored.

mod disk;
mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::net::{Request, Response};

/// A stored response read back from a cache store
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// The response exactly as it was stored
    pub response: Response,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

/// Named key-value store of responses, keyed by request identity
///
/// `put` creates the backing store on first use (create-or-reuse) and
/// overwrites any previous entry with the same identity. `lookup` returns
/// `None` for absent entries and for entries that cannot be read back, so a
/// damaged store degrades to cache misses rather than errors.
pub trait CacheStore {
    /// Persists one entry, overwriting any previous entry for the identity
    fn put(&self, request: &Request, response: &Response) -> std::io::Result<()>;

    /// Returns the stored response for the request identity, if any
    fn lookup(&self, request: &Request) -> Option<CachedResponse>;
}
