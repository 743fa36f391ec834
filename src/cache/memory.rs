//! In-memory cache store
//!
//! A `HashMap`-backed substitute for the disk store, used by unit tests and
//! available to embedders that don't want durable storage.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{CacheStore, CachedResponse};
use crate::net::{Request, Response};

/// Cache store keeping entries in memory, keyed by request identity
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CachedResponse>>,
}

impl MemoryStore {
    /// Creates an empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache store lock poisoned").len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryStore {
    fn put(&self, request: &Request, response: &Response) -> std::io::Result<()> {
        let entry = CachedResponse {
            response: response.clone(),
            stored_at: Utc::now(),
        };
        self.entries
            .lock()
            .expect("cache store lock poisoned")
            .insert(request.identity(), entry);
        Ok(())
    }

    fn lookup(&self, request: &Request) -> Option<CachedResponse> {
        self.entries
            .lock()
            .expect("cache store lock poisoned")
            .get(&request.identity())
            .cloned()
    }
}
