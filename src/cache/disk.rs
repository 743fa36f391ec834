//! Disk-backed cache store
//!
//! Persists each entry as a pair of files under `<root>/<cache-name>/`: a
//! JSON metadata file (request identity, status, headers, timestamp) and a
//! raw body file. File names are the SHA-1 hex digest of the request
//! identity, so any URL maps to a valid file name. The cache directory is
//! created lazily on first write and reused afterwards; nothing ever deletes
//! a sibling cache name under the same root.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fs;
use std::path::PathBuf;
use url::Url;

use super::{CacheStore, CachedResponse};
use crate::net::{Request, Response};

/// Metadata stored alongside each cached body
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    /// HTTP method of the cached request
    method: String,
    /// Absolute URL of the cached request
    url: Url,
    /// HTTP status of the stored response
    status: u16,
    /// Response headers as ordered name/value pairs
    headers: Vec<(String, String)>,
    /// When the entry was written
    stored_at: DateTime<Utc>,
}

/// Durable cache store writing one metadata + body file pair per entry
///
/// The store is addressed by a cache name (e.g. `meeting-app-v1`); entries
/// for one name live in a directory of that name under the cache root. The
/// root defaults to an XDG-compliant cache directory (`~/.cache/shellcache/`
/// on Linux) and can be overridden for tests or the CLI.
#[derive(Debug, Clone)]
pub struct DiskStore {
    /// Directory that holds one subdirectory per cache name
    root: PathBuf,
    /// Name of the cache this store reads and writes
    name: String,
}

impl DiskStore {
    /// Creates a DiskStore over the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g. no
    /// home directory).
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "shellcache")?;
        let root = project_dirs.cache_dir().to_path_buf();
        Some(Self::with_root(root, name))
    }

    /// Creates a DiskStore with a custom cache root
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_root(root: PathBuf, name: impl Into<String>) -> Self {
        Self {
            root,
            name: name.into(),
        }
    }

    /// Returns the directory holding this cache's entries
    fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Returns the metadata and body file paths for a request identity
    fn entry_paths(&self, request: &Request) -> (PathBuf, PathBuf) {
        let mut hasher = Sha1::new();
        hasher.update(request.identity().as_bytes());
        let digest = format!("{:x}", hasher.finalize());

        let dir = self.cache_dir();
        (
            dir.join(format!("{}.json", digest)),
            dir.join(format!("{}.bin", digest)),
        )
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(self.cache_dir())
    }
}

impl CacheStore for DiskStore {
    fn put(&self, request: &Request, response: &Response) -> std::io::Result<()> {
        self.ensure_dir()?;

        let meta = EntryMeta {
            method: request.method.clone(),
            url: request.url.clone(),
            status: response.status,
            headers: response.headers.clone(),
            stored_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&meta)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let (meta_path, body_path) = self.entry_paths(request);
        fs::write(meta_path, json)?;
        fs::write(body_path, &response.body)
    }

    fn lookup(&self, request: &Request) -> Option<CachedResponse> {
        let (meta_path, body_path) = self.entry_paths(request);
        let content = fs::read_to_string(meta_path).ok()?;
        let meta: EntryMeta = serde_json::from_str(&content).ok()?;
        let body = fs::read(body_path).ok()?;

        Some(CachedResponse {
            response: Response {
                url: meta.url,
                status: meta.status,
                headers: meta.headers,
                body,
            },
            stored_at: meta.stored_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (DiskStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = DiskStore::with_root(temp_dir.path().to_path_buf(), "meeting-app-v1");
        (store, temp_dir)
    }

    fn sample_request(path: &str) -> Request {
        let origin = Url::parse("http://localhost:81").unwrap();
        Request::for_path(&origin, path).expect("valid path")
    }

    fn sample_response(request: &Request, body: &[u8]) -> Response {
        Response {
            url: request.url.clone(),
            status: 200,
            headers: vec![("content-type".to_string(), "text/html".to_string())],
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_put_creates_entry_files_in_cache_directory() {
        let (store, temp_dir) = create_test_store();
        let request = sample_request("/view");
        let response = sample_response(&request, b"<html>view</html>");

        store.put(&request, &response).expect("Put should succeed");

        let cache_dir = temp_dir.path().join("meeting-app-v1");
        assert!(cache_dir.exists(), "Cache directory should exist");

        let entries: Vec<_> = fs::read_dir(&cache_dir)
            .expect("Should read cache dir")
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 2, "Entry should be one meta + one body file");
        assert!(entries.iter().any(|name| name.ends_with(".json")));
        assert!(entries.iter().any(|name| name.ends_with(".bin")));
    }

    #[test]
    fn test_lookup_returns_none_for_missing_entry() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/unknown-path");

        assert!(store.lookup(&request).is_none());
    }

    #[test]
    fn test_put_then_lookup_returns_stored_response() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/view");
        let response = sample_response(&request, b"<html>view</html>");

        store.put(&request, &response).expect("Put should succeed");

        let cached = store.lookup(&request).expect("Entry should exist");
        assert_eq!(cached.response, response);
    }

    #[test]
    fn test_entries_survive_store_reopen() {
        let (store, temp_dir) = create_test_store();
        let request = sample_request("/print");
        let response = sample_response(&request, b"print view");

        store.put(&request, &response).expect("Put should succeed");

        let reopened = DiskStore::with_root(temp_dir.path().to_path_buf(), "meeting-app-v1");
        let cached = reopened.lookup(&request).expect("Entry should persist");
        assert_eq!(cached.response.body, b"print view");
    }

    #[test]
    fn test_cache_names_are_partitioned() {
        let (store, temp_dir) = create_test_store();
        let request = sample_request("/");
        let response = sample_response(&request, b"index");

        store.put(&request, &response).expect("Put should succeed");

        let other = DiskStore::with_root(temp_dir.path().to_path_buf(), "meeting-app-v2");
        assert!(
            other.lookup(&request).is_none(),
            "A different cache name should not see the entry"
        );
    }

    #[test]
    fn test_overwrite_existing_entry() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/view");
        let first = sample_response(&request, b"first");
        let second = sample_response(&request, b"second");

        store.put(&request, &first).expect("First put should succeed");
        store.put(&request, &second).expect("Second put should succeed");

        let cached = store.lookup(&request).expect("Entry should exist");
        assert_eq!(cached.response.body, b"second");
    }

    #[test]
    fn test_corrupt_metadata_reads_as_miss() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/view");
        let response = sample_response(&request, b"view");

        store.put(&request, &response).expect("Put should succeed");

        let (meta_path, _) = store.entry_paths(&request);
        fs::write(&meta_path, "{ not valid json").expect("Should overwrite meta");

        assert!(store.lookup(&request).is_none());
    }

    #[test]
    fn test_missing_body_file_reads_as_miss() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/view");
        let response = sample_response(&request, b"view");

        store.put(&request, &response).expect("Put should succeed");

        let (_, body_path) = store.entry_paths(&request);
        fs::remove_file(&body_path).expect("Should remove body");

        assert!(store.lookup(&request).is_none());
    }

    #[test]
    fn test_method_distinguishes_entries() {
        let (store, _temp_dir) = create_test_store();
        let get = sample_request("/view");
        let post = Request::new("POST", get.url.clone());
        let response = sample_response(&get, b"view");

        store.put(&get, &response).expect("Put should succeed");

        assert!(store.lookup(&get).is_some());
        assert!(store.lookup(&post).is_none());
    }

    #[test]
    fn test_stored_at_timestamp_is_recorded() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/");
        let response = sample_response(&request, b"index");

        let before = Utc::now();
        store.put(&request, &response).expect("Put should succeed");
        let after = Utc::now();

        let cached = store.lookup(&request).expect("Entry should exist");
        assert!(cached.stored_at >= before);
        assert!(cached.stored_at <= after);
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = DiskStore::new("meeting-app-v1") {
            let path_str = store.root.to_string_lossy().into_owned();
            assert!(
                path_str.contains("shellcache"),
                "Cache root should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }

    #[test]
    fn test_empty_body_roundtrips() {
        let (store, _temp_dir) = create_test_store();
        let request = sample_request("/static/manifest.json");
        let response = Response {
            url: request.url.clone(),
            status: 204,
            headers: Vec::new(),
            body: Vec::new(),
        };

        store.put(&request, &response).expect("Put should succeed");

        let cached = store.lookup(&request).expect("Entry should exist");
        assert_eq!(cached.response.status, 204);
        assert!(cached.response.body.is_empty());
    }
}
