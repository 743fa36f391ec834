//! Request/response model and the network capability
//!
//! This module contains the types shared between the cache store and the
//! worker: an intercepted request (method + absolute URL), the response it
//! resolves to, and the `Network` trait describing one live fetch. The
//! production implementation lives in [`http`]; tests substitute their own.

pub mod http;

pub use http::HttpNetwork;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors that can occur when building or performing a network fetch
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Request URL could not be built
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Method string is not a valid HTTP method
    #[error("Invalid HTTP method: '{0}'")]
    InvalidMethod(String),
}

/// An intercepted request: HTTP method plus absolute URL
///
/// The pair is the full cache-matching identity. Vary headers and request
/// bodies are ignored, matching the default match semantics of the browser
/// cache this store stands in for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method, stored uppercase
    pub method: String,
    /// Absolute request URL
    pub url: Url,
}

impl Request {
    /// Creates a request with an explicit method
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into().to_uppercase(),
            url,
        }
    }

    /// Creates a GET request for the given URL
    pub fn get(url: Url) -> Self {
        Self::new("GET", url)
    }

    /// Creates a GET request for a path resolved against an origin
    ///
    /// # Arguments
    /// * `origin` - Absolute base URL, e.g. `http://localhost:81`
    /// * `path` - Request path, e.g. `/view`
    pub fn for_path(origin: &Url, path: &str) -> Result<Self, NetworkError> {
        Ok(Self::get(origin.join(path)?))
    }

    /// Identity string used for cache matching
    pub fn identity(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// A resolved HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Final URL the response was served from
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Response headers as ordered name/value pairs
    pub headers: Vec<(String, String)>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Whether the status code is in the 2xx success range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability for performing one live network fetch
///
/// The worker is generic over this trait so its fetch handling can be tested
/// against a scripted substitute that records outbound requests.
pub trait Network {
    /// Performs a single fetch for the request, returning whatever the
    /// network yields; success and failure both propagate unmodified.
    fn fetch(&self, request: &Request) -> impl Future<Output = Result<Response, NetworkError>>;
}
