//! reqwest-backed implementation of the network capability
//!
//! Performs real HTTP fetches with reqwest's default behavior: no custom
//! timeouts, no retry, redirects per client defaults. The body is read fully
//! into memory, which matches the small app shell resources this tool caches.

use reqwest::Client;

use super::{Network, NetworkError, Request, Response};

/// Live network backend over a reqwest [`Client`]
#[derive(Debug, Clone, Default)]
pub struct HttpNetwork {
    client: Client,
}

impl HttpNetwork {
    /// Creates a new HttpNetwork with a default reqwest client
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new HttpNetwork with a custom reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Network for HttpNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| NetworkError::InvalidMethod(request.method.clone()))?;

        let response = self
            .client
            .request(method, request.url.clone())
            .send()
            .await?;

        let url = response.url().clone();
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            url,
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn test_invalid_method_is_rejected_before_sending() {
        let network = HttpNetwork::new();
        let request = Request {
            method: "NOT A METHOD".to_string(),
            url: Url::parse("http://localhost:81/").unwrap(),
        };

        let result = network.fetch(&request).await;

        match result {
            Err(NetworkError::InvalidMethod(method)) => assert_eq!(method, "NOT A METHOD"),
            other => panic!("Expected InvalidMethod error, got {:?}", other.map(|r| r.status)),
        }
    }

    #[test]
    fn test_default_constructs() {
        let _network = HttpNetwork::default();
    }
}
