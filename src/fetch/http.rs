// src/fetch/http.rs
// =============================================================================
// HTTP fetching of sitemap documents.
//
// Strategy:
// - Send a GET with the shared reqwest client
// - Treat any non-2xx status as a failed fetch (an error page is not a
//   sitemap, and parsing it would only hide the real problem)
// - Read the whole body as bytes; the XML layer decides what they mean
//
// The Response is owned by fetch() and dropped on every return path, which
// hands the connection back to the client's pool.
// =============================================================================

use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Downloads documents over HTTP.
///
/// Cloning is cheap: the underlying client is reference counted, so every
/// child job of a fan-out can hold its own copy.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// A fetcher using a default `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetcher using a caller-configured client (proxies, headers,
    /// timeouts, TLS roots...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and returns the full response body.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched document");
        Ok(body)
    }
}
