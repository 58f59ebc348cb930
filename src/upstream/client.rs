//! Upstream fetch abstraction and its reqwest implementation.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use std::time::Duration;

use crate::error::ProxyError;

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Empty when the status is not a success; the body is never read then.
    pub body: Bytes,
}

/// Anything that can GET a URL and buffer the answer.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<UpstreamResponse, ProxyError>;
}

/// Plain GET over reqwest, no extra request headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(connect_timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<UpstreamResponse, ProxyError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        let body = if status.is_success() {
            response.bytes().await?
        } else {
            Bytes::new()
        };

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_is_transport_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, ProxyError::Transport(_)));
        assert!(err.is_upstream());
    }
}
