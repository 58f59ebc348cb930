//! Proxy error taxonomy.
//!
//! Validation failures (missing `url`) and upstream failures are kept apart
//! internally, but every upstream failure collapses to the same 500 response
//! for the client.

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Prefix of every upstream failure body.
pub const PROXY_ERROR_PREFIX: &str = "Proxy error: ";

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `url` query parameter was absent or empty.
    #[error("Missing url param")]
    MissingParameter,

    /// The upstream answered with a status outside 200-299.
    #[error("Failed to fetch target URL: {reason}")]
    UpstreamStatus { status: StatusCode, reason: String },

    /// DNS, connect, malformed URL or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream did not finish within the configured deadline.
    #[error("Upstream did not respond within {0:?}")]
    Timeout(Duration),
}

impl ProxyError {
    /// Build an [`ProxyError::UpstreamStatus`] carrying the status' reason phrase.
    pub fn upstream_status(status: StatusCode) -> Self {
        Self::UpstreamStatus {
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// True for every failure that happened after the upstream call started.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::MissingParameter)
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_upstream() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    /// Plain-text body sent to the client.
    pub fn body(&self) -> String {
        if self.is_upstream() {
            format!("{PROXY_ERROR_PREFIX}{self}")
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_is_bad_request() {
        let err = ProxyError::MissingParameter;
        assert!(!err.is_upstream());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), "Missing url param");
    }

    #[test]
    fn test_upstream_status_message() {
        let err = ProxyError::upstream_status(StatusCode::NOT_FOUND);
        assert!(err.is_upstream());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), "Proxy error: Failed to fetch target URL: Not Found");
    }

    #[test]
    fn test_timeout_collapses_to_500() {
        let err = ProxyError::Timeout(Duration::from_secs(3));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.body().starts_with(PROXY_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_into_response_is_plain_text() {
        let response = ProxyError::MissingParameter.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Missing url param");
    }
}
