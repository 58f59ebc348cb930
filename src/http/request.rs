//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Extract the target URL from the `url` query parameter
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The target URL is used as-is; it is never validated or rewritten

use axum::http::{HeaderMap, HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

use crate::error::ProxyError;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Query string accepted by the forwarding route.
#[derive(Debug, Default)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

impl ProxyQuery {
    /// Build from raw query pairs; the first `url` wins, repeats are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            url: pairs
                .into_iter()
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value),
        }
    }

    /// The target URL, or [`ProxyError::MissingParameter`] when absent or empty.
    pub fn target_url(&self) -> Result<&str, ProxyError> {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ProxyError::MissingParameter),
        }
    }
}

/// Generates `x-request-id` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Request ID for log fields, `"unknown"` when missing.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
