//! The forwarding handler: preflight, fetch, header derivation, relay.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::{ConfigError, ProxyConfig, ValidationError};
use crate::error::ProxyError;
use crate::http::cors::CorsHeaders;
use crate::http::request::ProxyQuery;
use crate::http::response::Outcome;
use crate::policy::CachePolicy;
use crate::resilience::with_deadline;
use crate::upstream::{Fetch, UpstreamResponse};

/// Per-process forwarding rules plus the upstream client.
///
/// Built once from [`ProxyConfig`]; shared read-only by every request.
#[derive(Clone)]
pub struct Forwarder {
    fetcher: Arc<dyn Fetch>,
    cors: CorsHeaders,
    preflight: bool,
    passthrough: Vec<HeaderName>,
    default_content_type: HeaderValue,
    content_type_override: Option<HeaderValue>,
    cache: CachePolicy,
    upstream_timeout: Duration,
}

impl Forwarder {
    pub fn from_config(config: &ProxyConfig, fetcher: Arc<dyn Fetch>) -> Result<Self, ConfigError> {
        let forwarding = &config.forwarding;
        let invalid = |err: ValidationError| ConfigError::Validation(vec![err]);

        let passthrough = forwarding
            .passthrough_headers
            .iter()
            .map(|name| {
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| ValidationError::InvalidHeaderName {
                    field: "forwarding.passthrough_headers",
                    value: name.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        let default_content_type = header_value(
            "forwarding.default_content_type",
            &forwarding.default_content_type,
        )
        .map_err(invalid)?;

        let content_type_override = forwarding
            .content_type_override
            .as_deref()
            .map(|v| header_value("forwarding.content_type_override", v))
            .transpose()
            .map_err(invalid)?;

        Ok(Self {
            fetcher,
            cors: CorsHeaders::from_config(&config.cors).map_err(invalid)?,
            preflight: forwarding.preflight,
            passthrough,
            default_content_type,
            content_type_override,
            cache: CachePolicy::new(config.cache.rules.clone()),
            upstream_timeout: Duration::from_secs(config.timeouts.upstream_secs),
        })
    }

    /// Entry point for one inbound request.
    ///
    /// The `url` check runs before the method check, so an `OPTIONS` without
    /// a target is still a 400.
    pub async fn handle(&self, method: &Method, query: &ProxyQuery) -> (Outcome, Response) {
        let url = match query.target_url() {
            Ok(url) => url,
            Err(err) => return (Outcome::from_error(&err), err.into_response()),
        };

        if self.preflight && method == Method::OPTIONS {
            return (Outcome::Preflight, self.preflight());
        }

        match self.forward(url).await {
            Ok(response) => (Outcome::Forwarded, response),
            Err(err) => {
                tracing::error!(target_url = %url, error = %err, "Proxy error");
                (Outcome::from_error(&err), err.into_response())
            }
        }
    }

    /// 204 with the CORS triple and no body.
    pub fn preflight(&self) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        self.cors.apply(response.headers_mut());
        response
    }

    /// Fetch `url` once and relay it with derived headers.
    pub async fn forward(&self, url: &str) -> Result<Response, ProxyError> {
        let upstream = with_deadline(self.upstream_timeout, self.fetcher.fetch(url)).await?;

        if !upstream.status.is_success() {
            return Err(ProxyError::upstream_status(upstream.status));
        }

        Ok(self.relay(upstream))
    }

    fn relay(&self, upstream: UpstreamResponse) -> Response {
        let text_mode = self.content_type_override.is_some();
        let content_type = self
            .content_type_override
            .clone()
            .or_else(|| non_empty(&upstream.headers, &header::CONTENT_TYPE))
            .unwrap_or_else(|| self.default_content_type.clone());
        let directive = self
            .cache
            .select(&String::from_utf8_lossy(content_type.as_bytes()));

        let mut headers = HeaderMap::new();
        self.cors.apply(&mut headers);
        headers.insert(header::CONTENT_TYPE, content_type);
        for name in &self.passthrough {
            // Re-encoded text may not keep the upstream length.
            if text_mode && name == header::CONTENT_LENGTH {
                continue;
            }
            if let Some(value) = non_empty(&upstream.headers, name) {
                headers.insert(name.clone(), value);
            }
        }
        headers.insert(header::CACHE_CONTROL, directive.header_value());

        let body = if text_mode {
            match String::from_utf8_lossy(&upstream.body) {
                Cow::Owned(text) => Bytes::from(text),
                Cow::Borrowed(_) => upstream.body.clone(),
            }
        } else {
            upstream.body
        };

        tracing::debug!(
            content_type = ?headers.get(header::CONTENT_TYPE),
            cache_control = directive.as_str(),
            bytes = body.len(),
            "Relaying upstream response"
        );
        crate::observability::metrics::record_upstream_bytes(body.len());

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = StatusCode::OK;
        *response.headers_mut() = headers;
        response
    }
}

/// An upstream header value, treating an empty one as absent.
fn non_empty(headers: &HeaderMap, name: &HeaderName) -> Option<HeaderValue> {
    headers.get(name).filter(|v| !v.is_empty()).cloned()
}

fn header_value(field: &'static str, value: &str) -> Result<HeaderValue, ValidationError> {
    HeaderValue::from_str(value).map_err(|_| ValidationError::InvalidHeaderValue {
        field,
        value: value.to_string(),
    })
}
