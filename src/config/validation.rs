//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Header names and values must be representable on the wire
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::ProxyConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("forwarding.path must start with '/' (got {0:?})")]
    InvalidPath(String),

    #[error("{field}: invalid header name {value:?}")]
    InvalidHeaderName { field: &'static str, value: String },

    #[error("{field}: invalid header value {value:?}")]
    InvalidHeaderValue { field: &'static str, value: String },

    #[error("cache.rules[{0}] needs at least one non-empty substring")]
    EmptyCacheRule(usize),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must exceed timeouts.upstream_secs ({upstream_secs})")]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },

    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let forwarding = &config.forwarding;
    if !forwarding.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(forwarding.path.clone()));
    }
    for name in &forwarding.passthrough_headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName {
                field: "forwarding.passthrough_headers",
                value: name.clone(),
            });
        }
    }
    check_value(&mut errors, "forwarding.default_content_type", &forwarding.default_content_type);
    if let Some(ref content_type) = forwarding.content_type_override {
        check_value(&mut errors, "forwarding.content_type_override", content_type);
    }

    check_value(&mut errors, "cors.allow_origin", &config.cors.allow_origin);
    check_value(&mut errors, "cors.allow_methods", &config.cors.allow_methods);
    check_value(&mut errors, "cors.allow_headers", &config.cors.allow_headers);

    for (i, rule) in config.cache.rules.iter().enumerate() {
        if !rule.contains.iter().any(|needle| !needle.is_empty()) {
            errors.push(ValidationError::EmptyCacheRule(i));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.upstream_secs"));
    }
    // The inbound deadline must leave room for the upstream one to fire first.
    let timeouts = &config.timeouts;
    if timeouts.upstream_secs > 0 && timeouts.request_secs <= timeouts.upstream_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            upstream_secs: timeouts.upstream_secs,
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_value(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if HeaderValue::from_str(value).is_err() {
        errors.push(ValidationError::InvalidHeaderValue {
            field,
            value: value.to_string(),
        });
    }
}
