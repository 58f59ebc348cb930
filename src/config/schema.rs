//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::policy::CacheRule;

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Forwarding endpoint behavior.
    pub forwarding: ForwardingConfig,

    /// CORS header values.
    pub cors: CorsConfig,

    /// Content-type driven cache policy.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Forwarding endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Route the handler is mounted on.
    pub path: String,

    /// Answer `OPTIONS` with a 204 preflight instead of forwarding.
    pub preflight: bool,

    /// Upstream headers copied verbatim when present.
    pub passthrough_headers: Vec<String>,

    /// Content-Type used when the upstream sends none.
    pub default_content_type: String,

    /// Fixed Content-Type for every response. When set, the body is relayed
    /// as decoded UTF-8 text (the XML-only mode).
    pub content_type_override: Option<String>,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            path: "/proxy".to_string(),
            preflight: true,
            passthrough_headers: vec![
                "content-length".to_string(),
                "accept-ranges".to_string(),
                "content-range".to_string(),
            ],
            default_content_type: "application/octet-stream".to_string(),
            content_type_override: None,
        }
    }
}

/// CORS header values emitted on preflight and success responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, OPTIONS".to_string(),
            allow_headers: "Content-Type, Range".to_string(),
        }
    }
}

/// Cache policy table. Rules are evaluated in order; first match wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub rules: Vec<CacheRule>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rules: CacheRule::defaults(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (total handling time) in seconds.
    pub request_secs: u64,

    /// Upstream fetch-and-buffer deadline in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
