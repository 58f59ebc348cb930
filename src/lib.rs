//! CORS forwarding proxy.
//!
//! Fetches a caller-supplied URL and relays it from a same-origin endpoint,
//! adding CORS headers and a Cache-Control policy derived from the upstream
//! content type.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /proxy?url=...        ┌──────────┐    ┌───────────┐    ┌──────────┐
//!    ──────────────────────────▶│  http    │───▶│ forwarder │───▶│ upstream │───▶ Origin
//!                               │  server  │    │           │    │  fetch   │
//!    ◀──────────────────────────│          │◀───│ cors +    │◀───│ (buffer) │◀───
//!     200 / 204 / 400 / 500     └──────────┘    │ policy    │    └──────────┘
//!                                               └───────────┘
//!     config · observability · resilience (deadline) · lifecycle
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod policy;
pub mod resilience;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
