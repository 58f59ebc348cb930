//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, metrics)
//!     → request.rs (request ID, `url` query parameter)
//!     → forward.rs (preflight or upstream fetch)
//!         → cors.rs (Access-Control-* headers)
//!         → policy (Cache-Control from content type)
//!     → response.rs (terminal outcome)
//!     → Send to client
//! ```

pub mod cors;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use cors::CorsHeaders;
pub use forward::Forwarder;
pub use request::{MakeRequestUuid, ProxyQuery, X_REQUEST_ID};
pub use response::Outcome;
pub use server::HttpServer;
