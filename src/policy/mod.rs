//! Response policy subsystem.
//!
//! # Data Flow
//! ```text
//! upstream Content-Type (or configured override/default)
//!     → cache.rs (ordered substring rules)
//!     → CacheDirective
//!     → Cache-Control header on the outbound response
//! ```

pub mod cache;

pub use cache::{CacheDirective, CachePolicy, CacheRule};
