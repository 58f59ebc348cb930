//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! target URL (unvalidated)
//!     → client.rs (Fetch trait; HttpFetcher issues a plain GET)
//!     → UpstreamResponse (status, headers, buffered body)
//! ```
//!
//! # Design Decisions
//! - Bodies are fully buffered; there is no streaming threshold
//! - Single attempt; a failure is terminal for the request
//! - The trait seam lets handlers be exercised without a network

pub mod client;

pub use client::{Fetch, HttpFetcher, UpstreamResponse};
