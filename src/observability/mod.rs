//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler produces:
//!     → logging.rs (structured log events, request ID as a field)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Upstream failures are always logged at error level
//! - Metrics are cheap and disabled unless configured

pub mod logging;
pub mod metrics;
