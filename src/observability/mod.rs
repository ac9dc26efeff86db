//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (lookup counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every lookup log line
//! - Metrics are cheap when no exporter is installed

pub mod logging;
pub mod metrics;
