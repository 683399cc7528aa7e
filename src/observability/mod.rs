//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / http / config produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every HTTP trace span
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
