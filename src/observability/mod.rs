//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Responder loop produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (trader_id, trade_id, status) instead of formatted text
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
