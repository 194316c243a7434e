//! Outbound reliability subsystem.
//!
//! # Data Flow
//! ```text
//! responses (mpsc) ──▶ classifier.rs
//!                        ├─ Write       → registry.rs (matcher responses)
//!                        │              → Transport::write
//!                        ├─ Acknowledge → registry.rs (remove entry)
//!                        ├─ Shutdown    → close transport, return
//!                        └─ Ignore
//!
//! resend timer ──▶ every registry entry → Transport::write
//!
//! write failure / short write
//!     → escalation.rs (error-tagged copy to supervisor)
//!     → non-temporary network error: return FatalTransport
//! ```
//!
//! # Design Decisions
//! - One task owns the registry and transport; no locks
//! - The resend timer is re-armed after each cycle, so the cadence is
//!   "at least every interval"
//! - Fatal errors are returned, never `process::exit`ed, so the embedding
//!   application picks the termination policy

pub mod classifier;
pub mod engine;
pub mod error;
pub mod escalation;
pub mod registry;

pub use engine::Responder;
pub use classifier::{classify, Action};
pub use error::{ResponderError, ResponderResult};
pub use escalation::{escalation_channel, Delivery, EscalationSink};
pub use registry::PendingRegistry;
