//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT → shutdown command on the response channel
//!
//! Shutdown (shutdown.rs):
//!     Responder returns → trigger → helper tasks exit
//! ```
//!
//! # Design Decisions
//! - The responder only stops through its own loop, never by task abort
//! - Helper tasks never outlive the responder

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
