//! Outbound reliability layer for a trading engine's client connections.
//!
//! A [`Responder`] takes trade responses from the matching core, writes them
//! to a byte transport, keeps every matcher response until the client
//! acknowledges it, and rewrites the unacknowledged ones on a fixed cadence.
//! Failed writes are escalated to a supervisor as error-tagged copies.

pub mod config;
pub mod lifecycle;
pub mod msg;
pub mod observability;
pub mod replay;
pub mod responder;
pub mod supervisor;
pub mod transport;

pub use config::Config;
pub use lifecycle::Shutdown;
pub use msg::Response;
pub use responder::{Responder, ResponderError};
