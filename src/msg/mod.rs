//! Response records exchanged with the matching core.
//!
//! # Data Flow
//! ```text
//! matcher / session layer
//!     → Response (types.rs)
//!     → Responder classifies by status / route / kind
//!     → codec.rs encodes to a fixed WIRE_SIZE record
//!     → transport
//!
//! Pending deliveries:
//!     (trader_id, trade_id) → key.rs → i64 registry key
//! ```
//!
//! # Design Decisions
//! - `Response` is `Copy`; the registry stores values, never references
//! - Wire layout is little-endian and fixed size, no framing needed
//! - Unknown enum codes are a decode error, not a silent default

pub mod codec;
pub mod key;
pub mod types;

pub use codec::{DecodeError, WIRE_SIZE};
pub use key::pending_key;
pub use types::{Kind, Response, Route, Status};
