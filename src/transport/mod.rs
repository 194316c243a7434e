//! Outbound byte sink subsystem.
//!
//! # Data Flow
//! ```text
//! Responder (encoded WIRE_SIZE record)
//!     → Transport::write (one call per record)
//!     → Ok(bytes written) | Err(TransportError { written, source })
//!     → error.rs classifies: Temporary | Network (fatal) | Other
//!
//! On loop exit:
//!     → Transport::close (exactly once, skipped on fatal errors)
//! ```
//!
//! # Design Decisions
//! - Writes are synchronous on the responder task; no background writer
//! - A short write is reported as-is so the caller can escalate it
//! - Implementations: generic stream, TCP stream, in-memory recorder

pub mod error;
pub mod recording;
pub mod stream;

use std::io;

pub use error::{ErrorClass, TransportError};
pub use recording::{RecordingHandle, RecordingTransport};
pub use stream::{StreamTransport, TcpTransport};

/// Byte sink owned exclusively by a responder.
pub trait Transport: Send {
    /// Write one encoded record, returning how many bytes were accepted.
    fn write(&mut self, record: &[u8]) -> Result<usize, TransportError>;

    /// Release the underlying sink.
    fn close(&mut self) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, record: &[u8]) -> Result<usize, TransportError> {
        (**self).write(record)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
