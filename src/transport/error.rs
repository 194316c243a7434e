//! Transport write failures and their classification.

use std::io;

use thiserror::Error;

/// How severe a write failure is for the outbound stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Retrying later may succeed (timeouts, interrupted calls).
    Temporary,
    /// The peer connection is gone; nothing written afterwards can arrive.
    Network,
    /// Any other failure, e.g. a filesystem error on a file sink.
    Other,
}

/// A failed write, with the number of bytes accepted before the failure.
#[derive(Debug, Error)]
#[error("transport write failed after {written} bytes: {source}")]
pub struct TransportError {
    pub written: usize,
    #[source]
    pub source: io::Error,
}

impl TransportError {
    pub fn new(written: usize, source: io::Error) -> Self {
        Self { written, source }
    }

    pub fn class(&self) -> ErrorClass {
        classify(self.source.kind())
    }

    /// Non-temporary network failures end the outbound stream for good.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Network
    }
}

impl From<io::Error> for TransportError {
    fn from(source: io::Error) -> Self {
        Self::new(0, source)
    }
}

/// Map an I/O error kind onto an [`ErrorClass`].
pub fn classify(kind: io::ErrorKind) -> ErrorClass {
    use io::ErrorKind::*;

    match kind {
        WouldBlock | TimedOut | Interrupted => ErrorClass::Temporary,
        ConnectionReset | ConnectionAborted | ConnectionRefused | BrokenPipe | NotConnected
        | AddrNotAvailable | UnexpectedEof => ErrorClass::Network,
        _ => ErrorClass::Other,
    }
}
