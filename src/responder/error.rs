//! Responder error definitions.

use thiserror::Error;

use crate::transport::TransportError;

/// Reasons a responder run ends abnormally.
#[derive(Debug, Error)]
pub enum ResponderError {
    /// `run` was called before an endpoint was attached.
    #[error("responder endpoint not attached: {0}")]
    NotWired(&'static str),

    /// The transport failed in a way no later write can recover from.
    /// The transport has not been closed.
    #[error("fatal transport failure: {0}")]
    FatalTransport(#[source] TransportError),
}

/// Result type for responder operations.
pub type ResponderResult<T> = Result<T, ResponderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ResponderError::NotWired("responses").to_string(),
            "responder endpoint not attached: responses"
        );

        let err = ResponderError::FatalTransport(TransportError::new(
            0,
            io::Error::new(io::ErrorKind::BrokenPipe, "peer hung up"),
        ));
        assert!(err.to_string().contains("peer hung up"));
    }
}
