//! In-memory transport with fault injection.
//!
//! Used to observe responder behavior without a socket: every write call is
//! recorded, closes are counted, and individual write calls can be made to
//! fail or come up short.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::msg::Response;
use crate::transport::{Transport, TransportError};

/// Injected outcome for one write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fail with `kind` after accepting `written` bytes.
    Error { kind: io::ErrorKind, written: usize },
    /// Succeed but accept only `written` bytes.
    Short { written: usize },
}

#[derive(Debug, Default)]
struct Recording {
    attempts: usize,
    accepted: Vec<Vec<u8>>,
    closes: usize,
    faults: HashMap<usize, Fault>,
}

/// Transport half, handed to the responder.
#[derive(Debug)]
pub struct RecordingTransport {
    state: Arc<Mutex<Recording>>,
}

/// Observer half, kept by the test or supervisor.
#[derive(Debug, Clone)]
pub struct RecordingHandle {
    state: Arc<Mutex<Recording>>,
}

impl RecordingTransport {
    pub fn new() -> (Self, RecordingHandle) {
        let state = Arc::new(Mutex::new(Recording::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            RecordingHandle { state },
        )
    }
}

fn lock(state: &Mutex<Recording>) -> MutexGuard<'_, Recording> {
    state.lock().expect("recording transport mutex poisoned")
}

impl Transport for RecordingTransport {
    fn write(&mut self, record: &[u8]) -> Result<usize, TransportError> {
        let mut state = lock(&self.state);
        state.attempts += 1;
        let attempt = state.attempts;

        match state.faults.remove(&attempt) {
            Some(Fault::Error { kind, written }) => {
                Err(TransportError::new(written, io::Error::new(kind, "injected write fault")))
            }
            Some(Fault::Short { written }) => {
                state.accepted.push(record[..written.min(record.len())].to_vec());
                Ok(written)
            }
            None => {
                state.accepted.push(record.to_vec());
                Ok(record.len())
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        lock(&self.state).closes += 1;
        Ok(())
    }
}

impl RecordingHandle {
    /// Total write calls, failed ones included.
    pub fn write_calls(&self) -> usize {
        lock(&self.state).attempts
    }

    /// Decoded records from every complete, successful write.
    pub fn responses(&self) -> Vec<Response> {
        lock(&self.state)
            .accepted
            .iter()
            .filter_map(|bytes| Response::decode(bytes).ok())
            .collect()
    }

    pub fn close_calls(&self) -> usize {
        lock(&self.state).closes
    }

    /// Make the `nth` write call (1-based, counted from creation) fail.
    pub fn fail_write(&self, nth: usize, kind: io::ErrorKind, written: usize) {
        lock(&self.state)
            .faults
            .insert(nth, Fault::Error { kind, written });
    }

    /// Make the `nth` write call accept only `written` bytes.
    pub fn short_write(&self, nth: usize, written: usize) {
        lock(&self.state).faults.insert(nth, Fault::Short { written });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::WIRE_SIZE;

    #[test]
    fn records_writes_and_closes() {
        let (mut transport, handle) = RecordingTransport::new();
        let resp = Response::server_ack(5, 9);

        assert_eq!(transport.write(&resp.encode()).unwrap(), WIRE_SIZE);
        transport.close().unwrap();

        assert_eq!(handle.write_calls(), 1);
        assert_eq!(handle.responses(), vec![resp]);
        assert_eq!(handle.close_calls(), 1);
    }

    #[test]
    fn injected_faults_apply_once() {
        let (mut transport, handle) = RecordingTransport::new();
        handle.fail_write(1, io::ErrorKind::BrokenPipe, 0);
        handle.short_write(2, 10);
        let record = Response::default().encode();

        let err = transport.write(&record).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(transport.write(&record).unwrap(), 10);
        assert_eq!(transport.write(&record).unwrap(), WIRE_SIZE);

        assert_eq!(handle.write_calls(), 3);
        // The short record does not decode.
        assert_eq!(handle.responses().len(), 1);
    }
}
