//! Replay of recorded responses into a running responder.
//!
//! A replay file is a plain concatenation of `WIRE_SIZE` records, the same
//! bytes a responder writes to its transport.

use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::msg::{DecodeError, Response, WIRE_SIZE};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay file: {0}")]
    Io(#[from] io::Error),

    #[error("record {index} is invalid: {source}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("replay file ends with {0} bytes of a partial record")]
    Trailing(usize),
}

/// Split a byte buffer into responses.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Response>, ReplayError> {
    let chunks = bytes.chunks_exact(WIRE_SIZE);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        return Err(ReplayError::Trailing(trailing));
    }

    chunks
        .enumerate()
        .map(|(index, chunk)| {
            Response::decode(chunk).map_err(|source| ReplayError::Decode { index, source })
        })
        .collect()
}

pub fn read_records(path: &Path) -> Result<Vec<Response>, ReplayError> {
    decode_records(&std::fs::read(path)?)
}

/// Feed `records` to the responder, wait `linger`, then ask it to stop.
///
/// The linger period leaves time for resend cycles to run before shutdown.
/// Returns the number of records delivered to the channel.
pub async fn replay(
    records: Vec<Response>,
    responses: mpsc::Sender<Response>,
    linger: Duration,
) -> usize {
    let total = records.len();
    let mut sent = 0;

    for resp in records {
        if responses.send(resp).await.is_err() {
            tracing::warn!(sent, total, "Responder stopped before replay finished");
            return sent;
        }
        sent += 1;
    }

    tracing::info!(sent, linger = ?linger, "Replay finished");
    tokio::time::sleep(linger).await;
    if responses.send(Response::shutdown()).await.is_err() {
        tracing::debug!("Responder already stopped");
    }
    sent
}
