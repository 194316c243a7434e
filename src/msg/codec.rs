//! Fixed-size binary encoding of [`Response`].
//!
//! # Layout (little-endian)
//! ```text
//!  offset  size  field
//!       0     4  kind
//!       4     4  route
//!       8     4  status
//!      12     4  trader_id
//!      16     4  trade_id
//!      20     4  stock_id
//!      24     8  price (signed)
//!      32     8  amount
//! ```

use thiserror::Error;

use crate::msg::types::{Kind, Response, Route, Status};

/// Size in bytes of one encoded response.
pub const WIRE_SIZE: usize = 40;

/// Errors produced while decoding a wire record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record too short: {0} bytes, need {WIRE_SIZE}")]
    Truncated(usize),

    #[error("unknown kind code {0}")]
    Kind(u32),

    #[error("unknown route code {0}")]
    Route(u32),

    #[error("unknown status code {0}")]
    Status(u32),
}

impl Response {
    /// Encode into a fixed-size wire record.
    pub fn encode(&self) -> [u8; WIRE_SIZE] {
        let mut buf = [0u8; WIRE_SIZE];
        buf[0..4].copy_from_slice(&(self.kind as u32).to_le_bytes());
        buf[4..8].copy_from_slice(&(self.route as u32).to_le_bytes());
        buf[8..12].copy_from_slice(&(self.status as u32).to_le_bytes());
        buf[12..16].copy_from_slice(&self.trader_id.to_le_bytes());
        buf[16..20].copy_from_slice(&self.trade_id.to_le_bytes());
        buf[20..24].copy_from_slice(&self.stock_id.to_le_bytes());
        buf[24..32].copy_from_slice(&self.price.to_le_bytes());
        buf[32..40].copy_from_slice(&self.amount.to_le_bytes());
        buf
    }

    /// Decode the first [`WIRE_SIZE`] bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < WIRE_SIZE {
            return Err(DecodeError::Truncated(buf.len()));
        }

        let kind = Kind::try_from(read_u32(buf, 0)).map_err(DecodeError::Kind)?;
        let route = Route::try_from(read_u32(buf, 4)).map_err(DecodeError::Route)?;
        let status = Status::try_from(read_u32(buf, 8)).map_err(DecodeError::Status)?;

        Ok(Self {
            kind,
            route,
            status,
            trader_id: read_u32(buf, 12),
            trade_id: read_u32(buf, 16),
            stock_id: read_u32(buf, 20),
            price: i64::from_le_bytes(read_8(buf, 24)),
            amount: u64::from_le_bytes(read_8(buf, 32)),
        })
    }
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&buf[at..at + 4]);
    u32::from_le_bytes(word)
}

fn read_8(buf: &[u8], at: usize) -> [u8; 8] {
    let mut word = [0u8; 8];
    word.copy_from_slice(&buf[at..at + 8]);
    word
}
