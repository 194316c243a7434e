//! Pending-delivery key derivation.

/// Combine a trader id and a trade id into one registry key.
///
/// The trader id occupies the high 32 bits and the trade id the low 32 bits,
/// so distinct pairs never collide.
pub fn pending_key(trader_id: u32, trade_id: u32) -> i64 {
    ((trader_id as i64) << 32) | trade_id as i64
}
