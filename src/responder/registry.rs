//! Pending-delivery registry.
//!
//! Holds the last matcher response sent for each (trader, trade) pair until
//! the client acknowledges it. Entries never expire on their own.

use std::collections::HashMap;

use crate::msg::{pending_key, Response, Route};

#[derive(Debug, Default)]
pub struct PendingRegistry {
    entries: HashMap<i64, Response>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matcher response as awaiting acknowledgment.
    ///
    /// Overwrites any earlier entry for the same key. Returns `false`, and
    /// leaves the registry untouched, for every other route.
    pub fn register(&mut self, resp: &Response) -> bool {
        if resp.route != Route::MatcherResponse {
            return false;
        }
        self.entries
            .insert(pending_key(resp.trader_id, resp.trade_id), *resp);
        true
    }

    /// Remove the entry for this pair, if any.
    pub fn acknowledge(&mut self, trader_id: u32, trade_id: u32) -> Option<Response> {
        self.entries.remove(&pending_key(trader_id, trade_id))
    }

    pub fn get(&self, trader_id: u32, trade_id: u32) -> Option<&Response> {
        self.entries.get(&pending_key(trader_id, trade_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of every pending response, in no particular order.
    pub fn snapshot(&self) -> Vec<Response> {
        self.entries.values().copied().collect()
    }
}
