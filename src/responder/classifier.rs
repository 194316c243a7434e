//! Routing of inbound responses to a handling path.

use crate::msg::{Response, Route};

/// Handling path chosen for one inbound response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Register (matcher responses only) and write to the client.
    Write,
    /// Clear the matching pending delivery.
    Acknowledge,
    /// Stop the responder loop.
    Shutdown,
    /// Nothing to do.
    Ignore,
}

/// Classify a response. Rules are checked in order; the first match wins.
///
/// Any abnormal status is written, whatever the route, including client
/// acks and commands.
pub fn classify(resp: &Response) -> Action {
    if !resp.status.is_normal()
        || resp.route == Route::MatcherResponse
        || resp.route == Route::ServerAck
    {
        Action::Write
    } else if resp.route == Route::ClientAck {
        Action::Acknowledge
    } else if resp.is_shutdown() {
        Action::Shutdown
    } else {
        Action::Ignore
    }
}
