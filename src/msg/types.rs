//! Response record and its classification enums.

/// Outcome code carried by a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Status {
    #[default]
    Normal = 0,
    InvalidMessage = 1,
    ReadError = 2,
    ShortReadError = 3,
    /// The transport reported an error while writing this response.
    WriteError = 4,
    /// The transport accepted fewer bytes than a full record.
    ShortWriteError = 5,
}

impl Status {
    pub fn is_normal(&self) -> bool {
        matches!(self, Status::Normal)
    }
}

impl TryFrom<u32> for Status {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Status::Normal,
            1 => Status::InvalidMessage,
            2 => Status::ReadError,
            3 => Status::ShortReadError,
            4 => Status::WriteError,
            5 => Status::ShortWriteError,
            other => return Err(other),
        })
    }
}

/// Logical class of a response, governing how the responder treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Route {
    /// Client order heading into the matcher. Never handled by the responder.
    #[default]
    Application = 0,
    /// Trade confirmation produced by the matcher; needs a client ack.
    MatcherResponse = 1,
    /// Client acknowledging a matcher response.
    ClientAck = 2,
    /// Server acknowledging a client message; written once, never resent.
    ServerAck = 3,
    /// Control command addressed to the network edge.
    Command = 4,
}

impl TryFrom<u32> for Route {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Route::Application,
            1 => Route::MatcherResponse,
            2 => Route::ClientAck,
            3 => Route::ServerAck,
            4 => Route::Command,
            other => return Err(other),
        })
    }
}

/// Order, trade, or command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Kind {
    #[default]
    Buy = 0,
    Sell = 1,
    Cancel = 2,
    Partial = 3,
    Full = 4,
    Cancelled = 5,
    NotCancelled = 6,
    Shutdown = 7,
}

impl TryFrom<u32> for Kind {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Kind::Buy,
            1 => Kind::Sell,
            2 => Kind::Cancel,
            3 => Kind::Partial,
            4 => Kind::Full,
            5 => Kind::Cancelled,
            6 => Kind::NotCancelled,
            7 => Kind::Shutdown,
            other => return Err(other),
        })
    }
}

/// A trade-related response bound for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub kind: Kind,
    pub route: Route,
    pub status: Status,
    pub trader_id: u32,
    pub trade_id: u32,
    pub stock_id: u32,
    pub price: i64,
    pub amount: u64,
}

impl Response {
    /// Matcher-originated trade confirmation.
    pub fn matcher_response(kind: Kind, trader_id: u32, trade_id: u32) -> Self {
        Self {
            kind,
            route: Route::MatcherResponse,
            trader_id,
            trade_id,
            ..Self::default()
        }
    }

    pub fn client_ack(trader_id: u32, trade_id: u32) -> Self {
        Self {
            route: Route::ClientAck,
            trader_id,
            trade_id,
            ..Self::default()
        }
    }

    pub fn server_ack(trader_id: u32, trade_id: u32) -> Self {
        Self {
            route: Route::ServerAck,
            trader_id,
            trade_id,
            ..Self::default()
        }
    }

    /// The command that stops a running responder.
    pub fn shutdown() -> Self {
        Self {
            kind: Kind::Shutdown,
            route: Route::Command,
            ..Self::default()
        }
    }

    /// Copy of this response with `status` overwritten.
    pub fn with_status(&self, status: Status) -> Self {
        Self { status, ..*self }
    }

    pub fn is_shutdown(&self) -> bool {
        self.route == Route::Command && self.kind == Kind::Shutdown
    }
}
