//! Escalation of failed writes to a supervising task.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::config::{EscalationConfig, OverflowPolicy};
use crate::msg::Response;
use crate::observability::metrics;

/// What became of one escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Channel full under [`OverflowPolicy::DropNewest`].
    Dropped,
    /// Supervisor receiver is gone.
    Closed,
}

/// Sending half of the escalation channel.
#[derive(Debug, Clone)]
pub struct EscalationSink {
    tx: mpsc::Sender<Response>,
    policy: OverflowPolicy,
}

/// Create a bounded escalation channel from configuration.
pub fn escalation_channel(config: &EscalationConfig) -> (EscalationSink, mpsc::Receiver<Response>) {
    let (tx, rx) = mpsc::channel(config.capacity);
    (EscalationSink::new(tx, config.overflow), rx)
}

impl EscalationSink {
    pub fn new(tx: mpsc::Sender<Response>, policy: OverflowPolicy) -> Self {
        Self { tx, policy }
    }

    /// Forward an error-tagged response to the supervisor.
    ///
    /// Under [`OverflowPolicy::Block`] this waits for channel room, stalling
    /// the caller until the supervisor catches up.
    pub async fn escalate(&self, resp: Response) -> Delivery {
        metrics::record_escalation(resp.status);

        let delivery = match self.policy {
            OverflowPolicy::Block => match self.tx.send(resp).await {
                Ok(()) => Delivery::Sent,
                Err(_) => Delivery::Closed,
            },
            OverflowPolicy::DropNewest => match self.tx.try_send(resp) {
                Ok(()) => Delivery::Sent,
                Err(TrySendError::Full(_)) => Delivery::Dropped,
                Err(TrySendError::Closed(_)) => Delivery::Closed,
            },
        };

        match delivery {
            Delivery::Sent => {}
            Delivery::Dropped => {
                metrics::record_escalation_dropped();
                tracing::warn!(
                    trader_id = resp.trader_id,
                    trade_id = resp.trade_id,
                    status = ?resp.status,
                    "Escalation channel full, dropping escalation"
                );
            }
            Delivery::Closed => {
                tracing::warn!(
                    trader_id = resp.trader_id,
                    trade_id = resp.trade_id,
                    status = ?resp.status,
                    "Escalation supervisor gone, dropping escalation"
                );
            }
        }
        delivery
    }
}
