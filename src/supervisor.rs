//! Default escalation supervisor used by the binary.
//!
//! Logs every error-tagged response. Reconnection or alerting policies would
//! hang off the same receiver.

use tokio::sync::mpsc;

use crate::lifecycle::ShutdownListener;
use crate::msg::Response;

/// Consume escalations until the channel closes or `shutdown` fires.
///
/// Returns how many escalations were seen.
pub async fn supervise(
    mut escalations: mpsc::Receiver<Response>,
    mut shutdown: ShutdownListener,
) -> usize {
    let mut seen = 0;

    loop {
        tokio::select! {
            next = escalations.recv() => match next {
                Some(resp) => {
                    seen += 1;
                    report(&resp);
                }
                None => break,
            },
            _ = shutdown.wait() => {
                while let Ok(resp) = escalations.try_recv() {
                    seen += 1;
                    report(&resp);
                }
                break;
            }
        }
    }

    tracing::info!(escalations = seen, "Supervisor stopped");
    seen
}

fn report(resp: &Response) {
    tracing::warn!(
        trader_id = resp.trader_id,
        trade_id = resp.trade_id,
        route = ?resp.route,
        status = ?resp.status,
        "Delivery failure escalated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use crate::msg::Status;

    #[tokio::test]
    async fn counts_until_channel_closes() {
        let (tx, rx) = mpsc::channel(4);
        let shutdown = Shutdown::new();

        tx.send(Response::server_ack(1, 1).with_status(Status::WriteError))
            .await
            .unwrap();
        tx.send(Response::server_ack(1, 1).with_status(Status::ShortWriteError))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(supervise(rx, shutdown.subscribe()).await, 2);
    }

    #[tokio::test]
    async fn drains_backlog_on_shutdown() {
        let (tx, rx) = mpsc::channel(4);
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();

        tx.send(Response::default().with_status(Status::WriteError))
            .await
            .unwrap();
        shutdown.trigger();

        // Sender still alive: only the shutdown signal ends the loop.
        assert_eq!(supervise(rx, signal).await, 1);
        drop(tx);
    }
}
