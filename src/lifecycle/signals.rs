//! OS signal handling.
//!
//! Ctrl+C is not acted on directly: it is turned into a shutdown command on
//! the response channel, so the responder stops through its normal path and
//! closes its transport.

use tokio::sync::mpsc;

use crate::lifecycle::shutdown::ShutdownListener;
use crate::msg::Response;

/// Forward Ctrl+C to the responder as a shutdown command.
///
/// Returns without sending anything once `shutdown` fires.
pub async fn forward_ctrl_c(
    responses: mpsc::Sender<Response>,
    mut shutdown: ShutdownListener,
) {
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                return;
            }
            tracing::info!("Shutdown signal received");
            if responses.send(Response::shutdown()).await.is_err() {
                tracing::debug!("Responder already stopped");
            }
        }
        _ = shutdown.wait() => {}
    }
}
