//! The responder event loop.

use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::config::ResponderConfig;
use crate::msg::{Response, Status, WIRE_SIZE};
use crate::observability::metrics;
use crate::responder::classifier::{classify, Action};
use crate::responder::error::{ResponderError, ResponderResult};
use crate::responder::escalation::EscalationSink;
use crate::responder::registry::PendingRegistry;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Shutdown,
}

/// At-least-once delivery of matcher responses over a single transport.
///
/// Attach the inbound source with [`set_responses`](Self::set_responses) and
/// the escalation sink with [`set_escalations`](Self::set_escalations), then
/// drive it with [`run`](Self::run). Everything happens on the task that
/// calls `run`; the registry is never shared.
pub struct Responder<T> {
    transport: T,
    registry: PendingRegistry,
    responses: Option<mpsc::Receiver<Response>>,
    escalations: Option<EscalationSink>,
    config: ResponderConfig,
    closed: bool,
}

impl<T: Transport> Responder<T> {
    pub fn new(transport: T, config: ResponderConfig) -> Self {
        Self {
            transport,
            registry: PendingRegistry::new(),
            responses: None,
            escalations: None,
            config,
            closed: false,
        }
    }

    /// Attach the inbound response source.
    pub fn set_responses(&mut self, responses: mpsc::Receiver<Response>) {
        self.responses = Some(responses);
    }

    /// Attach the sink that receives error-tagged copies of failed writes.
    pub fn set_escalations(&mut self, escalations: EscalationSink) {
        self.escalations = Some(escalations);
    }

    /// Deliveries still awaiting a client acknowledgment.
    pub fn pending(&self) -> &PendingRegistry {
        &self.registry
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Process responses and resend unacknowledged ones until told to stop.
    ///
    /// Returns `Ok(())` after a shutdown command or once every producer has
    /// dropped its sender; the transport is closed in both cases. A fatal
    /// transport error is returned as-is and the transport is left open, so
    /// the caller decides how to terminate.
    pub async fn run(&mut self) -> ResponderResult<()> {
        if self.escalations.is_none() {
            return Err(ResponderError::NotWired("escalations"));
        }
        let mut responses = self
            .responses
            .take()
            .ok_or(ResponderError::NotWired("responses"))?;

        let interval = self.config.resend_interval();
        let resend = time::sleep(interval);
        tokio::pin!(resend);

        tracing::info!(resend_interval = ?interval, "Responder started");

        loop {
            tokio::select! {
                next = responses.recv() => match next {
                    Some(resp) => {
                        if self.handle(resp).await? == Flow::Shutdown {
                            tracing::info!("Shutdown command received");
                            break;
                        }
                    }
                    None => {
                        tracing::info!("Response source closed");
                        break;
                    }
                },
                _ = &mut resend => {
                    self.resend().await?;
                    // Re-armed only once the cycle's writes are done.
                    resend.as_mut().reset(Instant::now() + interval);
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    async fn handle(&mut self, resp: Response) -> ResponderResult<Flow> {
        match classify(&resp) {
            Action::Write => self.write_response(&resp).await?,
            Action::Acknowledge => self.acknowledge(&resp),
            Action::Shutdown => return Ok(Flow::Shutdown),
            Action::Ignore => {
                tracing::trace!(route = ?resp.route, kind = ?resp.kind, "Ignoring response");
            }
        }
        Ok(Flow::Continue)
    }

    fn acknowledge(&mut self, ack: &Response) {
        if self.registry.acknowledge(ack.trader_id, ack.trade_id).is_some() {
            metrics::record_ack();
            metrics::record_pending(self.registry.len());
            tracing::debug!(
                trader_id = ack.trader_id,
                trade_id = ack.trade_id,
                pending = self.registry.len(),
                "Delivery acknowledged"
            );
        } else {
            tracing::trace!(
                trader_id = ack.trader_id,
                trade_id = ack.trade_id,
                "Acknowledgment for unknown delivery"
            );
        }
    }

    async fn write_response(&mut self, resp: &Response) -> ResponderResult<()> {
        let registrable =
            resp.status.is_normal() || self.config.register_abnormal_matcher_responses;
        if registrable && self.registry.register(resp) {
            metrics::record_pending(self.registry.len());
        }
        self.write(resp).await
    }

    async fn resend(&mut self) -> ResponderResult<()> {
        let pending = self.registry.snapshot();
        if pending.is_empty() {
            return Ok(());
        }

        tracing::debug!(pending = pending.len(), "Resending unacknowledged responses");
        metrics::record_resend_cycle(pending.len());
        for resp in &pending {
            self.write(resp).await?;
        }
        Ok(())
    }

    async fn write(&mut self, resp: &Response) -> ResponderResult<()> {
        metrics::record_write();
        let (written, failure) = match self.transport.write(&resp.encode()) {
            Ok(written) => (written, None),
            Err(e) => (e.written, Some(e)),
        };

        if let Some(err) = failure {
            tracing::error!(
                trader_id = resp.trader_id,
                trade_id = resp.trade_id,
                error = %err,
                "Transport write failed"
            );
            self.escalate(resp.with_status(Status::WriteError)).await;

            if err.is_fatal() {
                return Err(ResponderError::FatalTransport(err));
            }
            if self.config.collapse_write_escalations {
                return Ok(());
            }
        }

        if written != WIRE_SIZE {
            tracing::warn!(
                trader_id = resp.trader_id,
                trade_id = resp.trade_id,
                written,
                expected = WIRE_SIZE,
                "Short transport write"
            );
            self.escalate(resp.with_status(Status::ShortWriteError)).await;
        }
        Ok(())
    }

    async fn escalate(&self, resp: Response) {
        if let Some(sink) = &self.escalations {
            sink.escalate(resp).await;
        }
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match self.transport.close() {
            Ok(()) => tracing::info!(pending = self.registry.len(), "Transport closed"),
            Err(e) => tracing::warn!(error = %e, "Failed to close transport"),
        }
    }
}
