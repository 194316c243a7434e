//! Shared harness for responder integration tests.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use trade_responder::config::{EscalationConfig, ResponderConfig};
use trade_responder::responder::{escalation_channel, ResponderResult};
use trade_responder::transport::{RecordingHandle, RecordingTransport};
use trade_responder::{Responder, Response};

pub type Finished = (Responder<RecordingTransport>, ResponderResult<()>);

/// A responder running on its own task against a recording transport.
pub struct Harness {
    pub responses: mpsc::Sender<Response>,
    pub escalations: mpsc::Receiver<Response>,
    pub transport: RecordingHandle,
    pub task: JoinHandle<Finished>,
}

/// Start a responder with default configuration.
pub fn start() -> Harness {
    start_with(ResponderConfig::default(), EscalationConfig::default())
}

pub fn start_with(config: ResponderConfig, escalation: EscalationConfig) -> Harness {
    let (transport, handle) = RecordingTransport::new();
    let (responses_tx, responses_rx) = mpsc::channel(64);
    let (sink, escalations) = escalation_channel(&escalation);

    let mut responder = Responder::new(transport, config);
    responder.set_responses(responses_rx);
    responder.set_escalations(sink);

    let task = tokio::spawn(async move {
        let result = responder.run().await;
        (responder, result)
    });

    Harness {
        responses: responses_tx,
        escalations,
        transport: handle,
        task,
    }
}

impl Harness {
    pub async fn send(&self, resp: Response) {
        self.responses.send(resp).await.expect("responder stopped");
    }

    /// Send the shutdown command and wait for the loop to return.
    pub async fn stop(self) -> Finished {
        self.send(Response::shutdown()).await;
        self.task.await.expect("responder task panicked")
    }
}

/// Let `cycles` resend intervals of `interval` elapse, landing halfway
/// between two firings.
#[allow(dead_code)]
pub async fn elapse_cycles(cycles: u32, interval: Duration) {
    tokio::time::sleep(interval * cycles + interval / 2).await;
}

/// Take every escalation currently queued.
#[allow(dead_code)]
pub fn drain(escalations: &mut mpsc::Receiver<Response>) -> Vec<Response> {
    let mut drained = Vec::new();
    while let Ok(resp) = escalations.try_recv() {
        drained.push(resp);
    }
    drained
}
