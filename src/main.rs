//! Trade responder (v1)
//!
//! Replays recorded responses through a [`Responder`] onto a file or a
//! connected client socket.
//!
//! # Architecture Overview
//!
//! ```text
//!   replay file ──▶ replay task ──┐
//!                                 │ responses (mpsc)
//!   Ctrl+C ──▶ signal forwarder ──┤
//!                                 ▼
//!                          ┌─────────────┐  write   ┌───────────┐
//!                          │  Responder  │─────────▶│ transport │──▶ client
//!                          │  registry + │          └───────────┘
//!                          │  resend     │
//!                          └──────┬──────┘
//!                                 │ escalations (mpsc)
//!                                 ▼
//!                           supervisor (logs)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use tokio::sync::mpsc;

use trade_responder::config::{load_config, Config};
use trade_responder::lifecycle::{signals, Shutdown};
use trade_responder::observability::{logging, metrics};
use trade_responder::responder::escalation_channel;
use trade_responder::transport::{StreamTransport, TcpTransport, Transport};
use trade_responder::{replay, supervisor, Responder, ResponderError};

/// Inbound channel depth between producers and the responder.
const RESPONSE_CHANNEL_CAPACITY: usize = 1024;

#[derive(Parser)]
#[command(name = "trade-responder")]
#[command(about = "Reliable delivery of trade responses to a client", long_about = None)]
#[command(group(ArgGroup::new("sink").required(true).args(["output", "connect"])))]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File of encoded responses to replay.
    #[arg(short, long)]
    input: PathBuf,

    /// Write responses to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write responses to a client listening at this address.
    #[arg(long)]
    connect: Option<SocketAddr>,

    /// Keep resending for this long after the replay input is exhausted.
    #[arg(long, default_value_t = 0)]
    linger_ms: u64,
}

fn open_transport(cli: &Cli) -> std::io::Result<Box<dyn Transport>> {
    if let Some(addr) = cli.connect {
        let transport = TcpTransport::connect(addr)?;
        tracing::info!(peer = %transport.peer(), "Connected to client");
        return Ok(Box::new(transport));
    }

    let path = cli
        .output
        .as_ref()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no sink given"))?;
    let file = std::fs::File::create(path)?;
    tracing::info!(path = %path.display(), "Writing responses to file");
    Ok(Box::new(StreamTransport::new(file)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("trade-responder v0.1.0 starting");
    tracing::info!(
        resend_interval_ms = config.responder.resend_interval_ms,
        escalation_capacity = config.escalation.capacity,
        overflow = ?config.escalation.overflow,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let records = replay::read_records(&cli.input)?;
    let transport = open_transport(&cli)?;

    let (responses_tx, responses_rx) = mpsc::channel(RESPONSE_CHANNEL_CAPACITY);
    let (escalations_tx, escalations_rx) = escalation_channel(&config.escalation);

    let mut responder = Responder::new(transport, config.responder.clone());
    responder.set_responses(responses_rx);
    responder.set_escalations(escalations_tx);

    let shutdown = Shutdown::new();
    let supervisor = tokio::spawn(supervisor::supervise(escalations_rx, shutdown.subscribe()));
    tokio::spawn(signals::forward_ctrl_c(responses_tx.clone(), shutdown.subscribe()));
    let linger = Duration::from_millis(cli.linger_ms);
    tokio::spawn(replay::replay(records, responses_tx, linger));

    match responder.run().await {
        Ok(()) => {}
        Err(ResponderError::FatalTransport(e)) => {
            tracing::error!(error = %e, "Unrecoverable transport failure, exiting");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    shutdown.trigger();
    let escalations = supervisor.await?;
    tracing::info!(
        escalations,
        pending = responder.pending().len(),
        "Shutdown complete"
    );
    Ok(())
}
