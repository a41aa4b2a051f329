//! Form Submission Relay
//!
//! An HTTP front-end and a UDP ingest worker built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                    FORMRELAY                      │
//!                    │                                                   │
//!   Browser          │  ┌─────────┐   POST body    ┌──────────────┐     │
//!   ─────────────────┼─▶│  http   │───────────────▶│ relay client │     │
//!                    │  │ server  │                └──────┬───────┘     │
//!   302 / pages /    │  └─────────┘                       │ UDP         │
//!   static files     │                                    ▼ loopback    │
//!   ◀────────────────┼──                          ┌──────────────┐     │
//!                    │                            │    ingest    │     │
//!                    │                            │   listener   │     │
//!                    │                            └──────┬───────┘     │
//!                    │                                   ▼              │
//!                    │                            ┌──────────────┐     │
//!                    │                            │  persistence │─────┼──▶ MongoDB
//!                    │                            │     sink     │     │
//!                    │                            └──────────────┘     │
//!                    │                                                   │
//!                    │  ┌────────────────────────────────────────────┐  │
//!                    │  │  config │ lifecycle │ observability        │  │
//!                    │  └────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The two workers share no memory; their only coupling is the loopback
//! datagram endpoint, which is best-effort and unordered.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use formrelay::config::{loader::load_config, AppConfig};
use formrelay::http::HttpServer;
use formrelay::lifecycle::{signals, Shutdown};
use formrelay::relay::{IngestListener, RelayClient};
use formrelay::store::{MongoSink, RecordSink};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "formrelay", version, about = "Form submission relay service")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    formrelay::observability::logging::init();

    tracing::info!("formrelay v0.1.0 starting");

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    tracing::info!(
        http_address = %config.http.bind_address,
        relay_address = %config.relay.bind_address,
        database = %config.store.database,
        "Configuration loaded"
    );

    // Bind both endpoints before serving any traffic so the relay path is
    // complete from the first accepted request.
    let ingest = IngestListener::bind(&config.relay).await?;
    let http_listener = TcpListener::bind(&config.http.bind_address).await?;

    let relay_target: SocketAddr = config.relay.bind_address.parse()?;
    let relay = RelayClient::new(relay_target);
    let sink: Arc<dyn RecordSink> = Arc::new(MongoSink::new(config.store.clone()));

    let server = HttpServer::new(&config.http, relay);
    let shutdown = Shutdown::new();

    let ingest_task = tokio::spawn(ingest.run(sink, shutdown.subscribe()));
    let server_task = tokio::spawn(server.run(http_listener, shutdown.subscribe()));

    signals::wait_for_termination().await;
    shutdown.trigger();

    if let Err(e) = server_task.await? {
        tracing::error!(error = %e, "HTTP server exited with error");
    }
    if let Err(e) = ingest_task.await? {
        tracing::error!(error = %e, "Ingest listener exited with error");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
