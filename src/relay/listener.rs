//! UDP ingest listener.
//!
//! # Responsibilities
//! - Bind the fixed loopback endpoint before any traffic is accepted
//! - Receive datagrams into a bounded buffer, one at a time
//! - Hand raw bytes to the persistence sink; log and continue on bad records
//!
//! # Design Decisions
//! - Strictly sequential: receive, persist, repeat. Under load the socket
//!   buffer drops datagrams rather than queueing them in-process
//! - A receive error stops the listener (logged, no auto-restart)
//! - Sink errors never escape the loop

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::broadcast;

use crate::config::RelayConfig;
use crate::store::RecordSink;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to the configured endpoint.
    Bind(std::io::Error),
    /// Failed to receive a datagram.
    Recv(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
            ListenerError::Recv(e) => write!(f, "Failed to receive: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// Datagram listener feeding the persistence sink.
pub struct IngestListener {
    socket: UdpSocket,
    recv_buffer_bytes: usize,
}

impl IngestListener {
    /// Bind the configured loopback endpoint.
    pub async fn bind(config: &RelayConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let socket = UdpSocket::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = socket.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            recv_buffer_bytes = config.recv_buffer_bytes,
            "Ingest listener bound"
        );

        Ok(Self {
            socket,
            recv_buffer_bytes: config.recv_buffer_bytes,
        })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.socket.local_addr()
    }

    /// Receive datagrams until shutdown fires or the socket fails.
    ///
    /// Each datagram is passed to the sink as an opaque byte buffer; the
    /// sender address is recorded for diagnostics only.
    pub async fn run(
        self,
        sink: Arc<dyn RecordSink>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let mut buf = vec![0u8; self.recv_buffer_bytes];

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Ingest listener stopped");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => {
                    match received {
                        Ok((len, peer)) => {
                            tracing::info!(
                                peer = %peer,
                                bytes = len,
                                "Datagram received"
                            );
                            if let Err(e) = sink.persist(&buf[..len]).await {
                                tracing::error!(error = %e, "Record discarded");
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Receive failed, listener stopping");
                            return Err(ListenerError::Recv(e));
                        }
                    }
                }
            }
        }
    }
}
