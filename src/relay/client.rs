//! Send-only datagram client.
//!
//! # Responsibilities
//! - Transmit one submission body as a single datagram
//! - Bind an ephemeral socket per send, drop it after
//!
//! # Design Decisions
//! - Fire-and-forget: the only observable failure is the local send call
//! - No socket reuse; the client is stateless and freely cloneable

use std::net::SocketAddr;

use tokio::net::UdpSocket;

/// Error type for relay send operations.
#[derive(Debug)]
pub enum RelayError {
    /// Failed to bind the ephemeral socket.
    Bind(std::io::Error),
    /// Failed to send the datagram.
    Send(std::io::Error),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::Bind(e) => write!(f, "Failed to bind: {}", e),
            RelayError::Send(e) => write!(f, "Failed to send: {}", e),
        }
    }
}

impl std::error::Error for RelayError {}

/// Fire-and-forget datagram client targeting the ingest endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    target: SocketAddr,
}

impl RelayClient {
    /// Create a client for the given loopback endpoint.
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }

    /// Send the whole buffer as one datagram and return immediately.
    ///
    /// Never waits for or expects a response; delivery is best-effort.
    pub async fn send(&self, payload: &[u8]) -> Result<(), RelayError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(RelayError::Bind)?;

        let sent = socket
            .send_to(payload, self.target)
            .await
            .map_err(RelayError::Send)?;

        tracing::debug!(
            target = %self.target,
            bytes = sent,
            "Submission relayed"
        );
        Ok(())
    }
}
