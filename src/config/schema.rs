//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the relay service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP front-end configuration (bind address, asset directory).
    pub http: HttpConfig,

    /// Datagram relay endpoint shared by the client and the listener.
    pub relay: RelayConfig,

    /// Document store settings.
    pub store: StoreConfig,
}

/// HTTP front-end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Base directory for page documents and static files.
    pub base_dir: PathBuf,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            base_dir: PathBuf::from("assets"),
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Relay endpoint configuration.
///
/// Both workers are constructed from the same section: the HTTP handler
/// sends to this address, the ingest listener binds it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Loopback datagram endpoint (e.g., "127.0.0.1:5000").
    pub bind_address: String,

    /// Receive buffer size per datagram; larger datagrams are truncated
    /// by the transport.
    pub recv_buffer_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            recv_buffer_bytes: 1024,
        }
    }
}

/// Document store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection string for the store.
    pub uri: String,

    /// Database name.
    pub database: String,

    /// Collection receiving one document per submission.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://mongodb:27017".to_string(),
            database: "homework".to_string(),
            collection: "homework".to_string(),
        }
    }
}
