//! Datagram relay subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP POST body
//!     → client.rs (ephemeral UDP socket, one send, fire-and-forget)
//!     → loopback endpoint (best-effort, unordered, lossy)
//!     → listener.rs (bounded recv loop, sequential dispatch to the sink)
//! ```
//!
//! # Design Decisions
//! - The two sides never share memory; the endpoint is their only coupling
//! - No acknowledgment, no retry: message loss is an accepted mode
//! - A slow sink blocks the next receive; overflow drops at the socket buffer

pub mod client;
pub mod listener;

pub use client::{RelayClient, RelayError};
pub use listener::{IngestListener, ListenerError};
