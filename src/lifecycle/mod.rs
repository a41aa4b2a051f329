//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Bind both sockets → Spawn workers
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast to workers → join → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then sockets, then workers
//! - Both sockets bound before either worker serves traffic
//! - Workers own their sockets exclusively; only the channel is shared

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
