//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; every internal failure surfaces here
//! - Log level configurable through `RUST_LOG`
//! - No metrics surface: the log stream is the only diagnostic output

pub mod logging;
