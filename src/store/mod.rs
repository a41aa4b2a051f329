//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! raw datagram bytes
//!     → record.rs (urlencoded decode, whole-record validation)
//!     → Record::stamp (inject `date` field)
//!     → sink.rs (scoped store connection, insert one document)
//! ```
//!
//! # Design Decisions
//! - Decode failure rejects the whole record; nothing partial is inserted
//! - One store connection per insert, released on every exit path
//! - Every failure is a logged Result, never a panic out of the loop

pub mod record;
pub mod sink;

pub use record::{decode_record, DecodeError, Record};
pub use sink::{MongoSink, RecordSink, SinkError};
