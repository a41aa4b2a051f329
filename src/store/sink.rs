//! Persistence sink for decoded records.
//!
//! # Responsibilities
//! - Decode each received payload into a record
//! - Stamp and insert the record as one document
//! - Scope the store connection to a single insert
//!
//! # Design Decisions
//! - Connect/insert/close per record: no pool, no leaked connection on failure
//! - Sink errors are returned, not panicked; the listener logs and moves on

use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::Client;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::store::record::{decode_record, DecodeError};

/// Errors surfaced by a persistence attempt.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The payload never became a record.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Connecting to the store failed.
    #[error("store connect failed: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// The insert itself failed.
    #[error("insert failed: {0}")]
    Insert(#[source] mongodb::error::Error),
}

/// Destination for raw submission payloads.
///
/// The seam between the ingest listener and the store, so tests can stand
/// in a capturing sink without a running database.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Decode, stamp, and persist one payload.
    async fn persist(&self, payload: &[u8]) -> Result<(), SinkError>;
}

/// Sink writing each record into a MongoDB collection.
pub struct MongoSink {
    config: StoreConfig,
}

impl MongoSink {
    /// Create a sink for the configured database and collection.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Insert one document under a connection scoped to this call.
    async fn insert(&self, document: Document) -> Result<(), SinkError> {
        let client = Client::with_uri_str(&self.config.uri)
            .await
            .map_err(SinkError::Connect)?;

        let result = client
            .database(&self.config.database)
            .collection::<Document>(&self.config.collection)
            .insert_one(document)
            .await;

        // Release the connection on the failure path too.
        client.shutdown().await;

        let inserted = result.map_err(SinkError::Insert)?;
        tracing::debug!(
            id = %inserted.inserted_id,
            collection = %self.config.collection,
            "Record inserted"
        );
        Ok(())
    }
}

#[async_trait]
impl RecordSink for MongoSink {
    async fn persist(&self, payload: &[u8]) -> Result<(), SinkError> {
        let record = decode_record(payload)?.stamp();
        self.insert(record.into_document()).await
    }
}
