//! Form payload decoding and the record type.
//!
//! # Responsibilities
//! - Decode `application/x-www-form-urlencoded` bytes into field/value pairs
//! - Enforce whole-record validity (exactly one `=` per segment, unique keys)
//! - Stamp each record with a microsecond-precision local timestamp
//!
//! # Design Decisions
//! - Any bad segment poisons the entire payload; there are no partial records
//! - Duplicate field names are a decode error, not last-one-wins

use std::collections::BTreeMap;

use chrono::Local;
use mongodb::bson::Document;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Timestamp layout for the injected `date` field.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Errors that reject a submitted payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload bytes are not valid UTF-8, before or after percent-decoding.
    #[error("payload is not valid UTF-8 text")]
    NotUtf8,

    /// A `&`-separated segment did not contain exactly one `=`.
    #[error("segment {0:?} does not contain exactly one '='")]
    BadSegment(String),

    /// The same field name appeared twice in one submission.
    #[error("duplicate field {0:?}")]
    DuplicateKey(String),
}

/// One decoded form submission.
///
/// Constructed fresh per datagram, persisted once, then discarded; the
/// store owns the durable copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Inject the `date` field with the current local time.
    ///
    /// A submitted `date` field is overwritten; the stamp wins.
    pub fn stamp(mut self) -> Self {
        self.fields.insert(
            "date".to_string(),
            Local::now().format(DATE_FORMAT).to_string(),
        );
        self
    }

    /// Field value lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Number of fields, including `date` once stamped.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a BSON document for insertion.
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        for (key, value) in self.fields {
            doc.insert(key, value);
        }
        doc
    }
}

/// Decode raw datagram bytes into a [`Record`].
///
/// The whole payload is percent-decoded (with `+` as space) first, then
/// split on `&` and `=`. Any violation rejects the entire record.
pub fn decode_record(payload: &[u8]) -> Result<Record, DecodeError> {
    let text = std::str::from_utf8(payload).map_err(|_| DecodeError::NotUtf8)?;
    let decoded = unquote_plus(text)?;

    let mut fields = BTreeMap::new();
    for segment in decoded.split('&') {
        let mut parts = segment.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                if fields
                    .insert(key.to_string(), value.to_string())
                    .is_some()
                {
                    return Err(DecodeError::DuplicateKey(key.to_string()));
                }
            }
            _ => return Err(DecodeError::BadSegment(segment.to_string())),
        }
    }

    Ok(Record { fields })
}

/// Decode `+` as space, then percent-escapes, over the whole payload.
fn unquote_plus(text: &str) -> Result<String, DecodeError> {
    let spaced = text.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| DecodeError::NotUtf8)
}
