//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses actually parse before workers try to bind them
//! - Validate value ranges (buffer sizes > 0, store names non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An address field does not parse as `host:port`.
    InvalidAddress { field: &'static str, value: String },
    /// The relay endpoint is not a loopback address.
    RelayNotLoopback { value: String },
    /// A size field that must be at least one byte is zero.
    ZeroSize { field: &'static str },
    /// A store field that must be non-empty is empty.
    EmptyField { field: &'static str },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} is not a valid socket address: {:?}", field, value)
            }
            ValidationError::RelayNotLoopback { value } => {
                write!(f, "relay.bind_address must be a loopback address: {:?}", value)
            }
            ValidationError::ZeroSize { field } => {
                write!(f, "{} must be at least 1", field)
            }
            ValidationError::EmptyField { field } => {
                write!(f, "{} must not be empty", field)
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.http.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "http.bind_address",
            value: config.http.bind_address.clone(),
        });
    }

    match config.relay.bind_address.parse::<SocketAddr>() {
        Ok(addr) => {
            if !addr.ip().is_loopback() {
                errors.push(ValidationError::RelayNotLoopback {
                    value: config.relay.bind_address.clone(),
                });
            }
        }
        Err(_) => {
            errors.push(ValidationError::InvalidAddress {
                field: "relay.bind_address",
                value: config.relay.bind_address.clone(),
            });
        }
    }

    if config.relay.recv_buffer_bytes == 0 {
        errors.push(ValidationError::ZeroSize {
            field: "relay.recv_buffer_bytes",
        });
    }
    if config.http.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroSize {
            field: "http.max_body_bytes",
        });
    }

    if config.store.uri.is_empty() {
        errors.push(ValidationError::EmptyField { field: "store.uri" });
    }
    if config.store.database.is_empty() {
        errors.push(ValidationError::EmptyField {
            field: "store.database",
        });
    }
    if config.store.collection.is_empty() {
        errors.push(ValidationError::EmptyField {
            field: "store.collection",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
