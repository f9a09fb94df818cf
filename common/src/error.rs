use std::time::Duration;

use thiserror::Error;

/// Failures raised by a protocol driver below the tag level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("session could not be opened: {0}")]
    SessionUnavailable(String),
    #[error("connection refused by target machine")]
    Refused,
    #[error("session already closed")]
    Closed,
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TagError {
    #[error("'{0}' is not a valid IPv4 address")]
    InvalidAddressFormat(String),

    #[error("no response from '{address}': {reason}")]
    Unreachable { address: String, reason: String },

    #[error("device at '{address}' is not a plc (reports '{device_type}')")]
    NotAController { address: String, device_type: String },

    #[error("could not talk to '{address}': {reason}")]
    ConnectionError { address: String, reason: String },

    #[error("tag list retrieval failed: {0}")]
    CatalogRetrievalFailed(String),

    #[error("composite type '{type_name}' refers back to itself at '{path}'")]
    CompositeTypeCycle { type_name: String, path: String },

    #[error("no tags were read from the plc ({attempted} attempted)")]
    NoTagsRead { attempted: usize },

    /// Absorbed by read batches; only surfaced through logs.
    #[error("timeout reading tag '{path}' after {:.1} seconds", .timeout.as_secs_f64())]
    PerTagTimeout { path: String, timeout: Duration },

    /// Absorbed by read batches; only surfaced through logs.
    #[error("reading tag '{path}' failed: {status}")]
    ReadRejected { path: String, status: String },

    /// Recorded per tag by write batches, never raised by them.
    #[error("writing tag '{path}' failed: {status}")]
    WriteFailure { path: String, status: String },

    #[error("controller clock request failed: {0}")]
    ClockFailed(String),

    #[error("operation cancelled by user")]
    Cancelled,
}

impl TagError {
    pub fn connection(address: impl ToString, source: DriverError) -> Self {
        TagError::ConnectionError {
            address: address.to_string(),
            reason: source.to_string(),
        }
    }
}
