//! Error taxonomy for the search client.
//!
//! None of these errors are fatal to a coalescer: backend failures travel
//! through the observer notification path and the next queued query still
//! runs. A response entry with an unrecognized resource type is not an
//! error at all; it is logged and dropped at grouping time.

use thiserror::Error;

/// Errors produced by search backends and configuration loading.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Transport-level failure: connection refused, TLS, or timeout.
    #[error("network failure: {0}")]
    Network(String),

    /// The search endpoint answered with a non-success status.
    #[error("search endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("malformed search response: {0}")]
    Decode(String),

    /// Rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
