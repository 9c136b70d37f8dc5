//! Error types shared between client and server.
//!
//! The `QuotationError` enum unifies common failure cases for networking,
//! local persistence, and the backing database, allowing crates to
//! propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuotationError {
    /// Transport-level failure reaching the remote endpoint.
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the request with a non-success status code.
    #[error("HTTP error: status {status}")]
    Http {
        /// Status code returned by the server.
        status: u16,
    },

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local snapshot read/write failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Failure while talking to the backing database.
    #[error("Database error: {0}")]
    Database(String),

    /// No quotation exists with the requested identifier.
    #[error("Quotation not found: {0}")]
    NotFound(String),

    /// A submitted quotation is missing required fields or is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required configuration is missing or invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
