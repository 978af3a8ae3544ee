//! Error types for Match Lens Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record store could not be reached or never became ready
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    /// The record store answered with a non-success status
    #[error("Query failed with status {status}: {message}")]
    Query { status: u16, message: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
