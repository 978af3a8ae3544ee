//! Error types for the record store accessor

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Query failed ({status_code}): {message}")]
    QueryError { status_code: u16, message: String },

    #[error("Failed to decode rows: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Store not ready after {attempts} attempts: {message}")]
    NotReady { attempts: u32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for matchlens_core::Error {
    fn from(err: StoreError) -> Self {
        use matchlens_core::Error;

        match err {
            StoreError::HttpError(e) => Error::StoreUnavailable(e.to_string()),
            StoreError::QueryError {
                status_code,
                message,
            } => Error::Query {
                status: status_code,
                message,
            },
            StoreError::DecodeError(e) => Error::Serialization(e),
            StoreError::ConfigError(msg) => Error::Config(msg),
            e @ StoreError::NotReady { .. } => Error::StoreUnavailable(e.to_string()),
            StoreError::Io(e) => Error::Io(e),
        }
    }
}
