//! Store error types.

use thiserror::Error;

/// Result type for durable store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to configure store client: {0}")]
    ConfigError(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Malformed record {0}: {1}")]
    Malformed(String, String),
}

impl StoreError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }

    pub fn write_failed(msg: impl Into<String>) -> Self {
        Self::WriteFailed(msg.into())
    }

    pub fn malformed(record: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Malformed(record.into(), msg.into())
    }
}
