//! Error types for frostwork

use thiserror::Error;

/// Result type alias for frostwork operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the tick path.
///
/// The tick path itself is infallible: bad samples degrade to a no-op tick.
/// Errors only surface from configuration validation and snapshot decoding.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Snapshot integrity verification failed: {0}")]
    SnapshotIntegrity(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}
