//! Error types for ballkey

use thiserror::Error;

/// Failure reported by an address derivation backend
#[derive(Debug, Error)]
pub enum DeriveError {
    /// Key is zero or not below the curve order
    #[error("Private key out of range: {0}")]
    KeyOutOfRange(String),

    /// Key does not fit in a 256-bit scalar
    #[error("Private key too wide: {0} hex digits")]
    KeyTooWide(usize),
}

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Bit string containing something other than '0' and '1'
    #[error("Invalid bit string: {0:?}")]
    InvalidBitString(String),

    /// Address derivation failed for a structurally valid candidate
    #[error("Address derivation failed for key {key}: {source}")]
    Derivation {
        key: String,
        #[source]
        source: DeriveError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ballkey operations
pub type Result<T> = std::result::Result<T, Error>;
