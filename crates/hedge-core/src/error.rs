//! Error types for hedge-core

use thiserror::Error;

/// Result type alias for hedge-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for node and state operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Node processing failed
    #[error("Node processing failed: {0}")]
    ProcessingFailed(String),

    /// A signal was already recorded under this key
    #[error("Signal already recorded for '{key}'")]
    SignalConflict { key: String },

    /// Selection references a key outside the analyst registry
    #[error("Unknown analyst: '{key}'")]
    UnknownAnalyst { key: String },
}
