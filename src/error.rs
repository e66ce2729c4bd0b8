//! Error types for versioned_trie

use thiserror::Error;

/// Result type alias for versioned_trie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in versioned_trie operations
///
/// Lookups never fail: an absent key, a value of another type, and an unknown
/// version all come back as `None`. Errors are reserved for rejected input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Key must not be empty")]
    EmptyKey,

    #[error("Invalid command on line {line}: {message}")]
    InvalidCommand { line: usize, message: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
