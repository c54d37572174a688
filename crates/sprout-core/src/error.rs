//! Error types for Sprout Core.

use thiserror::Error;

/// Result type alias for Sprout operations.
pub type Result<T> = std::result::Result<T, SproutError>;

/// Errors that can occur in Sprout operations.
#[derive(Error, Debug)]
pub enum SproutError {
    /// Seed contains a matched token that is not in the vocabulary.
    #[error("unknown token {token:?} at byte {position}")]
    UnknownToken {
        /// The offending token text.
        token: String,
        /// Byte offset of the token in the input string.
        position: usize,
    },

    /// Vocabulary construction or lookup error.
    #[error("vocabulary error: {0}")]
    Vocabulary(String),

    /// The sequence model is not usable; no generation may proceed.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Model step error (including score shape mismatches).
    #[error("model error: {0}")]
    Model(String),

    /// Next-token distribution could not be sampled.
    #[error("distribution error: {0}")]
    Distribution(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
