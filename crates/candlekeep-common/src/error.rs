//! Error types for candlekeep-common.

use thiserror::Error;

/// Common error type for Candlekeep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer at offset {offset:#x}: needed {needed} bytes but only {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Invalid signature bytes encountered.
    #[error("invalid signature: expected {expected:?}, got {actual:?}")]
    InvalidSignature {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// A resource name that does not fit the 8-byte slot.
    #[error("invalid resource name {0:?}: at most 8 ASCII characters")]
    InvalidResRef(String),

    /// Unknown resource category extension.
    #[error("unknown resource category: {0}")]
    UnknownCategory(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
