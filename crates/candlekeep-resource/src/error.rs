//! Error types for resource handling.

use candlekeep_common::ResourceCategory;
use thiserror::Error;

/// Errors that can occur when reading, editing or locating resources.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] candlekeep_common::Error),

    /// Document engine error.
    #[error("{0}")]
    Struct(#[from] candlekeep_struct::Error),

    /// Effect layout error.
    #[error("{0}")]
    Effect(#[from] candlekeep_effect::Error),

    /// The file does not start with the expected signature.
    #[error("invalid signature: expected {expected:?}, got {actual:?}")]
    InvalidSignature { expected: String, actual: String },

    /// A version this crate cannot read.
    #[error("unsupported {category} version {version:?}")]
    UnsupportedVersion {
        category: ResourceCategory,
        version: String,
    },

    /// A provider has no such resource.
    #[error("resource not found: {name}.{category}")]
    NotFound {
        name: String,
        category: ResourceCategory,
    },

    /// An ability index past the item's abilities.
    #[error("ability {index} out of range: item has {count}")]
    NoSuchAbility { index: usize, count: usize },

    /// An effect index past the owner's effects.
    #[error("effect {index} out of range: owner has {count}")]
    NoSuchEffect { index: usize, count: usize },

    /// Header counts that do not fit their fields.
    #[error("effect table inconsistent: {0}")]
    EffectTable(String),
}

/// Result type for resource operations.
pub type Result<T> = std::result::Result<T, Error>;
