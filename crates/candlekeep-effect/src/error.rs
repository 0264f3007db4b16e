//! Error types for effect layout resolution.

use thiserror::Error;

use crate::Role;

/// Errors that can occur when resolving or addressing an effect record.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] candlekeep_common::Error),

    /// Document engine error.
    #[error("{0}")]
    Struct(#[from] candlekeep_struct::Error),

    /// The record is too short or its opcode cannot be read.
    #[error("invalid record structure at {offset:#x}: {reason}")]
    InvalidRecord { offset: usize, reason: String },

    /// A role lookup or replacement that does not match the layout.
    #[error("cannot address {role:?}: {reason}")]
    Addressing { role: Role, reason: String },

    /// Unknown game identifier.
    #[error("unknown game: {0}")]
    UnknownGame(String),

    /// Unknown engine extension.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}

/// Result type for effect operations.
pub type Result<T> = std::result::Result<T, Error>;
