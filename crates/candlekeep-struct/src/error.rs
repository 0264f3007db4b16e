//! Error types for the structured document engine.

use thiserror::Error;

use crate::{NodeId, RecordKind};

/// Errors that can occur when building or mutating a [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] candlekeep_common::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A section offset or count cannot be reconciled with a mutation.
    #[error("schema inconsistency in section {section}: {reason}")]
    SchemaInconsistency { section: RecordKind, reason: String },

    /// A child index outside the parent's field list.
    #[error("field index {index} out of range (field count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A replacement field whose size differs from the field it replaces.
    #[error("size mismatch replacing {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A replacement field placed at a different offset.
    #[error("offset mismatch replacing {name}: expected {expected:#x}, got {actual:#x}")]
    OffsetMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A value that does not fit the field's width.
    #[error("value for {name} does not fit in {size} bytes")]
    ValueOutOfRange { name: String, size: usize },

    /// An insert or remove of a fixed-layout field.
    #[error("field {name} is not addable")]
    NotAddable { name: String },

    /// A node id that does not refer to a live node.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// A structure operation applied to a leaf field.
    #[error("node {0:?} is not a structure")]
    NotAStruct(NodeId),

    /// A value operation applied to a structure.
    #[error("node {0:?} is not a leaf field")]
    NotALeaf(NodeId),

    /// The root of a document cannot be removed or replaced.
    #[error("the document root cannot be detached")]
    RootDetach,

    /// Operation on a closed document.
    #[error("document is closed")]
    Closed,
}

impl Error {
    /// Whether this error belongs to the addressing family (bad index,
    /// offset or size in a lookup or replacement).
    pub fn is_addressing(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. }
                | Error::SizeMismatch { .. }
                | Error::OffsetMismatch { .. }
                | Error::UnknownNode(_)
        )
    }
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
