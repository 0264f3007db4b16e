//! Structural change notifications.

use crate::NodeId;

/// A change applied to a [`Document`](crate::Document).
///
/// Events are queued by every mutation and drained by the caller with
/// [`Document::drain_events`](crate::Document::drain_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureEvent {
    /// A field or structure was inserted.
    Inserted {
        parent: NodeId,
        node: NodeId,
        index: usize,
        offset: usize,
        size: usize,
    },
    /// A field or structure was removed.
    Removed {
        parent: NodeId,
        name: String,
        offset: usize,
        size: usize,
    },
    /// A field was replaced in place.
    Replaced {
        parent: NodeId,
        node: NodeId,
        index: usize,
    },
    /// A leaf value was edited.
    ValueChanged { node: NodeId },
}
