//! Record kinds and field capabilities.

use std::fmt;

/// Identity of a record type, used to pair addable records with the section
/// offset and section count fields that govern them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKind(&'static str);

impl RecordKind {
    /// Create a record kind.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The kind's name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What may be done with a field after the initial parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capability {
    /// Part of the fixed layout of its parent.
    #[default]
    Fixed,
    /// May be inserted and removed; belongs to the run of the given kind.
    Addable(RecordKind),
}

impl Capability {
    /// The record kind if addable.
    pub fn addable_kind(&self) -> Option<RecordKind> {
        match self {
            Capability::Fixed => None,
            Capability::Addable(kind) => Some(*kind),
        }
    }

    /// Whether the field is addable.
    pub fn is_addable(&self) -> bool {
        matches!(self, Capability::Addable(_))
    }
}
