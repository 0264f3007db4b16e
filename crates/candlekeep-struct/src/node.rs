//! Arena nodes.

use std::borrow::Cow;
use std::hash::BuildHasherDefault;

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;

use crate::{Capability, Field, FieldValue, RecordKind};

pub(crate) type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Stable handle of a node inside a [`Document`](crate::Document) arena.
///
/// Handles stay valid until the node is removed; they are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The arena slot index.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub name: Cow<'static, str>,
    pub offset: usize,
    /// Byte size for leaves. Structures derive theirs from `end_offset`.
    pub size: usize,
    pub capability: Capability,
    pub aliased: bool,
    /// Set when inserting this node assigned its section offset.
    pub claimed_section: bool,
    pub parent: Option<NodeId>,
    pub content: Content,
}

#[derive(Debug, Clone)]
pub(crate) enum Content {
    Leaf(FieldValue),
    Struct(StructData),
}

#[derive(Debug, Clone)]
pub(crate) struct StructData {
    pub kind: RecordKind,
    pub children: Vec<NodeId>,
    pub end_offset: usize,
    pub bias: isize,
    pub dirty: bool,
    pub offsets: FxHashMap<RecordKind, NodeId>,
    pub counts: FxHashMap<RecordKind, NodeId>,
}

impl StructData {
    pub fn new(kind: RecordKind, end_offset: usize) -> Self {
        Self {
            kind,
            children: Vec::new(),
            end_offset,
            bias: 0,
            dirty: false,
            offsets: FxHashMap::default(),
            counts: FxHashMap::default(),
        }
    }
}

impl Node {
    pub fn leaf(field: Field, parent: Option<NodeId>) -> Self {
        Self {
            name: field.name,
            offset: field.offset,
            size: field.size,
            capability: field.capability,
            aliased: field.aliased,
            claimed_section: false,
            parent,
            content: Content::Leaf(field.value),
        }
    }

    pub fn structure(
        name: Cow<'static, str>,
        kind: RecordKind,
        offset: usize,
        capability: Capability,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            name,
            offset,
            size: 0,
            capability,
            aliased: false,
            claimed_section: false,
            parent,
            content: Content::Struct(StructData::new(kind, offset)),
        }
    }

    /// Number of bytes covered by this node.
    pub fn extent(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => self.size,
            Content::Struct(data) => data.end_offset.saturating_sub(self.offset),
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.extent()
    }

    pub fn as_struct(&self) -> Option<&StructData> {
        match &self.content {
            Content::Struct(data) => Some(data),
            Content::Leaf(_) => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructData> {
        match &mut self.content {
            Content::Struct(data) => Some(data),
            Content::Leaf(_) => None,
        }
    }

    pub fn value(&self) -> Option<&FieldValue> {
        match &self.content {
            Content::Leaf(value) => Some(value),
            Content::Struct(_) => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut FieldValue> {
        match &mut self.content {
            Content::Leaf(value) => Some(value),
            Content::Struct(_) => None,
        }
    }

    pub fn to_field(&self) -> Option<Field> {
        let value = self.value()?.clone();
        Some(Field {
            name: self.name.clone(),
            offset: self.offset,
            size: self.size,
            value,
            capability: self.capability,
            aliased: self.aliased,
        })
    }
}
