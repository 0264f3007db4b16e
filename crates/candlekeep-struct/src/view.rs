//! Read-only views of document nodes.

use crate::node::Node;
use crate::{Capability, Document, Field, FieldType, FieldValue, NodeId, RecordKind};

/// A view into one node of a [`Document`].
///
/// Views are lightweight and borrow from the document.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub(crate) fn new(doc: &'a Document, id: NodeId, node: &'a Node) -> Self {
        Self { doc, id, node }
    }

    /// The node's handle.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The field name.
    #[inline]
    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    /// Absolute offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.node.offset
    }

    /// Size in bytes; for structures, `end_offset - offset`.
    #[inline]
    pub fn size(&self) -> usize {
        self.node.extent()
    }

    /// One past the last byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.node.end()
    }

    /// The leaf value, `None` for structures.
    #[inline]
    pub fn value(&self) -> Option<&'a FieldValue> {
        self.node.value()
    }

    /// The field type.
    pub fn field_type(&self) -> FieldType {
        match self.node.value() {
            Some(value) => value.field_type(),
            None => FieldType::Struct,
        }
    }

    /// Whether this node is a structure.
    #[inline]
    pub fn is_struct(&self) -> bool {
        self.node.as_struct().is_some()
    }

    /// The record kind of a structure.
    pub fn kind(&self) -> Option<RecordKind> {
        self.node.as_struct().map(|data| data.kind)
    }

    /// The capability the field was constructed with.
    #[inline]
    pub fn capability(&self) -> Capability {
        self.node.capability
    }

    /// Whether the field may be inserted and removed.
    #[inline]
    pub fn is_addable(&self) -> bool {
        self.node.capability.is_addable()
    }

    /// Whether the field shares its bytes with a sibling.
    #[inline]
    pub fn is_aliased(&self) -> bool {
        self.node.aliased
    }

    /// The parent structure.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node.parent.and_then(|p| self.doc.get(p))
    }

    /// Whether the node has a parent.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.node.parent.is_some()
    }

    /// Child fields of a structure, in list order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.node
            .as_struct()
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |c| doc.get(*c))
    }

    /// The child at `index`.
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        let data = self.node.as_struct()?;
        data.children.get(index).and_then(|c| self.doc.get(*c))
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.node.as_struct().map(|data| data.children.len()).unwrap_or(0)
    }

    /// Index of a direct child by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.children().position(|c| c.name() == name)
    }

    /// A direct child by name.
    pub fn field(&self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.name() == name)
    }

    /// Numeric value of a direct child, by name.
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.field(name).and_then(|c| c.value()).and_then(|v| v.as_u32())
    }

    /// End offset of a structure.
    pub fn end_offset(&self) -> Option<usize> {
        self.node.as_struct().map(|data| data.end_offset)
    }

    /// Offset correction for section offsets recorded in this structure.
    pub fn extra_offset_bias(&self) -> isize {
        self.node.as_struct().map(|data| data.bias).unwrap_or(0)
    }

    /// Whether the node (or its structure) has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.doc.is_dirty(self.id)
    }

    /// Nesting depth; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.doc.depth(self.id)
    }

    /// Detached copy of a leaf field.
    pub fn to_field(&self) -> Option<Field> {
        self.node.to_field()
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("offset", &self.offset())
            .field("size", &self.size())
            .finish()
    }
}
