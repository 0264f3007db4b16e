//! The arena-backed field tree.
//!
//! A [`Document`] owns every node of one resource. Structures and leaves are
//! addressed by [`NodeId`]; parent links are plain indices, so a child can
//! never own its parent and cloning a subtree is a straight copy.

use std::borrow::Cow;
use std::io::Write;

use crate::node::{Content, Node, StructData};
use crate::view::NodeRef;
use crate::{
    Capability, Error, Field, FieldType, FieldValue, NodeId, RecordKind, Result, StructureEvent,
};

/// How a section offset that sits exactly at an insertion point reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionShift {
    /// Shift it, unless it governs the kind being inserted.
    #[default]
    ExemptOwnSection,
    /// Always shift it, including when it governs the inserted kind.
    AlwaysShift,
}

/// A tree of offset-addressed fields backed by an arena.
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) root: NodeId,
    pub(crate) shift: SectionShift,
    pub(crate) events: Vec<StructureEvent>,
    pub(crate) closed: bool,
}

impl Document {
    /// Create an empty document whose root structure starts at `offset`.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: RecordKind, offset: usize) -> Self {
        let root = Node::structure(name.into(), kind, offset, Capability::Fixed, None);
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
            shift: SectionShift::default(),
            events: Vec::new(),
            closed: false,
        }
    }

    /// Create an empty, detached record that can be inserted into another
    /// document as an addable structure of `kind`.
    pub fn record(name: impl Into<Cow<'static, str>>, kind: RecordKind) -> Self {
        let mut doc = Self::new(name, kind, 0);
        if let Some(root) = doc.nodes[0].as_mut() {
            root.capability = Capability::Addable(kind);
        }
        doc
    }

    /// Use a different section shift policy.
    pub fn with_section_shift(mut self, shift: SectionShift) -> Self {
        self.shift = shift;
        self
    }

    /// The section shift policy.
    pub fn section_shift(&self) -> SectionShift {
        self.shift
    }

    /// The root structure.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// A view of a node.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes
            .get(id.index())
            .and_then(|slot| slot.as_ref())
            .map(|node| NodeRef::new(self, id, node))
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .and_then(|slot| slot.as_ref())
            .ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
            .ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn struct_data(&self, id: NodeId) -> Result<&StructData> {
        self.node(id)?.as_struct().ok_or(Error::NotAStruct(id))
    }

    pub(crate) fn struct_data_mut(&mut self, id: NodeId) -> Result<&mut StructData> {
        self.node_mut(id)?.as_struct_mut().ok_or(Error::NotAStruct(id))
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(())
    }

    pub(crate) fn live_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Append a leaf to `parent` without any offset maintenance.
    ///
    /// This is the construction path used by parsers and the layout
    /// resolver. Section offset and count fields are registered with the
    /// parent as they are added; the parent's end offset grows to cover the
    /// field.
    pub fn push_field(&mut self, parent: NodeId, field: Field) -> Result<NodeId> {
        self.ensure_open()?;
        self.struct_data(parent)?;

        let end = field.end();
        let section = match &field.value {
            FieldValue::SectionOffset { section, .. } => Some((true, *section)),
            FieldValue::SectionCount { section, .. } => Some((false, *section)),
            _ => None,
        };

        let id = self.alloc(Node::leaf(field, Some(parent)));
        let data = self.struct_data_mut(parent)?;
        data.children.push(id);
        if let Some((is_offset, kind)) = section {
            let registry = if is_offset {
                &mut data.offsets
            } else {
                &mut data.counts
            };
            registry.entry(kind).or_insert(id);
        }

        self.extend_end(parent, end)?;
        Ok(id)
    }

    /// Append an empty structure to `parent`.
    pub fn push_struct(
        &mut self,
        parent: NodeId,
        name: impl Into<Cow<'static, str>>,
        kind: RecordKind,
        offset: usize,
        capability: Capability,
    ) -> Result<NodeId> {
        self.ensure_open()?;
        self.struct_data(parent)?;

        let id = self.alloc(Node::structure(name.into(), kind, offset, capability, Some(parent)));
        self.struct_data_mut(parent)?.children.push(id);
        self.extend_end(parent, offset)?;
        Ok(id)
    }

    /// Set the end offset of a structure during construction.
    ///
    /// Ancestors grow to cover the new end if needed.
    pub fn set_end_offset(&mut self, id: NodeId, end: usize) -> Result<()> {
        self.struct_data_mut(id)?.end_offset = end;
        self.extend_end(id, end)
    }

    /// Set the correction applied to section offsets recorded in `id`.
    pub fn set_extra_offset_bias(&mut self, id: NodeId, bias: isize) -> Result<()> {
        self.struct_data_mut(id)?.bias = bias;
        Ok(())
    }

    fn extend_end(&mut self, id: NodeId, end: usize) -> Result<()> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_mut(node_id)?;
            if let Some(data) = node.as_struct_mut() {
                if data.end_offset < end {
                    data.end_offset = end;
                }
            }
            current = node.parent;
        }
        Ok(())
    }

    /// Rebuild the section offset and count registries of a structure by
    /// scanning its children.
    pub fn index_sections(&mut self, id: NodeId) -> Result<()> {
        let children = self.struct_data(id)?.children.clone();
        let mut entries = Vec::new();
        for child in children {
            match self.node(child)?.value() {
                Some(FieldValue::SectionOffset { section, .. }) => entries.push((true, *section, child)),
                Some(FieldValue::SectionCount { section, .. }) => entries.push((false, *section, child)),
                _ => {}
            }
        }

        let data = self.struct_data_mut(id)?;
        data.offsets.clear();
        data.counts.clear();
        for (is_offset, kind, child) in entries {
            let registry = if is_offset {
                &mut data.offsets
            } else {
                &mut data.counts
            };
            registry.entry(kind).or_insert(child);
        }
        Ok(())
    }

    fn index_sections_recursive(&mut self, id: NodeId) -> Result<()> {
        self.index_sections(id)?;
        for child in self.struct_data(id)?.children.clone() {
            if self.node(child)?.as_struct().is_some() {
                self.index_sections_recursive(child)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Registries
    // ------------------------------------------------------------------

    /// The section offset field governing `kind` within `parent`.
    pub fn section_offset(&self, parent: NodeId, kind: RecordKind) -> Option<NodeId> {
        self.struct_data(parent).ok()?.offsets.get(&kind).copied()
    }

    /// The section count field governing `kind` within `parent`.
    pub fn section_count(&self, parent: NodeId, kind: RecordKind) -> Option<NodeId> {
        self.struct_data(parent).ok()?.counts.get(&kind).copied()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// `id` followed by each of its ancestors up to the root.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.node(node_id) {
                Ok(node) => {
                    path.push(node_id);
                    current = node.parent;
                }
                Err(_) => break,
            }
        }
        path
    }

    /// Nesting depth of a node; the root has depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).len().saturating_sub(1)
    }

    pub(crate) fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            out.push(node_id);
            if let Ok(data) = self.struct_data(node_id) {
                stack.extend(data.children.iter().rev());
            }
        }
        out
    }

    /// Find the field starting at `offset` below `start`.
    ///
    /// When fields at several nesting depths start at `offset`, the most
    /// deeply nested one wins. With `recursive == false` only direct
    /// children are considered.
    pub fn find_at_offset(
        &self,
        start: NodeId,
        offset: usize,
        filter: Option<FieldType>,
        recursive: bool,
    ) -> Option<NodeId> {
        let predicate = |node: &Node| {
            node.offset == offset
                && match filter {
                    None => true,
                    Some(FieldType::Struct) => node.as_struct().is_some(),
                    Some(ty) => node.value().map(|v| v.field_type()) == Some(ty),
                }
        };
        self.find_deepest(start, 0, recursive, &predicate)
            .map(|(_, id)| id)
    }

    /// Find a field by name below `start`, preferring the deepest match.
    pub fn find_by_name(&self, start: NodeId, name: &str, recursive: bool) -> Option<NodeId> {
        let predicate = |node: &Node| node.name == name;
        self.find_deepest(start, 0, recursive, &predicate)
            .map(|(_, id)| id)
    }

    fn find_deepest(
        &self,
        parent: NodeId,
        depth: usize,
        recursive: bool,
        predicate: &dyn Fn(&Node) -> bool,
    ) -> Option<(usize, NodeId)> {
        let data = self.struct_data(parent).ok()?;
        let mut best: Option<(usize, NodeId)> = None;

        for &child in &data.children {
            let Ok(node) = self.node(child) else {
                continue;
            };
            if predicate(node) && best.map_or(true, |(d, _)| depth > d) {
                best = Some((depth, child));
            }
            if recursive && node.as_struct().is_some() {
                if let Some((d, found)) = self.find_deepest(child, depth + 1, recursive, predicate) {
                    if best.map_or(true, |(bd, _)| d > bd) {
                        best = Some((d, found));
                    }
                }
            }
        }

        best
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Order the children of a structure by offset.
    ///
    /// The sort is stable, so fields sharing an offset keep their relative
    /// order.
    pub fn sort(&mut self, id: NodeId) -> Result<()> {
        let children = self.struct_data(id)?.children.clone();
        let mut keyed = Vec::with_capacity(children.len());
        for child in children {
            keyed.push((self.node(child)?.offset, child));
        }
        keyed.sort_by_key(|(offset, _)| *offset);
        self.struct_data_mut(id)?.children = keyed.into_iter().map(|(_, c)| c).collect();
        Ok(())
    }

    /// Sort a structure and every structure below it.
    pub fn sort_recursive(&mut self, id: NodeId) -> Result<()> {
        self.sort(id)?;
        for child in self.struct_data(id)?.children.clone() {
            if self.node(child)?.as_struct().is_some() {
                self.sort_recursive(child)?;
            }
        }
        Ok(())
    }

    /// All leaf fields below `id`, ordered by offset.
    pub fn flatten(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves: Vec<(usize, NodeId)> = self
            .subtree(id)
            .into_iter()
            .filter_map(|n| {
                let node = self.node(n).ok()?;
                node.value().map(|_| (node.offset, n))
            })
            .collect();
        leaves.sort_by_key(|(offset, _)| *offset);
        leaves.into_iter().map(|(_, n)| n).collect()
    }

    /// Pairs of consecutive, non-aliased leaves whose byte ranges overlap.
    pub fn overlapping_leaves(&self, id: NodeId) -> Vec<(NodeId, NodeId)> {
        let leaves: Vec<NodeId> = self
            .flatten(id)
            .into_iter()
            .filter(|n| self.node(*n).map(|node| !node.aliased).unwrap_or(false))
            .collect();

        let mut out = Vec::new();
        for pair in leaves.windows(2) {
            let (Ok(a), Ok(b)) = (self.node(pair[0]), self.node(pair[1])) else {
                continue;
            };
            if a.end() > b.offset {
                out.push((pair[0], pair[1]));
            }
        }
        out
    }

    /// Fill gaps between the fields of `id` (and of every structure below
    /// it) with opaque `Unknown` fields.
    ///
    /// Padding content is copied from `source` (the buffer the document was
    /// parsed from, addressed absolutely) where available. The root is padded
    /// up to the end of `source`; nested structures up to their end offset.
    /// Returns the number of padding fields added.
    pub fn fill_holes(&mut self, id: NodeId, source: &[u8]) -> Result<usize> {
        self.ensure_open()?;

        let mut added = 0;
        for child in self.struct_data(id)?.children.clone() {
            if self.node(child)?.as_struct().is_some() {
                added += self.fill_holes(child, source)?;
            }
        }

        self.sort(id)?;
        let node = self.node(id)?;
        let start = node.offset;
        let end_offset = node.end();
        let limit = if id == self.root {
            source.len().max(end_offset)
        } else {
            end_offset
        };

        let mut gaps = Vec::new();
        let mut running = start;
        for &child in &self.struct_data(id)?.children {
            let child = self.node(child)?;
            if child.offset > running {
                gaps.push((running, child.offset - running));
            }
            running = running.max(child.end());
        }
        if running < limit {
            gaps.push((running, limit - running));
        }

        for (offset, len) in gaps {
            let mut bytes = source
                .get(offset.min(source.len())..(offset + len).min(source.len()))
                .map(|b| b.to_vec())
                .unwrap_or_default();
            bytes.resize(len, 0);
            tracing::trace!(offset, len, "filling hole");
            self.push_field(id, Field::unknown(offset, bytes))?;
            added += 1;
        }

        self.sort(id)?;
        Ok(added)
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Sort, then write the fields of `id` sequentially.
    ///
    /// Nested structures write their own sorted children in place. Aliased
    /// fields are skipped since their bytes belong to a sibling.
    pub fn serialize(&mut self, id: NodeId) -> Result<Vec<u8>> {
        self.sort_recursive(id)?;
        let mut out = Vec::with_capacity(self.node(id)?.extent());
        self.write_to(id, &mut out)?;
        Ok(out)
    }

    /// Write the children of `id` in their current order.
    pub fn write_to<W: Write>(&self, id: NodeId, writer: &mut W) -> Result<()> {
        for &child in &self.struct_data(id)?.children {
            let node = self.node(child)?;
            match &node.content {
                Content::Leaf(value) => {
                    if !node.aliased {
                        value.write_to(node.size, writer)?;
                    }
                }
                Content::Struct(_) => self.write_to(child, writer)?,
            }
        }
        Ok(())
    }

    /// Write every leaf of `id` at its offset relative to the start of `id`.
    ///
    /// This is the flattened counterpart of [`serialize`](Self::serialize);
    /// both produce identical bytes for hole-free, non-aliased documents.
    pub fn serialize_flat(&self, id: NodeId) -> Result<Vec<u8>> {
        let node = self.node(id)?;
        let base = node.offset;
        let mut out = vec![0u8; node.extent()];

        for leaf in self.flatten(id) {
            let leaf = self.node(leaf)?;
            if leaf.aliased {
                continue;
            }
            let Some(value) = leaf.value() else {
                continue;
            };
            let Some(start) = leaf.offset.checked_sub(base) else {
                continue;
            };
            let end = start + leaf.size;
            if out.len() < end {
                out.resize(end, 0);
            }
            out[start..end].copy_from_slice(&value.to_bytes(leaf.size));
        }

        Ok(out)
    }

    // ------------------------------------------------------------------
    // Cloning
    // ------------------------------------------------------------------

    /// Deep-copy the structure `id` into a new, detached document.
    ///
    /// Section registries of the copy are rebuilt by scanning, never copied.
    pub fn clone_subtree(&self, id: NodeId) -> Result<Document> {
        self.struct_data(id)?;

        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            shift: self.shift,
            events: Vec::new(),
            closed: false,
        };
        let root = copy_subtree(self, id, &mut doc, None, 0)?;
        doc.root = root;
        doc.index_sections_recursive(root)?;
        Ok(doc)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Whether a structure (or the structure holding a leaf) is dirty.
    pub fn is_dirty(&self, id: NodeId) -> bool {
        let Ok(node) = self.node(id) else {
            return false;
        };
        match node.as_struct() {
            Some(data) => data.dirty,
            None => node.parent.map(|p| self.is_dirty(p)).unwrap_or(false),
        }
    }

    /// Mark a node dirty, propagating to the root.
    pub fn mark_dirty(&mut self, id: NodeId) {
        for node_id in self.path_to_root(id) {
            if let Ok(data) = self.struct_data_mut(node_id) {
                data.dirty = true;
            }
        }
    }

    /// Clear every dirty flag after the resource has been saved.
    pub fn acknowledge_save(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            if let Some(data) = node.as_struct_mut() {
                data.dirty = false;
            }
        }
    }

    /// Close the document; every further mutation fails.
    pub fn close(&mut self) {
        self.closed = true;
        self.events.clear();
    }

    /// Whether the document has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Take all pending structural events.
    pub fn drain_events(&mut self) -> Vec<StructureEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending structural events.
    pub fn pending_events(&self) -> &[StructureEvent] {
        &self.events
    }
}

/// Copy `src_id` and everything below it from `src` into `dst`, shifting all
/// offsets by `delta`. Registries are left empty for the caller to rebuild.
pub(crate) fn copy_subtree(
    src: &Document,
    src_id: NodeId,
    dst: &mut Document,
    parent: Option<NodeId>,
    delta: isize,
) -> Result<NodeId> {
    let mut node = src.node(src_id)?.clone();
    node.parent = parent;
    node.claimed_section = false;
    node.offset = rebase(node.offset, delta);

    let children = match node.as_struct_mut() {
        Some(data) => {
            data.end_offset = rebase(data.end_offset, delta);
            data.dirty = false;
            data.offsets.clear();
            data.counts.clear();
            std::mem::take(&mut data.children)
        }
        None => Vec::new(),
    };

    let new_id = dst.alloc(node);
    for child in children {
        let copied = copy_subtree(src, child, dst, Some(new_id), delta)?;
        dst.struct_data_mut(new_id)?.children.push(copied);
    }
    Ok(new_id)
}

pub(crate) fn rebase(offset: usize, delta: isize) -> usize {
    (offset as isize + delta).max(0) as usize
}

pub(crate) fn reindex_tree(doc: &mut Document, id: NodeId) -> Result<()> {
    doc.index_sections_recursive(id)
}
