//! Invariant-preserving structural mutation.
//!
//! Every operation in this module validates its whole plan before touching
//! the arena: a failed insert or remove leaves the document exactly as it
//! was.

use crate::document::{copy_subtree, rebase, reindex_tree};
use crate::node::{FxHashMap, Node};
use crate::{
    Capability, Document, Error, Field, FieldValue, NodeId, RecordKind, Result, SectionShift,
    StructureEvent,
};

/// A field or a detached structure to insert into a document.
#[derive(Debug)]
pub enum Addition {
    /// A single leaf field.
    Field(Field),
    /// A detached record; its root becomes the inserted structure.
    Struct(Document),
}

impl From<Field> for Addition {
    fn from(field: Field) -> Self {
        Addition::Field(field)
    }
}

impl From<Document> for Addition {
    fn from(doc: Document) -> Self {
        Addition::Struct(doc)
    }
}

impl Addition {
    fn capability(&self) -> Capability {
        match self {
            Addition::Field(field) => field.capability,
            Addition::Struct(doc) => doc
                .node(doc.root)
                .map(|n| n.capability)
                .unwrap_or_default(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Addition::Field(field) => field.size,
            Addition::Struct(doc) => doc.node(doc.root).map(|n| n.extent()).unwrap_or(0),
        }
    }

    fn name(&self) -> String {
        match self {
            Addition::Field(field) => field.name.to_string(),
            Addition::Struct(doc) => doc
                .node(doc.root)
                .map(|n| n.name.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Where an insertion lands and what it changes besides the new node.
struct Placement {
    target: usize,
    index: usize,
    /// Unset section offset to claim, with the value it receives.
    claim: Option<(NodeId, u32)>,
}

impl Document {
    /// Insert an addable field or record into `container`.
    ///
    /// The new record continues an existing run of its kind, or starts at
    /// the kind's section offset, or is appended at the end of the
    /// container (claiming the section offset if it is still unset). Every
    /// node after the insertion point, every ancestor end offset and every
    /// affected section offset moves by the record's size.
    pub fn insert_addable(
        &mut self,
        container: NodeId,
        addition: impl Into<Addition>,
    ) -> Result<NodeId> {
        self.insert_inner(container, None, addition.into())
    }

    /// Insert an addable field or record at an explicit position of
    /// `container`'s field list.
    pub fn insert_addable_at(
        &mut self,
        container: NodeId,
        index: usize,
        addition: impl Into<Addition>,
    ) -> Result<NodeId> {
        self.insert_inner(container, Some(index), addition.into())
    }

    fn insert_inner(
        &mut self,
        container: NodeId,
        index_hint: Option<usize>,
        addition: Addition,
    ) -> Result<NodeId> {
        self.ensure_open()?;
        let kind = addition
            .capability()
            .addable_kind()
            .ok_or_else(|| Error::NotAddable {
                name: addition.name(),
            })?;
        let size = addition.size();

        self.sort(container)?;

        let count_id = self.section_count(container, kind);
        if let Some(count_id) = count_id {
            let count = self.node(count_id)?;
            let current = count.value().and_then(|v| v.as_u32()).unwrap_or(0);
            let fits = current
                .checked_add(1)
                .map(|next| FieldValue::Unsigned(next).fits(count.size))
                .unwrap_or(false);
            if !fits {
                return Err(Error::SchemaInconsistency {
                    section: kind,
                    reason: format!("{} cannot hold {} records", count.name, current as u64 + 1),
                });
            }
        }

        let placement = self.place(container, kind, index_hint)?;
        let target = placement.target;

        let ancestors = self.path_to_root(container);
        let section_shifts =
            self.plan_section_shifts(kind, target, size, placement.claim.map(|(id, _)| id))?;

        // Commit.
        if let Some(count_id) = count_id {
            adjust_count(self.node_mut(count_id)?, 1);
        }
        if let Some((section_id, value)) = placement.claim {
            set_section_value(self.node_mut(section_id)?, value);
        }

        for id in self.live_ids() {
            if ancestors.contains(&id) {
                continue;
            }
            let node = self.node_mut(id)?;
            let old_offset = node.offset;
            if old_offset >= target {
                node.offset += size;
            }
            if let Some(data) = node.as_struct_mut() {
                if data.end_offset > target || old_offset >= target {
                    data.end_offset += size;
                }
            }
        }
        for &id in &ancestors {
            self.struct_data_mut(id)?.end_offset += size;
        }
        for id in section_shifts {
            adjust_section(self.node_mut(id)?, size as i64);
        }

        let new_id = match addition {
            Addition::Field(field) => self.alloc(Node::leaf(field.at(target), Some(container))),
            Addition::Struct(doc) => {
                let delta = target as isize - doc.node(doc.root)?.offset as isize;
                let id = copy_subtree(&doc, doc.root, self, Some(container), delta)?;
                reindex_tree(self, id)?;
                id
            }
        };
        self.node_mut(new_id)?.claimed_section = placement.claim.is_some();
        self.struct_data_mut(container)?
            .children
            .insert(placement.index, new_id);

        self.mark_dirty(container);
        self.events.push(StructureEvent::Inserted {
            parent: container,
            node: new_id,
            index: placement.index,
            offset: target,
            size,
        });
        tracing::debug!(
            kind = %kind,
            offset = target,
            size,
            index = placement.index,
            "inserted addable record"
        );

        Ok(new_id)
    }

    fn place(
        &self,
        container: NodeId,
        kind: RecordKind,
        index_hint: Option<usize>,
    ) -> Result<Placement> {
        let data = self.struct_data(container)?;
        let children = &data.children;
        let bias = data.bias;

        let section = match self.section_offset(container, kind) {
            Some(id) => Some((id, self.node(id)?.value().and_then(|v| v.as_u32()).unwrap_or(0))),
            None => None,
        };
        let run_last = children.iter().rposition(|c| {
            self.node(*c)
                .map(|n| n.capability == Capability::Addable(kind))
                .unwrap_or(false)
        });
        let first_at_or_after = |target: usize| {
            children
                .iter()
                .position(|c| self.node(*c).map(|n| n.offset >= target).unwrap_or(false))
                .unwrap_or(children.len())
        };

        let unset_section = match section {
            Some((id, 0)) if run_last.is_none() => Some(id),
            _ => None,
        };

        if let Some(index) = index_hint {
            if index > children.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    len: children.len(),
                });
            }
            let target = if index > 0 {
                self.node(children[index - 1])?.end()
            } else if let Some(first) = children.first() {
                self.node(*first)?.offset
            } else {
                self.node(container)?.offset
            };

            if run_last.is_none() {
                if let Some((_, value)) = section.filter(|(_, v)| *v != 0) {
                    let expected = rebase(value as usize, bias);
                    if expected != target {
                        return Err(Error::SchemaInconsistency {
                            section: kind,
                            reason: format!(
                                "section starts at {:#x} but the record would be placed at {:#x}",
                                expected, target
                            ),
                        });
                    }
                }
            }

            let claim = self.claim(unset_section, kind, target, bias)?;
            return Ok(Placement {
                target,
                index,
                claim,
            });
        }

        if let Some(last) = run_last {
            return Ok(Placement {
                target: self.node(children[last])?.end(),
                index: last + 1,
                claim: None,
            });
        }

        if let Some((_, value)) = section.filter(|(_, v)| *v != 0) {
            let target = rebase(value as usize, bias);
            return Ok(Placement {
                target,
                index: first_at_or_after(target),
                claim: None,
            });
        }

        // Append after the last field that owns its bytes; trailing aliased
        // fields share bytes with an earlier sibling and move along.
        let mut target = self.node(container)?.offset;
        for &child in children {
            let node = self.node(child)?;
            if !node.aliased {
                target = target.max(node.end());
            }
        }
        let claim = self.claim(unset_section, kind, target, bias)?;
        Ok(Placement {
            target,
            index: first_at_or_after(target),
            claim,
        })
    }

    fn claim(
        &self,
        section: Option<NodeId>,
        kind: RecordKind,
        target: usize,
        bias: isize,
    ) -> Result<Option<(NodeId, u32)>> {
        let Some(id) = section else {
            return Ok(None);
        };
        let value = target as i64 - bias as i64;
        let node = self.node(id)?;
        match u32::try_from(value) {
            Ok(v) if FieldValue::Unsigned(v).fits(node.size) => Ok(Some((id, v))),
            _ => Err(Error::SchemaInconsistency {
                section: kind,
                reason: format!("{} cannot record offset {:#x}", node.name, value),
            }),
        }
    }

    fn plan_section_shifts(
        &self,
        kind: RecordKind,
        target: usize,
        size: usize,
        claimed: Option<NodeId>,
    ) -> Result<Vec<NodeId>> {
        let mut shifts = Vec::new();
        for id in self.live_ids() {
            if Some(id) == claimed {
                continue;
            }
            let node = self.node(id)?;
            let Some(FieldValue::SectionOffset { value, section }) = node.value() else {
                continue;
            };
            if *value == 0 {
                continue;
            }
            let bias = match node.parent {
                Some(parent) => self.struct_data(parent)?.bias,
                None => 0,
            };
            let position = rebase(*value as usize, bias);

            // TODO: the own-section exemption only looks at the record kind;
            // two runs of the same kind in one container are not told apart.
            let shift = position > target
                || (position == target
                    && (*section != kind || self.shift == SectionShift::AlwaysShift));
            if !shift {
                continue;
            }

            let fits = value
                .checked_add(size as u32)
                .map(|v| FieldValue::Unsigned(v).fits(node.size))
                .unwrap_or(false);
            if !fits {
                return Err(Error::SchemaInconsistency {
                    section: *section,
                    reason: format!("{} overflows when shifted by {}", node.name, size),
                });
            }
            shifts.push(id);
        }
        Ok(shifts)
    }

    /// Remove an addable field or record.
    ///
    /// With `recursive`, addable records nested inside `id` are removed
    /// first, deepest first, each with its own offset cascade. Section counts
    /// are validated for the whole plan before anything changes.
    pub fn remove_addable(&mut self, id: NodeId, recursive: bool) -> Result<()> {
        self.ensure_open()?;
        if id == self.root {
            return Err(Error::RootDetach);
        }
        let node = self.node(id)?;
        if !node.capability.is_addable() {
            return Err(Error::NotAddable {
                name: node.name.to_string(),
            });
        }

        let mut order = Vec::new();
        if recursive {
            self.collect_addable_descendants(id, &mut order)?;
        }
        order.push(id);

        let mut pending: FxHashMap<NodeId, u32> = FxHashMap::default();
        for &n in &order {
            let node = self.node(n)?;
            let Some(kind) = node.capability.addable_kind() else {
                continue;
            };
            let parent = node.parent.ok_or(Error::RootDetach)?;
            if let Some(count_id) = self.section_count(parent, kind) {
                let current = self.node(count_id)?.value().and_then(|v| v.as_u32()).unwrap_or(0);
                let remaining = pending.entry(count_id).or_insert(current);
                if *remaining == 0 {
                    return Err(Error::SchemaInconsistency {
                        section: kind,
                        reason: format!("cannot remove {}: section count is already zero", node.name),
                    });
                }
                *remaining -= 1;
            }
        }

        for n in order {
            self.remove_one(n)?;
        }
        Ok(())
    }

    fn collect_addable_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) -> Result<()> {
        let Some(data) = self.node(id)?.as_struct() else {
            return Ok(());
        };
        for &child in &data.children {
            self.collect_addable_descendants(child, out)?;
            if self.node(child)?.capability.is_addable() {
                out.push(child);
            }
        }
        Ok(())
    }

    fn remove_one(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let parent = node.parent.ok_or(Error::RootDetach)?;
        let kind = node.capability.addable_kind();
        let start = node.offset;
        let size = node.extent();
        let end = start + size;
        let claimed = node.claimed_section;
        let name = node.name.to_string();

        let subtree = self.subtree(id);
        let ancestors = self.path_to_root(parent);

        if let Some(count_id) = kind.and_then(|k| self.section_count(parent, k)) {
            adjust_count(self.node_mut(count_id)?, -1);
        }

        for other in self.live_ids() {
            if subtree.contains(&other) || ancestors.contains(&other) {
                continue;
            }
            let node = self.node_mut(other)?;
            if node.offset >= end {
                node.offset -= size;
            } else if node.offset > start {
                node.offset = start;
            }
            if let Some(data) = node.as_struct_mut() {
                if data.end_offset >= end {
                    data.end_offset -= size;
                } else if data.end_offset > start {
                    data.end_offset = start;
                }
            }
        }
        for &ancestor in &ancestors {
            let data = self.struct_data_mut(ancestor)?;
            data.end_offset = data.end_offset.saturating_sub(size);
        }

        for other in self.live_ids() {
            if subtree.contains(&other) {
                continue;
            }
            let node = self.node(other)?;
            let Some(FieldValue::SectionOffset { value, .. }) = node.value() else {
                continue;
            };
            if *value == 0 {
                continue;
            }
            let bias = match node.parent {
                Some(p) => self.struct_data(p)?.bias,
                None => 0,
            };
            let position = rebase(*value as usize, bias);
            if position >= end {
                adjust_section(self.node_mut(other)?, -(size as i64));
            } else if position > start {
                let value = (start as i64 - bias as i64).max(0) as u32;
                set_section_value(self.node_mut(other)?, value);
            }
        }

        let data = self.struct_data_mut(parent)?;
        data.children.retain(|c| *c != id);
        for n in &subtree {
            self.nodes[n.index()] = None;
        }

        if claimed {
            if let Some(kind) = kind {
                let remaining = self.struct_data(parent)?.children.iter().any(|c| {
                    self.node(*c)
                        .map(|n| n.capability == Capability::Addable(kind))
                        .unwrap_or(false)
                });
                if !remaining {
                    if let Some(section_id) = self.section_offset(parent, kind) {
                        set_section_value(self.node_mut(section_id)?, 0);
                    }
                }
            }
        }

        self.mark_dirty(parent);
        self.events.push(StructureEvent::Removed {
            parent,
            name,
            offset: start,
            size,
        });
        tracing::debug!(offset = start, size, "removed addable record");
        Ok(())
    }

    /// Replace the child at `index` of `parent` with `field`.
    ///
    /// The replacement must start at the same offset and have exactly the
    /// same size. The node handle of the replaced child stays valid and now
    /// refers to the new field.
    pub fn replace_field(&mut self, parent: NodeId, index: usize, field: Field) -> Result<NodeId> {
        self.ensure_open()?;
        let children = &self.struct_data(parent)?.children;
        let Some(&old_id) = children.get(index) else {
            return Err(Error::IndexOutOfRange {
                index,
                len: children.len(),
            });
        };

        let old = self.node(old_id)?;
        if old.extent() != field.size {
            return Err(Error::SizeMismatch {
                name: old.name.to_string(),
                expected: old.extent(),
                actual: field.size,
            });
        }
        if old.offset != field.offset {
            return Err(Error::OffsetMismatch {
                name: old.name.to_string(),
                expected: old.offset,
                actual: field.offset,
            });
        }

        let descendants: Vec<NodeId> = self.subtree(old_id).into_iter().skip(1).collect();
        for n in descendants {
            self.nodes[n.index()] = None;
        }
        self.nodes[old_id.index()] = Some(Node::leaf(field, Some(parent)));

        self.index_sections(parent)?;
        self.mark_dirty(parent);
        self.events.push(StructureEvent::Replaced {
            parent,
            node: old_id,
            index,
        });
        Ok(old_id)
    }

    /// Change the value of a leaf field.
    pub fn set_value(&mut self, id: NodeId, value: FieldValue) -> Result<()> {
        self.ensure_open()?;
        let node = self.node(id)?;
        if node.value().is_none() {
            return Err(Error::NotALeaf(id));
        }
        if !value.fits(node.size) {
            return Err(Error::ValueOutOfRange {
                name: node.name.to_string(),
                size: node.size,
            });
        }
        let parent = node.parent;
        let reindex = matches!(
            (node.value(), &value),
            (Some(FieldValue::SectionOffset { .. } | FieldValue::SectionCount { .. }), _)
                | (_, FieldValue::SectionOffset { .. } | FieldValue::SectionCount { .. })
        );

        if let Some(slot) = self.node_mut(id)?.value_mut() {
            *slot = value;
        }
        if let Some(parent) = parent {
            if reindex {
                self.index_sections(parent)?;
            }
            self.mark_dirty(parent);
        }
        self.events.push(StructureEvent::ValueChanged { node: id });
        Ok(())
    }
}

fn adjust_count(node: &mut Node, delta: i64) {
    if let Some(FieldValue::SectionCount { value, .. }) = node.value_mut() {
        *value = (*value as i64 + delta).max(0) as u32;
    }
}

fn adjust_section(node: &mut Node, delta: i64) {
    if let Some(FieldValue::SectionOffset { value, .. }) = node.value_mut() {
        *value = (*value as i64 + delta).max(0) as u32;
    }
}

fn set_section_value(node: &mut Node, new_value: u32) {
    if let Some(FieldValue::SectionOffset { value, .. }) = node.value_mut() {
        *value = new_value;
    }
}
