//! Sequential construction of a structure from raw bytes.

use std::borrow::Cow;

use candlekeep_common::{BinaryReader, ResRef, ResourceCategory};

use crate::{Capability, Document, Field, FieldValue, Labels, NodeId, RecordKind, Result};

/// Reads consecutive fields from a buffer and appends them to a structure.
///
/// Offsets are absolute positions in the buffer. When the buffer ends before
/// a field does, the remaining bytes become a single `Unknown` field, the
/// reader is marked truncated and every later read is a no-op returning a
/// zero value.
pub struct StructReader<'d, 'a> {
    doc: &'d mut Document,
    parent: NodeId,
    reader: BinaryReader<'a>,
    truncated: bool,
}

impl<'d, 'a> StructReader<'d, 'a> {
    /// Start reading `data` at `offset` into the structure `parent`.
    pub fn new(doc: &'d mut Document, parent: NodeId, data: &'a [u8], offset: usize) -> Self {
        Self {
            doc,
            parent,
            reader: BinaryReader::new_at(data, offset),
            truncated: false,
        }
    }

    /// The structure being filled.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Current absolute position.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Move to an absolute position. Ignored once the input ran out.
    pub fn seek(&mut self, position: usize) {
        if !self.truncated {
            self.reader.seek(position);
        }
    }

    /// The whole input buffer.
    pub fn data(&self) -> &'a [u8] {
        self.reader.data()
    }

    /// Whether the input ran out.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Direct access to the document being built.
    pub fn document(&mut self) -> &mut Document {
        self.doc
    }

    /// Read a `size`-byte field and append it, unless the input is exhausted.
    fn read_with(
        &mut self,
        name: Cow<'static, str>,
        size: usize,
        make: impl FnOnce(&mut BinaryReader<'a>) -> candlekeep_common::Result<FieldValue>,
    ) -> Result<Option<FieldValue>> {
        if self.truncated {
            return Ok(None);
        }
        let offset = self.reader.position();
        if self.reader.remaining() < size {
            self.truncate(&name, size)?;
            return Ok(None);
        }

        let value = make(&mut self.reader)?;
        self.doc
            .push_field(self.parent, Field::new(name, offset, size, value.clone()))?;
        Ok(Some(value))
    }

    fn truncate(&mut self, name: &str, needed: usize) -> Result<()> {
        let offset = self.reader.position();
        let rest = self.reader.remaining_bytes().to_vec();
        tracing::warn!(
            field = name,
            offset,
            needed,
            available = rest.len(),
            "input truncated"
        );
        if !rest.is_empty() {
            self.doc.push_field(self.parent, Field::unknown(offset, rest))?;
        }
        self.reader.seek(self.reader.len());
        self.truncated = true;
        Ok(())
    }

    /// Unsigned integer of 1, 2 or 4 bytes.
    pub fn unsigned(&mut self, name: impl Into<Cow<'static, str>>, size: usize) -> Result<u32> {
        let value = self.read_with(name.into(), size, |r| {
            r.read_uint(size).map(FieldValue::Unsigned)
        })?;
        Ok(value.and_then(|v| v.as_u32()).unwrap_or(0))
    }

    /// Signed integer of 1, 2 or 4 bytes.
    pub fn signed(&mut self, name: impl Into<Cow<'static, str>>, size: usize) -> Result<i32> {
        let value = self.read_with(name.into(), size, |r| {
            r.read_int(size).map(FieldValue::Signed)
        })?;
        Ok(value.and_then(|v| v.as_i32()).unwrap_or(0))
    }

    /// Enumerated value over `labels`.
    pub fn enumeration(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        size: usize,
        labels: Labels,
    ) -> Result<u32> {
        let value = self.read_with(name.into(), size, |r| {
            r.read_uint(size)
                .map(|value| FieldValue::Enum { value, labels })
        })?;
        Ok(value.and_then(|v| v.as_u32()).unwrap_or(0))
    }

    /// Bit flags over `labels`.
    pub fn flags(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        size: usize,
        labels: Labels,
    ) -> Result<u32> {
        let value = self.read_with(name.into(), size, |r| {
            r.read_uint(size).map(|bits| FieldValue::Flags { bits, labels })
        })?;
        Ok(value.and_then(|v| v.as_u32()).unwrap_or(0))
    }

    /// Fixed-width text.
    pub fn text(&mut self, name: impl Into<Cow<'static, str>>, size: usize) -> Result<String> {
        let value = self.read_with(name.into(), size, |r| r.read_text(size).map(FieldValue::Text))?;
        Ok(match value {
            Some(FieldValue::Text(s)) => s,
            _ => String::new(),
        })
    }

    /// 8-byte resource reference.
    pub fn resref(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        category: Option<ResourceCategory>,
    ) -> Result<ResRef> {
        let value = self.read_with(name.into(), 8, |r| {
            r.read_resref()
                .map(|name| FieldValue::ResRef { name, category })
        })?;
        Ok(value
            .as_ref()
            .and_then(|v| v.as_resref())
            .copied()
            .unwrap_or(ResRef::EMPTY))
    }

    /// Opaque bytes.
    pub fn bytes(&mut self, name: impl Into<Cow<'static, str>>, size: usize) -> Result<()> {
        self.read_with(name.into(), size, |r| {
            r.read_bytes(size).map(|b| FieldValue::Bytes(b.to_vec()))
        })?;
        Ok(())
    }

    /// Offset of the run of records of `section`.
    pub fn section_offset(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        size: usize,
        section: RecordKind,
    ) -> Result<u32> {
        let value = self.read_with(name.into(), size, |r| {
            r.read_uint(size)
                .map(|value| FieldValue::SectionOffset { value, section })
        })?;
        Ok(value.and_then(|v| v.as_u32()).unwrap_or(0))
    }

    /// Number of records of `section`.
    pub fn section_count(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        size: usize,
        section: RecordKind,
    ) -> Result<u32> {
        let value = self.read_with(name.into(), size, |r| {
            r.read_uint(size)
                .map(|value| FieldValue::SectionCount { value, section })
        })?;
        Ok(value.and_then(|v| v.as_u32()).unwrap_or(0))
    }

    /// Append a field that was built elsewhere, placing it at the current
    /// position and advancing past it.
    ///
    /// The field's value is kept as given; use this for layouts produced by
    /// a resolver that already decoded the bytes.
    pub fn field(&mut self, field: Field) -> Result<Option<NodeId>> {
        if self.truncated {
            return Ok(None);
        }
        let size = field.size();
        if self.reader.remaining() < size {
            self.truncate(field.name(), size)?;
            return Ok(None);
        }
        let offset = self.reader.position();
        let id = self.doc.push_field(self.parent, field.at(offset))?;
        self.reader.advance(size);
        Ok(Some(id))
    }

    /// Append several prebuilt fields in order.
    pub fn fields(&mut self, fields: impl IntoIterator<Item = Field>) -> Result<()> {
        for field in fields {
            self.field(field)?;
        }
        Ok(())
    }

    /// Read a nested structure starting at the current position.
    ///
    /// The closure fills the nested structure through its own reader; this
    /// reader resumes after the last byte the closure consumed. Nothing is
    /// added once the input ran out.
    pub fn nested<F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        kind: RecordKind,
        capability: Capability,
        build: F,
    ) -> Result<Option<NodeId>>
    where
        F: FnOnce(&mut StructReader<'_, 'a>) -> Result<()>,
    {
        if self.truncated {
            return Ok(None);
        }
        let offset = self.reader.position();
        let id = self
            .doc
            .push_struct(self.parent, name, kind, offset, capability)?;

        let mut inner = StructReader {
            doc: &mut *self.doc,
            parent: id,
            reader: BinaryReader::new_at(self.reader.data(), offset),
            truncated: false,
        };
        build(&mut inner)?;
        let end = inner.position();
        let truncated = inner.truncated;

        self.doc.set_end_offset(id, end)?;
        self.doc.index_sections(id)?;
        self.reader.seek(end);
        self.truncated = truncated;
        Ok(Some(id))
    }

    /// Finish the structure; returns the position after the last byte read.
    pub fn finish(self) -> Result<usize> {
        let end = self.reader.position();
        self.doc.set_end_offset(self.parent, end)?;
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: RecordKind = RecordKind::new("Header");

    #[test]
    fn test_reads_sequential_fields() {
        let data = [1u8, 0, 2, 0, 0, 0, b'A', b'B', 0, 0];
        let mut doc = Document::new("Test", HEADER, 0);
        let root = doc.root();
        let mut reader = StructReader::new(&mut doc, root, &data, 0);
        assert_eq!(reader.unsigned("A", 2).unwrap(), 1);
        assert_eq!(reader.unsigned("B", 4).unwrap(), 2);
        assert_eq!(reader.text("Name", 4).unwrap(), "AB");
        assert_eq!(reader.finish().unwrap(), 10);

        let root = doc.get(root).unwrap();
        assert_eq!(root.child_count(), 3);
        assert_eq!(root.field("Name").unwrap().offset(), 6);
        assert_eq!(root.end_offset(), Some(10));
    }

    #[test]
    fn test_truncation_keeps_remaining_bytes() {
        let data = [1u8, 0, 0xAA];
        let mut doc = Document::new("Test", HEADER, 0);
        let root = doc.root();
        let mut reader = StructReader::new(&mut doc, root, &data, 0);
        reader.unsigned("A", 2).unwrap();
        assert_eq!(reader.unsigned("B", 4).unwrap(), 0);
        assert!(reader.is_truncated());
        assert_eq!(reader.unsigned("C", 1).unwrap(), 0);
        reader.finish().unwrap();

        let root = doc.get(root).unwrap();
        assert_eq!(root.child_count(), 2);
        let unknown = root.child(1).unwrap();
        assert_eq!(unknown.name(), "Unknown");
        assert_eq!(unknown.value(), Some(&FieldValue::Bytes(vec![0xAA])));
    }

    #[test]
    fn test_nested_resumes_after_child() {
        let data = [0u8; 12];
        let mut doc = Document::new("Test", HEADER, 0);
        let root = doc.root();
        let mut reader = StructReader::new(&mut doc, root, &data, 0);
        reader.unsigned("Before", 4).unwrap();
        let child = reader
            .nested("Child", RecordKind::new("Child"), Capability::Fixed, |r| {
                r.unsigned("X", 4)?;
                Ok(())
            })
            .unwrap()
            .unwrap();
        reader.unsigned("After", 4).unwrap();
        reader.finish().unwrap();

        assert_eq!(doc.get(child).unwrap().offset(), 4);
        assert_eq!(doc.get(child).unwrap().end_offset(), Some(8));
        assert_eq!(doc.find_by_name(root, "After", false).map(|id| doc.get(id).unwrap().offset()), Some(8));
    }
}
