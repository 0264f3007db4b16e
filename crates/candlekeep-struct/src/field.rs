//! Leaf field descriptions.

use std::borrow::Cow;

use candlekeep_common::{ResRef, ResourceCategory};

use crate::{Capability, FieldValue, Labels, RecordKind};

/// A typed value occupying `[offset, offset + size)` of a resource buffer.
///
/// `Field` is the detached form used to build documents and to describe
/// replacements; once linked into a [`Document`](crate::Document) it is
/// addressed through a [`NodeId`](crate::NodeId).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: Cow<'static, str>,
    pub(crate) offset: usize,
    pub(crate) size: usize,
    pub(crate) value: FieldValue,
    pub(crate) capability: Capability,
    pub(crate) aliased: bool,
}

impl Field {
    /// Create a field from its parts.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        offset: usize,
        size: usize,
        value: FieldValue,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
            value,
            capability: Capability::Fixed,
            aliased: false,
        }
    }

    /// Unsigned integer field.
    pub fn unsigned(name: impl Into<Cow<'static, str>>, offset: usize, size: usize, value: u32) -> Self {
        Self::new(name, offset, size, FieldValue::Unsigned(value))
    }

    /// Signed integer field.
    pub fn signed(name: impl Into<Cow<'static, str>>, offset: usize, size: usize, value: i32) -> Self {
        Self::new(name, offset, size, FieldValue::Signed(value))
    }

    /// Enumerated field.
    pub fn enumeration(
        name: impl Into<Cow<'static, str>>,
        offset: usize,
        size: usize,
        value: u32,
        labels: Labels,
    ) -> Self {
        Self::new(name, offset, size, FieldValue::Enum { value, labels })
    }

    /// Bit flags field.
    pub fn flags(
        name: impl Into<Cow<'static, str>>,
        offset: usize,
        size: usize,
        bits: u32,
        labels: Labels,
    ) -> Self {
        Self::new(name, offset, size, FieldValue::Flags { bits, labels })
    }

    /// Fixed-width text field.
    pub fn text(name: impl Into<Cow<'static, str>>, offset: usize, size: usize, text: impl Into<String>) -> Self {
        Self::new(name, offset, size, FieldValue::Text(text.into()))
    }

    /// 8-byte resource reference field.
    pub fn resref(
        name: impl Into<Cow<'static, str>>,
        offset: usize,
        resref: ResRef,
        category: Option<ResourceCategory>,
    ) -> Self {
        Self::new(
            name,
            offset,
            8,
            FieldValue::ResRef {
                name: resref,
                category,
            },
        )
    }

    /// Opaque bytes field.
    pub fn bytes(name: impl Into<Cow<'static, str>>, offset: usize, bytes: Vec<u8>) -> Self {
        let size = bytes.len();
        Self::new(name, offset, size, FieldValue::Bytes(bytes))
    }

    /// Padding or unknown data.
    pub fn unknown(offset: usize, bytes: Vec<u8>) -> Self {
        Self::bytes("Unknown", offset, bytes)
    }

    /// Section offset field governing records of `section`.
    pub fn section_offset(
        name: impl Into<Cow<'static, str>>,
        offset: usize,
        size: usize,
        value: u32,
        section: RecordKind,
    ) -> Self {
        Self::new(name, offset, size, FieldValue::SectionOffset { value, section })
    }

    /// Section count field governing records of `section`.
    pub fn section_count(
        name: impl Into<Cow<'static, str>>,
        offset: usize,
        size: usize,
        value: u32,
        section: RecordKind,
    ) -> Self {
        Self::new(name, offset, size, FieldValue::SectionCount { value, section })
    }

    /// Mark this field as addable records of `kind`.
    pub fn addable(mut self, kind: RecordKind) -> Self {
        self.capability = Capability::Addable(kind);
        self
    }

    /// Mark this field as sharing its bytes with a sibling.
    pub fn aliased(mut self) -> Self {
        self.aliased = true;
        self
    }

    /// Move the field to a new offset.
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Rename the field.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    /// The value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The capability.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Whether the field aliases a sibling's bytes.
    pub fn is_aliased(&self) -> bool {
        self.aliased
    }

    /// The encoded bytes of this field.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes(self.size)
    }
}
