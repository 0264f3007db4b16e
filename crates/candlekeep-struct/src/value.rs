//! Typed field values.

use std::fmt;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use candlekeep_common::{text, ResRef, ResourceCategory};

use crate::{Labels, RecordKind};

/// The type of a field, used as a search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Unsigned integer.
    Unsigned,
    /// Signed integer.
    Signed,
    /// Enumeration over a label set.
    Enum,
    /// Bit flags over a label set.
    Flags,
    /// Fixed-width text.
    Text,
    /// Resource reference.
    ResRef,
    /// Opaque bytes.
    Bytes,
    /// Section offset.
    SectionOffset,
    /// Section count.
    SectionCount,
    /// Nested structure.
    Struct,
}

/// The value of a leaf field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Unsigned integer of 1, 2 or 4 bytes.
    Unsigned(u32),
    /// Signed integer of 1, 2 or 4 bytes.
    Signed(i32),
    /// Enumerated value.
    Enum { value: u32, labels: Labels },
    /// Bit flags; labels are keyed by bit index.
    Flags { bits: u32, labels: Labels },
    /// NUL-padded text.
    Text(String),
    /// Resource reference, optionally tagged with the expected category.
    ResRef {
        name: ResRef,
        category: Option<ResourceCategory>,
    },
    /// Opaque bytes (unknown data, padding, truncated input).
    Bytes(Vec<u8>),
    /// Base offset of the run of records of the given kind.
    SectionOffset { value: u32, section: RecordKind },
    /// Number of records of the given kind.
    SectionCount { value: u32, section: RecordKind },
}

impl FieldValue {
    /// The field type of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Unsigned(_) => FieldType::Unsigned,
            FieldValue::Signed(_) => FieldType::Signed,
            FieldValue::Enum { .. } => FieldType::Enum,
            FieldValue::Flags { .. } => FieldType::Flags,
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::ResRef { .. } => FieldType::ResRef,
            FieldValue::Bytes(_) => FieldType::Bytes,
            FieldValue::SectionOffset { .. } => FieldType::SectionOffset,
            FieldValue::SectionCount { .. } => FieldType::SectionCount,
        }
    }

    /// The value as an unsigned integer, if it is numeric.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FieldValue::Unsigned(v)
            | FieldValue::Enum { value: v, .. }
            | FieldValue::Flags { bits: v, .. }
            | FieldValue::SectionOffset { value: v, .. }
            | FieldValue::SectionCount { value: v, .. } => Some(*v),
            FieldValue::Signed(v) => Some(*v as u32),
            _ => None,
        }
    }

    /// The value as a signed integer, if it is numeric.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Signed(v) => Some(*v),
            other => other.as_u32().map(|v| v as i32),
        }
    }

    /// The resource reference, if this is one.
    pub fn as_resref(&self) -> Option<&ResRef> {
        match self {
            FieldValue::ResRef { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value can be stored in `size` bytes.
    pub fn fits(&self, size: usize) -> bool {
        match self {
            FieldValue::Unsigned(v)
            | FieldValue::Enum { value: v, .. }
            | FieldValue::Flags { bits: v, .. }
            | FieldValue::SectionOffset { value: v, .. }
            | FieldValue::SectionCount { value: v, .. } => match size {
                1 => *v <= u8::MAX as u32,
                2 => *v <= u16::MAX as u32,
                4 => true,
                _ => false,
            },
            FieldValue::Signed(v) => match size {
                1 => i8::try_from(*v).is_ok(),
                2 => i16::try_from(*v).is_ok(),
                4 => true,
                _ => false,
            },
            FieldValue::Text(s) => text::encoded_len(s) <= size,
            FieldValue::ResRef { .. } => size == 8,
            FieldValue::Bytes(b) => b.len() == size,
        }
    }

    /// Write exactly `size` bytes of this value.
    pub fn write_to<W: Write>(&self, size: usize, writer: &mut W) -> std::io::Result<()> {
        match self {
            FieldValue::Unsigned(v)
            | FieldValue::Enum { value: v, .. }
            | FieldValue::Flags { bits: v, .. }
            | FieldValue::SectionOffset { value: v, .. }
            | FieldValue::SectionCount { value: v, .. } => write_uint(writer, *v, size),
            FieldValue::Signed(v) => write_uint(writer, *v as u32, size),
            FieldValue::Text(s) => writer.write_all(&text::encode(s, size)),
            FieldValue::ResRef { name, .. } => {
                let mut bytes = name.as_bytes().to_vec();
                bytes.resize(size, 0);
                writer.write_all(&bytes)
            }
            FieldValue::Bytes(b) => {
                let mut bytes = b.clone();
                bytes.resize(size, 0);
                writer.write_all(&bytes)
            }
        }
    }

    /// Encode into a freshly allocated buffer of `size` bytes.
    pub fn to_bytes(&self, size: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(size);
        // Writing into a Vec cannot fail.
        let _ = self.write_to(size, &mut out);
        out
    }
}

fn write_uint<W: Write>(writer: &mut W, value: u32, size: usize) -> std::io::Result<()> {
    match size {
        1 => writer.write_u8(value as u8),
        2 => writer.write_u16::<LittleEndian>(value as u16),
        4 => writer.write_u32::<LittleEndian>(value),
        n => {
            let mut bytes = value.to_le_bytes().to_vec();
            bytes.resize(n, 0);
            writer.write_all(&bytes)
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(v) => write!(f, "{}", v),
            FieldValue::Signed(v) => write!(f, "{}", v),
            FieldValue::Enum { value, labels } => match labels.get(*value as i64) {
                Some(label) => write!(f, "{} ({})", label, value),
                None => write!(f, "Unknown ({})", value),
            },
            FieldValue::Flags { bits, labels } => {
                let set = labels.set_bits(*bits);
                if set.is_empty() {
                    write!(f, "None ({:#x})", bits)
                } else {
                    write!(f, "{} ({:#x})", set.join(", "), bits)
                }
            }
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::ResRef { name, category } => match category {
                Some(cat) if !name.is_empty() => write!(f, "{}.{}", name, cat),
                _ => write!(f, "{}", name),
            },
            FieldValue::Bytes(b) => {
                for (i, byte) in b.iter().take(16).enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{:02x}", byte)?;
                }
                if b.len() > 16 {
                    write!(f, " ... ({} bytes)", b.len())?;
                }
                Ok(())
            }
            FieldValue::SectionOffset { value, section } => write!(f, "{:#x} [{}]", value, section),
            FieldValue::SectionCount { value, section } => write!(f, "{} [{}]", value, section),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        assert!(FieldValue::Unsigned(255).fits(1));
        assert!(!FieldValue::Unsigned(256).fits(1));
        assert!(FieldValue::Signed(-128).fits(1));
        assert!(!FieldValue::Signed(-129).fits(1));
        assert!(FieldValue::Text("Sword".into()).fits(8));
        assert!(!FieldValue::Bytes(vec![0; 3]).fits(4));
    }

    #[test]
    fn test_write_widths() {
        assert_eq!(FieldValue::Unsigned(0x1234).to_bytes(2), vec![0x34, 0x12]);
        assert_eq!(FieldValue::Signed(-1).to_bytes(1), vec![0xFF]);
        assert_eq!(FieldValue::Text("AB".into()).to_bytes(4), b"AB\0\0".to_vec());
    }

    #[test]
    fn test_display_enum() {
        let labels = Labels::indexed(&["None", "Self"]);
        let value = FieldValue::Enum { value: 1, labels };
        assert_eq!(value.to_string(), "Self (1)");
    }
}
