//! Mutable, offset-addressed field trees for Infinity Engine resources.
//!
//! A resource is parsed into a [`Document`]: an arena of typed leaf fields
//! and nested structures, each placed at an absolute byte offset. Documents
//! support structural edits that keep the binary layout consistent:
//!
//! - inserting and removing *addable* records (abilities, effects, ...) with
//!   automatic shifting of every later offset, end offset and section offset
//! - in-place replacement of a field by one of identical size
//! - lookup by offset or name with deepest-match priority
//! - serialization, either sequential or by flat placement
//!
//! # Example
//!
//! ```
//! use candlekeep_struct::{Document, Field, RecordKind};
//!
//! const EFFECT: RecordKind = RecordKind::new("Effect");
//!
//! let mut doc = Document::new("ITM", RecordKind::new("Item"), 0);
//! let root = doc.root();
//! doc.push_field(root, Field::section_offset("Effects offset", 0, 4, 0, EFFECT))?;
//! doc.push_field(root, Field::section_count("# effects", 4, 2, 0, EFFECT))?;
//!
//! let effect = Field::bytes("Effect", 0, vec![0; 0x30]).addable(EFFECT);
//! doc.insert_addable(root, effect)?;
//!
//! let root = doc.get(root).unwrap();
//! assert_eq!(root.get_u32("Effects offset"), Some(6));
//! assert_eq!(root.get_u32("# effects"), Some(1));
//! # Ok::<(), candlekeep_struct::Error>(())
//! ```

mod document;
mod error;
mod event;
mod field;
mod kind;
mod labels;
mod mutate;
mod node;
mod reader;
mod value;
mod view;

pub use document::{Document, SectionShift};
pub use error::{Error, Result};
pub use event::StructureEvent;
pub use field::Field;
pub use kind::{Capability, RecordKind};
pub use labels::Labels;
pub use mutate::Addition;
pub use node::NodeId;
pub use reader::StructReader;
pub use value::{FieldType, FieldValue};
pub use view::NodeRef;
