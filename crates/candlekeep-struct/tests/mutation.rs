use candlekeep_struct::{
    Capability, Document, Error, Field, FieldValue, NodeId, RecordKind, SectionShift,
    StructureEvent,
};
use pretty_assertions::assert_eq;

const ITEM: RecordKind = RecordKind::new("Item");
const ABILITY: RecordKind = RecordKind::new("Ability");
const EFFECT: RecordKind = RecordKind::new("Effect");
const FEATURE: RecordKind = RecordKind::new("Feature");
const TAIL: RecordKind = RecordKind::new("Tail");

fn value_of(doc: &Document, parent: NodeId, name: &str) -> u32 {
    doc.get(parent)
        .and_then(|p| p.get_u32(name))
        .unwrap_or_else(|| panic!("missing field {name}"))
}

fn offset_of(doc: &Document, id: NodeId) -> usize {
    doc.get(id).unwrap().offset()
}

/// Header with two sections, one ability at 0x10 and one effect at 0x18.
fn item_with_runs() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new("Item", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::section_offset("Abilities offset", 0x00, 4, 0x10, ABILITY))
        .unwrap();
    doc.push_field(root, Field::section_count("# abilities", 0x04, 2, 1, ABILITY))
        .unwrap();
    doc.push_field(root, Field::section_offset("Effects offset", 0x06, 4, 0x18, EFFECT))
        .unwrap();
    doc.push_field(root, Field::section_count("# effects", 0x0a, 2, 1, EFFECT))
        .unwrap();
    doc.push_field(root, Field::bytes("Reserved", 0x0c, vec![0; 4])).unwrap();
    let ability = doc
        .push_field(root, Field::bytes("Ability", 0x10, vec![0xAB; 8]).addable(ABILITY))
        .unwrap();
    let effect = doc
        .push_field(root, Field::bytes("Effect", 0x18, vec![0xEF; 8]).addable(EFFECT))
        .unwrap();
    (doc, ability, effect)
}

#[test]
fn test_insert_continues_existing_run() {
    let (mut doc, ability, effect) = item_with_runs();
    let root = doc.root();

    let added = doc
        .insert_addable(root, Field::bytes("Ability", 0, vec![0xCD; 8]).addable(ABILITY))
        .unwrap();

    assert_eq!(offset_of(&doc, ability), 0x10);
    assert_eq!(offset_of(&doc, added), 0x18);
    assert_eq!(offset_of(&doc, effect), 0x20);
    assert_eq!(value_of(&doc, root, "Abilities offset"), 0x10);
    assert_eq!(value_of(&doc, root, "Effects offset"), 0x20);
    assert_eq!(value_of(&doc, root, "# abilities"), 2);
    assert_eq!(value_of(&doc, root, "# effects"), 1);
    assert_eq!(doc.get(root).unwrap().end_offset(), Some(0x28));
    assert_eq!(doc.get(root).unwrap().index_of("Effect"), Some(7));
    assert!(doc.is_dirty(root));

    let events = doc.drain_events();
    assert_eq!(
        events,
        vec![StructureEvent::Inserted {
            parent: root,
            node: added,
            index: 6,
            offset: 0x18,
            size: 8,
        }]
    );
}

#[test]
fn test_serialized_bytes_follow_insert() {
    let (mut doc, _, _) = item_with_runs();
    let root = doc.root();
    doc.insert_addable(root, Field::bytes("Effect", 0, vec![0x11; 8]).addable(EFFECT))
        .unwrap();

    let bytes = doc.serialize(root).unwrap();
    assert_eq!(bytes.len(), 0x28);
    assert_eq!(&bytes[0x18..0x20], &[0xEF; 8]);
    assert_eq!(&bytes[0x20..0x28], &[0x11; 8]);
    assert_eq!(u16::from_le_bytes([bytes[0x0a], bytes[0x0b]]), 2);
    assert_eq!(bytes, doc.serialize_flat(root).unwrap());
}

#[test]
fn test_insert_claims_unset_section_offset() {
    let mut doc = Document::new("Item", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::section_offset("Effects offset", 0, 4, 0, EFFECT))
        .unwrap();
    doc.push_field(root, Field::section_count("# effects", 4, 4, 0, EFFECT))
        .unwrap();
    let before = doc.serialize_flat(root).unwrap();

    let effect = doc
        .insert_addable(root, Field::bytes("Effect", 0, vec![1; 0x30]).addable(EFFECT))
        .unwrap();
    assert_eq!(offset_of(&doc, effect), 8);
    assert_eq!(value_of(&doc, root, "Effects offset"), 8);
    assert_eq!(value_of(&doc, root, "# effects"), 1);

    doc.remove_addable(effect, false).unwrap();
    assert_eq!(value_of(&doc, root, "Effects offset"), 0);
    assert_eq!(value_of(&doc, root, "# effects"), 0);
    assert_eq!(doc.serialize_flat(root).unwrap(), before);
    assert!(!doc.contains(effect));
}

#[test]
fn test_insert_skips_trailing_aliased_fields() {
    let mut doc = Document::new("Item", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::unsigned("Flags", 0, 4, 0)).unwrap();
    let alias = doc
        .push_field(root, Field::unsigned("Flags (low)", 0, 2, 0).aliased())
        .unwrap();

    let added = doc
        .insert_addable(root, Field::bytes("Effect", 0, vec![0; 4]).addable(EFFECT))
        .unwrap();
    assert_eq!(offset_of(&doc, added), 4);
    assert_eq!(offset_of(&doc, alias), 0);
}

/// Nested container holding a run of features, followed by a root-level
/// tail whose offset is recorded in the root header.
fn nested_document() -> (Document, NodeId) {
    let mut doc = Document::new("Root", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::section_offset("Tail offset", 0x00, 4, 0x1c, TAIL))
        .unwrap();
    doc.push_field(root, Field::bytes("Header", 0x04, vec![0x44; 12])).unwrap();

    let nested = doc
        .push_struct(root, "Block", RecordKind::new("Block"), 0x10, Capability::Fixed)
        .unwrap();
    doc.push_field(nested, Field::section_offset("Features offset", 0x10, 4, 0x18, FEATURE))
        .unwrap();
    doc.push_field(nested, Field::section_count("# features", 0x14, 2, 1, FEATURE))
        .unwrap();
    doc.push_field(nested, Field::bytes("Padding", 0x16, vec![0; 2])).unwrap();
    doc.push_field(nested, Field::bytes("Feature", 0x18, vec![0xFE; 4]).addable(FEATURE))
        .unwrap();
    doc.push_field(root, Field::bytes("Tail", 0x1c, vec![0x7A; 4])).unwrap();
    (doc, nested)
}

#[test]
fn test_insert_remove_inverse_at_depth() {
    let (mut doc, nested) = nested_document();
    let root = doc.root();
    let before = doc.serialize_flat(root).unwrap();
    let before_offsets: Vec<usize> = doc
        .flatten(root)
        .into_iter()
        .map(|id| offset_of(&doc, id))
        .collect();

    let added = doc
        .insert_addable(nested, Field::bytes("Feature", 0, vec![0x33; 4]).addable(FEATURE))
        .unwrap();
    assert_eq!(offset_of(&doc, added), 0x1c);
    assert_eq!(value_of(&doc, root, "Tail offset"), 0x20);
    assert_eq!(value_of(&doc, nested, "# features"), 2);
    assert_eq!(value_of(&doc, nested, "Features offset"), 0x18);
    assert_eq!(doc.get(nested).unwrap().end_offset(), Some(0x20));
    assert_eq!(doc.get(root).unwrap().end_offset(), Some(0x24));
    let tail = doc.find_by_name(root, "Tail", false).unwrap();
    assert_eq!(offset_of(&doc, tail), 0x20);

    doc.remove_addable(added, false).unwrap();
    assert_eq!(doc.serialize_flat(root).unwrap(), before);
    let after_offsets: Vec<usize> = doc
        .flatten(root)
        .into_iter()
        .map(|id| offset_of(&doc, id))
        .collect();
    assert_eq!(after_offsets, before_offsets);
    assert_eq!(doc.get(nested).unwrap().end_offset(), Some(0x1c));
    assert_eq!(doc.get(root).unwrap().end_offset(), Some(0x20));
}

#[test]
fn test_insert_structure_rebases_children() {
    let (mut doc, nested) = nested_document();
    let root = doc.root();

    let mut feature = Document::record("Feature", FEATURE);
    let feature_root = feature.root();
    feature.push_field(feature_root, Field::unsigned("Id", 0, 2, 7)).unwrap();
    feature.push_field(feature_root, Field::unsigned("Level", 2, 2, 3)).unwrap();

    let added = doc.insert_addable(nested, feature).unwrap();
    let added_ref = doc.get(added).unwrap();
    assert_eq!(added_ref.offset(), 0x1c);
    assert_eq!(added_ref.end_offset(), Some(0x20));
    assert_eq!(added_ref.field("Level").unwrap().offset(), 0x1e);
    assert_eq!(added_ref.parent().unwrap().id(), nested);
    assert_eq!(value_of(&doc, root, "Tail offset"), 0x20);
}

#[test]
fn test_section_at_insertion_point_own_kind() {
    fn build(shift: SectionShift) -> Document {
        let mut doc = Document::new("Item", ITEM, 0).with_section_shift(shift);
        let root = doc.root();
        doc.push_field(root, Field::section_offset("Effects offset", 0, 4, 8, EFFECT))
            .unwrap();
        doc.push_field(root, Field::section_count("# effects", 4, 4, 0, EFFECT))
            .unwrap();
        doc
    }
    let effect = || Field::bytes("Effect", 0, vec![0; 0x10]).addable(EFFECT);

    let mut doc = build(SectionShift::ExemptOwnSection);
    let root = doc.root();
    let added = doc.insert_addable(root, effect()).unwrap();
    assert_eq!(offset_of(&doc, added), 8);
    assert_eq!(value_of(&doc, root, "Effects offset"), 8);

    // Icewind Dale II shifts the governing offset past the new record.
    let mut doc = build(SectionShift::AlwaysShift);
    let root = doc.root();
    let added = doc.insert_addable(root, effect()).unwrap();
    assert_eq!(offset_of(&doc, added), 8);
    assert_eq!(value_of(&doc, root, "Effects offset"), 0x18);
}

#[test]
fn test_insert_at_front() {
    let (mut doc, ability, _) = item_with_runs();
    let root = doc.root();
    let abilities = doc.get(root).unwrap().index_of("Ability").unwrap();

    let added = doc
        .insert_addable_at(root, abilities, Field::bytes("Ability", 0, vec![0; 8]).addable(ABILITY))
        .unwrap();
    assert_eq!(offset_of(&doc, added), 0x10);
    assert_eq!(offset_of(&doc, ability), 0x18);
    assert_eq!(value_of(&doc, root, "Effects offset"), 0x20);
}

#[test]
fn test_insert_at_conflicting_position_fails() {
    let mut doc = Document::new("Item", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::section_offset("Effects offset", 0, 4, 0x0c, EFFECT))
        .unwrap();
    doc.push_field(root, Field::unsigned("A", 4, 4, 0)).unwrap();
    doc.push_field(root, Field::unsigned("B", 8, 4, 0)).unwrap();

    let err = doc
        .insert_addable_at(root, 1, Field::bytes("Effect", 0, vec![0; 4]).addable(EFFECT))
        .unwrap_err();
    assert!(matches!(err, Error::SchemaInconsistency { section, .. } if section == EFFECT));

    let err = doc
        .insert_addable_at(root, 9, Field::bytes("Effect", 0, vec![0; 4]).addable(EFFECT))
        .unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 9, len: 3 }));
    assert!(err.is_addressing());
    assert!(doc.pending_events().is_empty());
}

#[test]
fn test_count_overflow_leaves_document_unchanged() {
    let mut doc = Document::new("Item", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::section_offset("Effects offset", 0, 4, 0, EFFECT))
        .unwrap();
    doc.push_field(root, Field::section_count("# effects", 4, 1, 255, EFFECT))
        .unwrap();
    let before = doc.serialize_flat(root).unwrap();

    let err = doc
        .insert_addable(root, Field::bytes("Effect", 0, vec![0; 4]).addable(EFFECT))
        .unwrap_err();
    assert!(matches!(err, Error::SchemaInconsistency { .. }));
    assert_eq!(doc.serialize_flat(root).unwrap(), before);
    assert_eq!(doc.get(root).unwrap().child_count(), 2);
}

#[test]
fn test_fixed_fields_are_not_addable() {
    let (mut doc, _, _) = item_with_runs();
    let root = doc.root();

    let err = doc
        .insert_addable(root, Field::unsigned("Fixed", 0, 4, 0))
        .unwrap_err();
    assert!(matches!(err, Error::NotAddable { .. }));

    let reserved = doc.find_by_name(root, "Reserved", false).unwrap();
    assert!(matches!(doc.remove_addable(reserved, false), Err(Error::NotAddable { .. })));
    assert!(matches!(doc.remove_addable(root, false), Err(Error::RootDetach)));
}

#[test]
fn test_remove_with_zero_count_fails_before_commit() {
    let (mut doc, ability, _) = item_with_runs();
    let root = doc.root();
    let count = doc.find_by_name(root, "# abilities", false).unwrap();
    doc.set_value(count, FieldValue::SectionCount { value: 0, section: ABILITY })
        .unwrap();
    let before = doc.serialize_flat(root).unwrap();

    let err = doc.remove_addable(ability, false).unwrap_err();
    assert!(matches!(err, Error::SchemaInconsistency { section, .. } if section == ABILITY));
    assert!(doc.contains(ability));
    assert_eq!(doc.serialize_flat(root).unwrap(), before);
}

#[test]
fn test_recursive_remove() {
    let mut doc = Document::new("Item", ITEM, 0);
    let root = doc.root();
    doc.push_field(root, Field::section_offset("Abilities offset", 0, 4, 8, ABILITY))
        .unwrap();
    doc.push_field(root, Field::section_count("# abilities", 4, 2, 1, ABILITY))
        .unwrap();
    doc.push_field(root, Field::bytes("Padding", 6, vec![0; 2])).unwrap();

    let ability = doc
        .push_struct(root, "Ability", ABILITY, 8, Capability::Addable(ABILITY))
        .unwrap();
    doc.push_field(ability, Field::section_count("# features", 8, 2, 2, FEATURE))
        .unwrap();
    doc.push_field(ability, Field::bytes("Padding", 0x0a, vec![0; 2])).unwrap();
    doc.push_field(ability, Field::bytes("Feature", 0x0c, vec![1; 4]).addable(FEATURE))
        .unwrap();
    doc.push_field(ability, Field::bytes("Feature", 0x10, vec![2; 4]).addable(FEATURE))
        .unwrap();
    let trailer = doc.push_field(root, Field::bytes("Trailer", 0x14, vec![9; 4])).unwrap();

    doc.remove_addable(ability, true).unwrap();

    assert!(!doc.contains(ability));
    assert_eq!(offset_of(&doc, trailer), 8);
    assert_eq!(value_of(&doc, root, "# abilities"), 0);
    assert_eq!(value_of(&doc, root, "Abilities offset"), 8);
    assert_eq!(doc.get(root).unwrap().end_offset(), Some(0x0c));
    let removed = doc
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, StructureEvent::Removed { .. }))
        .count();
    assert_eq!(removed, 3);
}

#[test]
fn test_replace_field_keeps_handle() {
    let (mut doc, ability, _) = item_with_runs();
    let root = doc.root();
    let index = doc.get(root).unwrap().index_of("Reserved").unwrap();

    let id = doc
        .replace_field(root, index, Field::unsigned("Flags", 0x0c, 4, 0xFF))
        .unwrap();
    assert_eq!(doc.get(id).unwrap().name(), "Flags");
    assert_eq!(doc.get(id).unwrap().value(), Some(&FieldValue::Unsigned(0xFF)));
    assert!(doc.contains(ability));

    let err = doc
        .replace_field(root, index, Field::unsigned("Flags", 0x0c, 2, 0))
        .unwrap_err();
    assert!(matches!(err, Error::SizeMismatch { expected: 4, actual: 2, .. }));
    let err = doc
        .replace_field(root, index, Field::unsigned("Flags", 0x0d, 4, 0))
        .unwrap_err();
    assert!(matches!(err, Error::OffsetMismatch { .. }));
    let err = doc
        .replace_field(root, 42, Field::unsigned("Flags", 0x0c, 4, 0))
        .unwrap_err();
    assert!(err.is_addressing());
}

#[test]
fn test_set_value_checks_width() {
    let (mut doc, _, _) = item_with_runs();
    let root = doc.root();
    let count = doc.find_by_name(root, "# effects", false).unwrap();

    let err = doc
        .set_value(count, FieldValue::SectionCount { value: 70_000, section: EFFECT })
        .unwrap_err();
    assert!(matches!(err, Error::ValueOutOfRange { size: 2, .. }));

    doc.acknowledge_save();
    assert!(!doc.is_dirty(root));
    doc.set_value(count, FieldValue::SectionCount { value: 3, section: EFFECT })
        .unwrap();
    assert!(doc.is_dirty(root));
    assert_eq!(doc.drain_events(), vec![StructureEvent::ValueChanged { node: count }]);
}

#[test]
fn test_closed_document_rejects_mutation() {
    let (mut doc, ability, _) = item_with_runs();
    let root = doc.root();
    doc.close();
    assert!(doc.is_closed());
    assert!(matches!(doc.remove_addable(ability, false), Err(Error::Closed)));
    assert!(matches!(
        doc.insert_addable(root, Field::bytes("Effect", 0, vec![0; 8]).addable(EFFECT)),
        Err(Error::Closed)
    ));
}
