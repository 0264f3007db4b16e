use candlekeep_common::ResourceCategory;
use candlekeep_struct::{
    Capability, Document, Field, FieldType, FieldValue, Labels, NodeId, RecordKind, Result,
    StructReader,
};
use pretty_assertions::assert_eq;

const RECORD: RecordKind = RecordKind::new("Record");
const BLOCK: RecordKind = RecordKind::new("Block");
const ENTRY: RecordKind = RecordKind::new("Entry");

fn leaves(doc: &Document, id: NodeId) -> Vec<(String, usize, usize)> {
    doc.flatten(id)
        .into_iter()
        .map(|n| {
            let node = doc.get(n).unwrap();
            (node.name().to_string(), node.offset(), node.size())
        })
        .collect()
}

#[test]
fn test_fill_holes_pads_gaps_and_tail() {
    let mut doc = Document::new("Record", RECORD, 0);
    let root = doc.root();
    doc.push_field(root, Field::unsigned("A", 0, 4, 1)).unwrap();
    doc.push_field(root, Field::unsigned("B", 8, 4, 2)).unwrap();

    let source: Vec<u8> = (0u8..16).collect();
    assert_eq!(doc.fill_holes(root, &source).unwrap(), 2);
    assert_eq!(
        leaves(&doc, root),
        vec![
            ("A".to_string(), 0, 4),
            ("Unknown".to_string(), 4, 4),
            ("B".to_string(), 8, 4),
            ("Unknown".to_string(), 12, 4),
        ]
    );

    let pad = doc.get(root).unwrap().child(1).unwrap();
    assert_eq!(pad.value(), Some(&FieldValue::Bytes(vec![4, 5, 6, 7])));
}

#[test]
fn test_fill_holes_is_idempotent() {
    let mut doc = Document::new("Record", RECORD, 0);
    let root = doc.root();
    doc.push_field(root, Field::unsigned("A", 2, 2, 1)).unwrap();
    let block = doc
        .push_struct(root, "Block", BLOCK, 6, Capability::Fixed)
        .unwrap();
    doc.push_field(block, Field::unsigned("X", 8, 2, 0)).unwrap();
    doc.set_end_offset(block, 12).unwrap();

    let source = [0u8; 14];
    let first = doc.fill_holes(root, &source).unwrap();
    assert_eq!(first, 5);
    let snapshot = leaves(&doc, root);
    assert_eq!(doc.fill_holes(root, &source).unwrap(), 0);
    assert_eq!(leaves(&doc, root), snapshot);
    assert!(doc.overlapping_leaves(root).is_empty());
    assert_eq!(doc.serialize(root).unwrap().len(), 14);
}

#[test]
fn test_deepest_match_wins() {
    let mut doc = Document::new("Record", RECORD, 0);
    let root = doc.root();
    let shallow = doc.push_field(root, Field::unsigned("Value", 0, 4, 1)).unwrap();
    let outer = doc.push_struct(root, "Outer", BLOCK, 4, Capability::Fixed).unwrap();
    let middle = doc.push_field(outer, Field::unsigned("Value", 4, 4, 2)).unwrap();
    let inner = doc.push_struct(outer, "Inner", BLOCK, 8, Capability::Fixed).unwrap();
    let deep = doc.push_field(inner, Field::unsigned("Value", 8, 4, 3)).unwrap();

    assert_eq!(doc.find_by_name(root, "Value", true), Some(deep));
    assert_eq!(doc.find_by_name(root, "Value", false), Some(shallow));
    assert_eq!(doc.find_by_name(outer, "Value", false), Some(middle));
    assert_eq!(doc.find_by_name(root, "Missing", true), None);

    // Inner starts at 8 too; its leaf is deeper.
    assert_eq!(doc.find_at_offset(root, 8, None, true), Some(deep));
    assert_eq!(doc.find_at_offset(root, 8, Some(FieldType::Struct), true), Some(inner));
    assert_eq!(doc.find_at_offset(root, 8, None, false), None);
    assert_eq!(doc.find_at_offset(root, 4, Some(FieldType::Unsigned), true), Some(middle));
    assert_eq!(doc.depth(deep), 3);
}

fn parse_record(doc: &mut Document, data: &[u8]) -> Result<usize> {
    let root = doc.root();
    let mut reader = StructReader::new(doc, root, data, 0);
    reader.text("Signature", 4)?;
    let offset = reader.section_offset("Entries offset", 4, ENTRY)?;
    let count = reader.section_count("# entries", 2, ENTRY)?;
    reader.flags("Flags", 2, Labels::indexed(&["Magical", "Cursed"]))?;
    reader.resref("Icon", Some(ResourceCategory::Bam))?;
    reader.signed("Modifier", 2)?;
    reader.enumeration("Type", 2, Labels::indexed(&["None", "Weapon", "Armor"]))?;

    reader.seek(offset as usize);
    for _ in 0..count {
        reader.nested("Entry", ENTRY, Capability::Addable(ENTRY), |r| {
            r.unsigned("Id", 2)?;
            r.bytes("Payload", 2)?;
            Ok(())
        })?;
    }
    reader.finish()
}

fn sample() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"REC ");
    data.extend_from_slice(&24u32.to_le_bytes());
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(b"ICON\0\0\0\0");
    data.extend_from_slice(&(-3i16).to_le_bytes());
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&[1, 0, 0xAA, 0xBB, 2, 0, 0xCC, 0xDD]);
    data
}

#[test]
fn test_parse_serialize_roundtrip() {
    let data = sample();
    let mut doc = Document::new("Record", RECORD, 0);
    let end = parse_record(&mut doc, &data).unwrap();
    assert_eq!(end, data.len());

    let root = doc.root();
    let view = doc.get(root).unwrap();
    assert_eq!(view.field("Icon").unwrap().value().unwrap().to_string(), "ICON.BAM");
    assert_eq!(view.field("Type").unwrap().value().unwrap().to_string(), "Armor (2)");
    assert_eq!(view.field("Modifier").unwrap().value(), Some(&FieldValue::Signed(-3)));

    assert_eq!(doc.serialize(root).unwrap(), data);
    assert_eq!(doc.serialize_flat(root).unwrap(), data);
}

#[test]
fn test_parsed_entries_are_addable() {
    let data = sample();
    let mut doc = Document::new("Record", RECORD, 0);
    parse_record(&mut doc, &data).unwrap();
    let root = doc.root();

    let mut entry = Document::record("Entry", ENTRY);
    let entry_root = entry.root();
    entry.push_field(entry_root, Field::unsigned("Id", 0, 2, 3)).unwrap();
    entry.push_field(entry_root, Field::bytes("Payload", 2, vec![0xEE, 0xFF])).unwrap();
    doc.insert_addable(root, entry).unwrap();

    let bytes = doc.serialize(root).unwrap();
    assert_eq!(bytes.len(), data.len() + 4);
    assert_eq!(&bytes[data.len()..], &[3, 0, 0xEE, 0xFF]);
    assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), 3);
    assert_eq!(bytes, doc.serialize_flat(root).unwrap());
}

#[test]
fn test_truncated_input_is_recovered() {
    let data = sample();
    let mut doc = Document::new("Record", RECORD, 0);
    parse_record(&mut doc, &data[..14]).unwrap();
    let root = doc.root();

    let last = doc.get(root).unwrap().children().last().unwrap();
    assert_eq!(last.name(), "Unknown");
    assert_eq!(last.offset(), 12);
    assert_eq!(doc.serialize(root).unwrap(), &data[..14]);
}

#[test]
fn test_clone_subtree_is_detached() {
    let data = sample();
    let mut doc = Document::new("Record", RECORD, 0);
    parse_record(&mut doc, &data).unwrap();
    let root = doc.root();
    let entry = doc.find_by_name(root, "Entry", false).unwrap();

    let copy = doc.clone_subtree(entry).unwrap();
    let copy_root = copy.get(copy.root()).unwrap();
    assert_eq!(copy_root.offset(), 24);
    assert!(!copy_root.is_attached());
    assert_eq!(copy.serialize_flat(copy.root()).unwrap(), vec![1, 0, 0xAA, 0xBB]);
    assert!(doc.contains(entry));
}

#[test]
fn test_aliased_fields_are_not_written_twice() {
    let mut doc = Document::new("Record", RECORD, 0);
    let root = doc.root();
    doc.push_field(root, Field::unsigned("Flags", 0, 4, 0x0102_0304)).unwrap();
    doc.push_field(root, Field::unsigned("Low word", 0, 2, 0x0304).aliased())
        .unwrap();

    assert!(doc.overlapping_leaves(root).is_empty());
    assert_eq!(doc.serialize(root).unwrap(), vec![4, 3, 2, 1]);
    assert_eq!(doc.serialize_flat(root).unwrap(), vec![4, 3, 2, 1]);
}
