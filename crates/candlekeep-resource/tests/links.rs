use candlekeep_common::{ResRef, ResourceCategory};
use candlekeep_effect::{Context, Game, LayoutResolver};
use candlekeep_resource::{check_links, references, EffResource, ItemResource, ItemVersion, MemoryProvider};
use pretty_assertions::assert_eq;

fn resref(name: &str) -> ResRef {
    name.parse().unwrap()
}

fn item_with_links() -> Vec<u8> {
    let mut data = vec![0u8; ItemVersion::V1.header_size()];
    data[..8].copy_from_slice(b"ITM V1  ");
    data[0x10..0x16].copy_from_slice(b"SW1H02");
    data[0x3a..0x40].copy_from_slice(b"ISW1H1");
    data[0x64..0x68].copy_from_slice(&0x72u32.to_le_bytes());
    data[0x6a..0x6e].copy_from_slice(&0x72u32.to_le_bytes());
    data
}

#[test]
fn test_references_in_offset_order() {
    let resolver = LayoutResolver::new(Context::new(Game::Bg2));
    let item = ItemResource::parse(&item_with_links(), &resolver).unwrap();
    let doc = item.document();

    let found: Vec<(String, String, ResourceCategory)> = references(doc, doc.root())
        .into_iter()
        .map(|r| (r.field, r.name.name(), r.category))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Used up item".to_string(), "SW1H02".to_string(), ResourceCategory::Itm),
            ("Icon".to_string(), "ISW1H1".to_string(), ResourceCategory::Bam),
        ]
    );
}

#[test]
fn test_missing_links() {
    let resolver = LayoutResolver::new(Context::new(Game::Bg2));
    let item = ItemResource::parse(&item_with_links(), &resolver).unwrap();
    let doc = item.document();

    let mut provider = MemoryProvider::new();
    provider.insert(&resref("isw1h1"), ResourceCategory::Bam, Vec::new());
    // Right name, wrong category.
    provider.insert(&resref("SW1H02"), ResourceCategory::Spl, Vec::new());

    let missing = check_links(doc, doc.root(), &provider);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, resref("SW1H02"));
    assert_eq!(missing[0].category, ResourceCategory::Itm);

    provider.insert(&resref("sw1h02"), ResourceCategory::Itm, Vec::new());
    assert!(check_links(doc, doc.root(), &provider).is_empty());
}

#[test]
fn test_effect_resource_link() {
    let mut data = b"EFF V2.0EFF V2.0".to_vec();
    let mut body = vec![0u8; 0x100];
    body[0] = 146; // cast spell
    body[0x20..0x27].copy_from_slice(b"SPWI304");
    data.extend(body);

    let resolver = LayoutResolver::new(Context::new(Game::Bg2));
    let eff = EffResource::parse(&data, &resolver).unwrap();
    let doc = eff.document();
    let missing = check_links(doc, doc.root(), &MemoryProvider::new());

    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, resref("SPWI304"));
    assert_eq!(missing[0].category, ResourceCategory::Spl);
}
