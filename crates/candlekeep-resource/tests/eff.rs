use candlekeep_effect::{Context, EffectVersion, Feature, Game, LayoutResolver, Role};
use candlekeep_resource::{EffResource, Error, EFF_SIZE};
use candlekeep_struct::Field;
use pretty_assertions::assert_eq;

fn eff_bytes(opcode: u32, param1: u32, param2: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(EFF_SIZE);
    data.extend_from_slice(b"EFF V2.0EFF V2.0");
    let mut body = vec![0u8; EffectVersion::V2.size()];
    body[0x00..0x04].copy_from_slice(&opcode.to_le_bytes());
    body[0x04..0x08].copy_from_slice(&2u32.to_le_bytes());
    body[0x0c..0x10].copy_from_slice(&param1.to_le_bytes());
    body[0x10..0x14].copy_from_slice(&param2.to_le_bytes());
    body[0x20..0x27].copy_from_slice(b"SPWI304");
    body[0x98..0x9d].copy_from_slice(b"Local");
    data.extend(body);
    data
}

#[test]
fn test_parse_and_round_trip() {
    let data = eff_bytes(12, 10, 0x0004_0000);
    let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
    let mut eff = EffResource::parse(&data, &resolver).unwrap();

    assert_eq!(eff.opcode(), Some(12));
    let body = eff.document().get(eff.body().unwrap()).unwrap();
    assert_eq!(body.offset(), 16);
    assert_eq!(body.size(), 0x100);
    assert_eq!(eff.to_bytes().unwrap(), data);
}

#[test]
fn test_round_trip_keeps_trailing_bytes() {
    let mut data = eff_bytes(0, 0, 0);
    data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 1, 2, 3, 4]);
    let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
    let mut eff = EffResource::parse(&data, &resolver).unwrap();

    assert_eq!(eff.opcode(), Some(0));
    assert_eq!(eff.to_bytes().unwrap(), data);
}

#[test]
fn test_addressing_uses_absolute_offsets() {
    let data = eff_bytes(1, 3, 2);
    let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
    let eff = EffResource::parse(&data, &resolver).unwrap();

    let addressing = eff.addressing(&resolver).unwrap().unwrap();
    assert_eq!(addressing.version(), EffectVersion::V2);
    assert_eq!(addressing.offset(Role::Param1), Some(16 + 0x0c));
    assert_eq!(addressing.offset(Role::Resistance), Some(16 + 0x4c));
    assert_eq!(addressing.offset(Role::VariableName), Some(16 + 0x98));
}

#[test]
fn test_replace_param_through_addressing() {
    let data = eff_bytes(1, 3, 2);
    let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
    let mut eff = EffResource::parse(&data, &resolver).unwrap();

    let addressing = eff.addressing(&resolver).unwrap().unwrap();
    addressing
        .replace(eff.document_mut(), Role::Param1, Field::unsigned("Value", 0, 4, 7))
        .unwrap();

    let bytes = eff.to_bytes().unwrap();
    assert_eq!(&bytes[16 + 0x0c..16 + 0x10], &7u32.to_le_bytes());
    assert_eq!(bytes.len(), data.len());
}

#[test]
fn test_engine_extension_changes_layout() {
    let data = eff_bytes(318, 0, 0);
    let plain = LayoutResolver::new(Context::new(Game::Tob));
    let tobex = LayoutResolver::new(Context::new(Game::Tob).with_feature(Feature::TobEx));

    let plain = EffResource::parse(&data, &plain).unwrap();
    let extended = EffResource::parse(&data, &tobex).unwrap();
    let name = |eff: &EffResource| {
        let body = eff.document().get(eff.body().unwrap()).unwrap();
        body.child(3).unwrap().name().to_string()
    };
    assert_eq!(name(&plain), "Unused");
    assert_eq!(name(&extended), "Value");
}

#[test]
fn test_truncated_body_is_kept() {
    let mut data = eff_bytes(0, 0, 0);
    data.truncate(16 + 0x40);
    let resolver = LayoutResolver::new(Context::new(Game::Bg2));
    let mut eff = EffResource::parse(&data, &resolver).unwrap();

    assert_eq!(eff.body(), None);
    assert_eq!(eff.opcode(), None);
    assert!(eff.addressing(&resolver).unwrap().is_none());
    assert_eq!(eff.to_bytes().unwrap(), data);
}

#[test]
fn test_rejects_item_files() {
    let mut data = eff_bytes(0, 0, 0);
    data[..8].copy_from_slice(b"ITM V1  ");
    let resolver = LayoutResolver::new(Context::new(Game::Bg2));
    assert!(matches!(
        EffResource::parse(&data, &resolver),
        Err(Error::InvalidSignature { .. })
    ));
}
