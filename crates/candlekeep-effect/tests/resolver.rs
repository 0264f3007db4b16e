use candlekeep_effect::{
    Context, EffectAddressing, EffectVersion, Error, Feature, Game, LayoutResolver, Role, EFFECT,
};
use candlekeep_struct::{Capability, Document, Field, FieldValue, RecordKind, StructReader};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const LIST: RecordKind = RecordKind::new("Effect list");

fn v1(opcode: u16, param1: u32, param2: u32) -> Vec<u8> {
    let mut data = vec![0u8; 0x30];
    data[0..2].copy_from_slice(&opcode.to_le_bytes());
    data[4..8].copy_from_slice(&param1.to_le_bytes());
    data[8..12].copy_from_slice(&param2.to_le_bytes());
    data
}

fn v2(opcode: u32, param1: u32, param2: u32) -> Vec<u8> {
    let mut data = vec![0u8; 0x100];
    data[0..4].copy_from_slice(&opcode.to_le_bytes());
    data[0x0c..0x10].copy_from_slice(&param1.to_le_bytes());
    data[0x10..0x14].copy_from_slice(&param2.to_le_bytes());
    data
}

fn resolver(game: Game) -> LayoutResolver {
    LayoutResolver::new(Context::new(game))
}

fn names(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(Field::name).collect()
}

#[test]
fn test_attack_rate_is_numeric_for_enhanced_percentage_mode() {
    let layout = resolver(Game::Bg2ee)
        .resolve(&v1(1, 150, 2), 0, EffectVersion::V1)
        .unwrap();

    let param1 = layout.field(Role::Param1).unwrap();
    assert_eq!(param1.name(), "Value");
    assert_eq!(param1.value(), &FieldValue::Unsigned(150));
    assert_eq!(layout.field(Role::Param2).unwrap().name(), "Modifier type");
}

#[test]
fn test_attack_rate_is_enumerated_otherwise() {
    for (game, param2) in [(Game::Bg2ee, 0), (Game::Bg2ee, 1), (Game::Bg2, 2), (Game::Bg1, 0)] {
        let layout = resolver(game)
            .resolve(&v1(1, 2, param2), 0, EffectVersion::V1)
            .unwrap();
        match layout.field(Role::Param1).unwrap().value() {
            FieldValue::Enum { value, labels } => {
                assert_eq!(*value, 2);
                assert_eq!(labels.get(2), Some("2 attacks per round"));
            }
            other => panic!("{game:?}/{param2}: expected an enumeration, got {other:?}"),
        }
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let data = v1(12, 10, 0x0008_0000);
    let resolver = resolver(Game::Tob);
    let first = resolver.resolve(&data, 0, EffectVersion::V1).unwrap();
    let second = resolver.resolve(&data, 0, EffectVersion::V1).unwrap();
    assert_eq!(first.fields(), second.fields());
    assert_eq!(first.roles(), second.roles());
}

#[test]
fn test_unknown_opcode_falls_back_to_generic_parameters() {
    let layout = resolver(Game::Bg1)
        .resolve(&v1(999, 7, 8), 0, EffectVersion::V1)
        .unwrap();

    assert!(layout.is_failsafe());
    assert_eq!(layout.field(Role::Param1).unwrap().name(), "Parameter 1");
    assert_eq!(layout.field(Role::Param2).unwrap().name(), "Parameter 2");
    assert_eq!(layout.field(Role::Param2).unwrap().value(), &FieldValue::Unsigned(8));
    assert_eq!(layout.size(), 0x30);
}

#[test]
fn test_damage_splits_mode_and_type() {
    let resolver = resolver(Game::Bg2);

    let single = resolver
        .resolve(&v1(12, 10, 0x0008_0001), 0, EffectVersion::V1)
        .unwrap();
    assert_eq!(
        names(&single.fields()[3..6]),
        vec!["Amount", "Mode", "Damage type"]
    );
    assert_eq!(single.field(Role::Param2).unwrap().name(), "Mode");
    assert_eq!(single.fields()[5].offset(), 0x0a);
    assert!(matches!(
        single.fields()[5].value(),
        FieldValue::Enum { value: 8, .. }
    ));

    let combined = resolver
        .resolve(&v1(12, 10, 0x0009_0000), 0, EffectVersion::V1)
        .unwrap();
    match combined.fields()[5].value() {
        FieldValue::Flags { bits, labels } => {
            assert_eq!(*bits, 9);
            assert_eq!(labels.set_bits(*bits), vec!["Acid", "Fire"]);
        }
        other => panic!("expected flags, got {other:?}"),
    }
}

#[test]
fn test_item_usability_picks_ids_table_from_parameter_2() {
    let resolver = resolver(Game::Bg2ee);

    let class = resolver
        .resolve(&v1(319, 1, 5), 0, EffectVersion::V1)
        .unwrap();
    match class.field(Role::Param1).unwrap().value() {
        FieldValue::Enum { labels, .. } => assert_eq!(labels.get(1), Some("Mage")),
        other => panic!("expected an enumeration, got {other:?}"),
    }

    let script = resolver
        .resolve(&v1(319, 0, 11), 0, EffectVersion::V1)
        .unwrap();
    let resource = script.field(Role::Resource).unwrap();
    assert_eq!(resource.name(), "Script name");
    assert!(matches!(resource.value(), FieldValue::Text(_)));

    let classic = self::resolver(Game::Bg2)
        .resolve(&v1(319, 1, 5), 0, EffectVersion::V1)
        .unwrap();
    assert!(classic.is_failsafe());
}

#[test]
fn test_engine_tables_follow_the_context() {
    let set_status = resolver(Game::Pst)
        .resolve(&v1(186, 0, 1), 0, EffectVersion::V1)
        .unwrap();
    assert_eq!(set_status.field(Role::Param2).unwrap().name(), "Status");

    let move_creature = resolver(Game::Bg2)
        .resolve(&v1(186, 0, 1), 0, EffectVersion::V1)
        .unwrap();
    assert_eq!(move_creature.field(Role::Param2).unwrap().name(), "Orientation");
    assert_eq!(
        move_creature.linked_category(),
        Some(candlekeep_common::ResourceCategory::Are)
    );

    let tobex = LayoutResolver::new(Context::new(Game::Tob).with_feature(Feature::TobEx))
        .resolve(&v1(318, 5, 0x0024_0001), 0, EffectVersion::V1)
        .unwrap();
    assert_eq!(tobex.field(Role::Param2).unwrap().name(), "Modifier type");
}

#[test]
fn test_eeex_opcodes_need_the_extension() {
    let data = v2(402, 0, 0);
    let plain = resolver(Game::Bg2ee)
        .resolve(&data, 0, EffectVersion::V2)
        .unwrap();
    assert!(plain.is_failsafe());
    assert_eq!(plain.field(Role::Param1).unwrap().name(), "Parameter 1");

    let eeex = LayoutResolver::new(Context::new(Game::Bg2ee).with_feature(Feature::EeEx))
        .resolve(&data, 0, EffectVersion::V2)
        .unwrap();
    assert!(!eeex.is_failsafe());
    assert_eq!(eeex.field(Role::Param1).unwrap().name(), "Unused");

    let on_removal = LayoutResolver::new(Context::new(Game::Bg2ee).with_feature(Feature::EeEx))
        .resolve(&v2(407, 0, 0), 0, EffectVersion::V2)
        .unwrap();
    assert_eq!(
        on_removal.linked_category(),
        Some(candlekeep_common::ResourceCategory::Spl)
    );

    // The flag means nothing outside an Enhanced Edition.
    let tob = LayoutResolver::new(Context::new(Game::Tob).with_feature(Feature::EeEx))
        .resolve(&data, 0, EffectVersion::V2)
        .unwrap();
    assert!(tob.is_failsafe());
}

#[test]
fn test_charm_reads_creature_type_and_charm_type() {
    let classic = resolver(Game::Bg2)
        .resolve(&v1(5, 4, 1), 0, EffectVersion::V1)
        .unwrap();
    assert_eq!(classic.field(Role::Param1).unwrap().name(), "Creature type");
    assert_eq!(classic.field(Role::Param2).unwrap().name(), "Charm type");
    match classic.field(Role::Param2).unwrap().value() {
        FieldValue::Enum { value, labels } => {
            assert_eq!(*value, 1);
            assert_eq!(labels.get(1), Some("Charmed (hostile)"));
            assert_eq!(labels.get(1001), None);
        }
        other => panic!("expected an enumeration, got {other:?}"),
    }

    let enhanced = resolver(Game::Bg2ee)
        .resolve(&v1(5, 4, 1001), 0, EffectVersion::V1)
        .unwrap();
    match enhanced.field(Role::Param2).unwrap().value() {
        FieldValue::Enum { labels, .. } => {
            assert_eq!(labels.get(1001), Some("Charmed (hostile, no text)"));
        }
        other => panic!("expected an enumeration, got {other:?}"),
    }
}

#[test]
fn test_hold_picks_ids_table_from_parameter_2() {
    for game in [Game::Bg1, Game::Bg2, Game::Bg2ee, Game::Iwd] {
        let layout = resolver(game)
            .resolve(&v1(109, 2, 2), 0, EffectVersion::V1)
            .unwrap();
        assert_eq!(layout.field(Role::Param1).unwrap().name(), "IDS entry", "{game:?}");
        match layout.field(Role::Param2).unwrap().value() {
            FieldValue::Enum { value, labels } => {
                assert_eq!(*value, 2);
                assert_eq!(labels.get(2), Some("EA.IDS"));
            }
            other => panic!("{game:?}: expected an enumeration, got {other:?}"),
        }
    }
}

#[test]
fn test_sleep_and_stun_modes_are_enhanced_only() {
    let cases = [(39, "Wake on damage"), (45, "Stun type")];
    for (opcode, mode) in cases {
        let enhanced = resolver(Game::Bg2ee)
            .resolve(&v1(opcode, 0, 1), 0, EffectVersion::V1)
            .unwrap();
        assert_eq!(enhanced.field(Role::Param2).unwrap().name(), mode);

        let classic = resolver(Game::Bg2)
            .resolve(&v1(opcode, 0, 1), 0, EffectVersion::V1)
            .unwrap();
        assert_eq!(classic.field(Role::Param2).unwrap().name(), "Unused");
    }
}

#[test]
fn test_v2_layout_covers_the_record() {
    let layout = resolver(Game::Bg2ee)
        .resolve(&v2(0, 3, 0b11), 0, EffectVersion::V2)
        .unwrap();

    let mut at = 0;
    for field in layout.fields() {
        assert_eq!(field.offset(), at, "{}", field.name());
        at = field.end();
    }
    assert_eq!(at, 0x100);

    let mut roles: Vec<Role> = layout.roles().iter().flatten().copied().collect();
    roles.sort();
    roles.dedup();
    assert_eq!(roles.len(), Role::COMMON.len() + Role::EXTENDED.len());
    assert_eq!(
        layout.field(Role::Resistance).map(Field::offset),
        Some(0x4c)
    );
    assert_eq!(
        layout.field(Role::VariableName).map(Field::size),
        Some(32)
    );
}

#[test]
fn test_short_record_is_rejected() {
    let err = resolver(Game::Bg2)
        .resolve(&[0u8; 0x80], 0, EffectVersion::V2)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRecord { .. }));
}

#[test]
fn test_addressing_replaces_by_role() {
    let context = Context::new(Game::Bg2);
    let resolver = LayoutResolver::new(context.clone());
    let mut doc = resolver
        .build_record(&v1(0, 2, 0), EffectVersion::V1)
        .unwrap();
    let root = doc.root();

    let addressing = EffectAddressing::build(&doc, root, &context).unwrap();
    assert_eq!(addressing.get(Role::Param1), Some((3, 4)));
    assert_eq!(addressing.offset(Role::Special), Some(0x2c));
    assert_eq!(addressing.get(Role::Param3), None);

    addressing
        .replace(&mut doc, Role::Param1, Field::signed("AC value", 0, 4, -2))
        .unwrap();
    let bytes = doc.serialize_flat(root).unwrap();
    assert_eq!(&bytes[4..8], &(-2i32).to_le_bytes());

    let err = addressing
        .replace(&mut doc, Role::Param1, Field::unsigned("AC value", 0, 2, 1))
        .unwrap_err();
    assert!(matches!(err, Error::Addressing { role: Role::Param1, .. }));
    assert_eq!(doc.serialize_flat(root).unwrap(), bytes);

    let err = addressing
        .replace(&mut doc, Role::Param3, Field::unsigned("Parameter 3", 0, 4, 1))
        .unwrap_err();
    assert!(matches!(err, Error::Addressing { role: Role::Param3, .. }));
}

#[test]
fn test_addressing_follows_edited_bytes() {
    let context = Context::new(Game::Bg2ee);
    let resolver = LayoutResolver::new(context.clone());
    let mut doc = resolver
        .build_record(&v1(1, 3, 0), EffectVersion::V1)
        .unwrap();
    let root = doc.root();

    let addressing = EffectAddressing::build(&doc, root, &context).unwrap();
    addressing
        .replace(&mut doc, Role::Param2, Field::unsigned("Modifier type", 0, 4, 2))
        .unwrap();

    let rebuilt = EffectAddressing::build(&doc, root, &context).unwrap();
    assert_eq!(rebuilt.get(Role::Param1), addressing.get(Role::Param1));

    let bytes = doc.serialize_flat(root).unwrap();
    let layout = resolver.resolve(&bytes, 0, EffectVersion::V1).unwrap();
    assert_eq!(
        layout.field(Role::Param1).unwrap().value(),
        &FieldValue::Unsigned(3)
    );
}

#[test]
fn test_truncated_record_becomes_placeholder() {
    let resolver = resolver(Game::Bg2);
    let mut data = v1(12, 10, 0);
    data.extend([0u8; 0x10]);

    let mut doc = Document::new("Effects", LIST, 0);
    let root = doc.root();
    let mut reader = StructReader::new(&mut doc, root, &data, 0);
    let first = resolver
        .read_into(&mut reader, EffectVersion::V1, "Effect", Capability::Addable(EFFECT))
        .unwrap();
    let second = resolver
        .read_into(&mut reader, EffectVersion::V1, "Effect", Capability::Addable(EFFECT))
        .unwrap();
    assert!(first.is_some());
    assert!(second.is_none());
    assert!(reader.is_truncated());
    assert_eq!(reader.finish().unwrap(), 0x40);

    let root = doc.get(root).unwrap();
    assert_eq!(root.child_count(), 2);
    let effect = root.child(0).unwrap();
    assert_eq!(effect.kind(), Some(EFFECT));
    assert_eq!(effect.child_count(), 17);
    let placeholder = root.child(1).unwrap();
    assert_eq!(placeholder.name(), "Unknown");
    assert_eq!((placeholder.offset(), placeholder.size()), (0x30, 0x10));
}

#[cfg(feature = "serde")]
#[test]
fn test_context_round_trips_through_json() {
    let context = Context::new(Game::Tob).with_feature(Feature::TobEx);
    let json = serde_json::to_string(&context).unwrap();
    assert_eq!(serde_json::from_str::<Context>(&json).unwrap(), context);
}

proptest! {
    #[test]
    fn test_any_v1_record_resolves_to_contiguous_fields(
        bytes in prop::collection::vec(any::<u8>(), 0x30),
        game in prop::sample::select(Game::ALL.to_vec()),
    ) {
        let resolver = resolver(game);
        let layout = resolver.resolve(&bytes, 0, EffectVersion::V1).unwrap();
        let mut at = 0;
        for field in layout.fields() {
            prop_assert_eq!(field.offset(), at);
            at = field.end();
        }
        prop_assert_eq!(at, 0x30);

        let again = resolver.resolve(&bytes, 0, EffectVersion::V1).unwrap();
        prop_assert_eq!(layout.fields(), again.fields());
    }

    #[test]
    fn test_any_v2_record_resolves_to_contiguous_fields(
        bytes in prop::collection::vec(any::<u8>(), 0x100),
        game in prop::sample::select(Game::ALL.to_vec()),
    ) {
        let layout = resolver(game).resolve(&bytes, 0, EffectVersion::V2).unwrap();
        prop_assert_eq!(layout.size(), 0x100);
        prop_assert_eq!(layout.fields().last().map(Field::end), Some(0x100));
    }
}
