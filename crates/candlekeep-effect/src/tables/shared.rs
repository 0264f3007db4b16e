//! Opcodes whose parameters mean the same thing in every engine.
//!
//! An entry may still branch on the context or on sibling bytes; what makes
//! it shared is that every engine family agrees on the opcode number.

use candlekeep_common::ResourceCategory;
use candlekeep_struct::Labels;

use crate::catalog::IdsTable;
use crate::schema::{ids_targets, Lookup, Resource, Schema, Slot};

pub(crate) fn lookup(l: &Lookup<'_>) -> Option<Schema> {
    let c = l.catalog;
    let schema = match l.opcode {
        0 => Schema::new(
            Slot::Signed("AC value"),
            Slot::Flags(
                "Bonus to",
                Labels::sparse(&[
                    (0, "Crushing"),
                    (1, "Missile"),
                    (2, "Piercing"),
                    (3, "Slashing"),
                    (4, "Set base AC"),
                ]),
            ),
        ),
        1 => {
            // Enhanced editions add a percentage mode where parameter 1 is a
            // plain number instead of an attack rate.
            let param1 = if l.enhanced() && l.param2() == 2 {
                Slot::Unsigned("Value")
            } else {
                l.labels("Value", &c.attack_rates)
            };
            Schema::new(param1, l.labels("Modifier type", &c.modifier_types))
        }
        2 | 4 | 11 | 14 | 43 | 46 | 47 | 70 | 75 | 77 | 79 | 81 | 116 | 136 | 160 | 161
        | 162 | 163 | 164 => Schema::unused(),
        3 | 24 | 38 | 40 | 74 | 76 | 80 | 128 | 134 => {
            Schema::new(Slot::Unsigned("Unused"), Slot::Unsigned("Unused"))
        }
        5 => Schema::new(
            l.labels("Creature type", c.ids(IdsTable::General)),
            Slot::Enum("Charm type", charm_types(l.enhanced())),
        ),
        // Only the Enhanced Editions read parameter 2 of 39 and 45.
        39 if l.enhanced() => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Wake on damage", Labels::indexed(&["Yes", "No"])),
        ),
        45 if l.enhanced() => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Stun type",
                Labels::indexed(&["Normal", "Unstun after damage", "Power word, stun"]),
            ),
        ),
        39 | 45 => Schema::unused(),
        109 => l.ids_target(),
        6 | 10 | 15 | 19 | 21 | 22 | 27 | 28 | 29 | 30 | 31 | 33 | 34 | 35 | 36 | 37 | 44
        | 49 | 54 | 59 | 73 | 84 | 85 | 86 | 87 | 88 | 89 | 90 | 91 | 92 | 93 | 94 | 95 | 97
        | 104 | 108 | 126 | 166 | 167 | 173 | 176 => l.stat(),
        7 => Schema::new(
            l.labels("Color", &c.colors),
            l.labels("Location", &c.color_locations),
        ),
        8 | 9 | 50 | 51 | 52 => Schema::new(
            Slot::Split(vec![
                (1, Slot::Unsigned("Unused")),
                (1, Slot::Unsigned("Red")),
                (1, Slot::Unsigned("Green")),
                (1, Slot::Unsigned("Blue")),
            ]),
            l.labels("Location", &c.color_locations),
        ),
        12 => damage(l),
        13 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Flags(
                "Death type",
                Labels::indexed(&[
                    "Acid",
                    "Burning",
                    "Crushed",
                    "Normal",
                    "Chunked",
                    "Stoned",
                    "Freezing",
                    "Exploding stoned",
                    "Exploding freezing",
                    "Electrified",
                    "Disintegration",
                ]),
            ),
        ),
        16 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Haste type",
                Labels::indexed(&["Normal", "Improved", "Movement rate only"]),
            ),
        ),
        17 | 18 => Schema::new(
            Slot::Signed("Value"),
            Slot::Enum(
                "Modifier type",
                Labels::indexed(&["Increment", "Set", "Set % of", "Increase, don't heal"]),
            ),
        ),
        20 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Invisibility type", Labels::indexed(&["Normal", "Improved"])),
        ),
        25 | 78 => Schema::new(
            Slot::Unsigned("Amount"),
            Slot::Enum(
                "Poison type",
                Labels::indexed(&[
                    "1 damage per second",
                    "1 damage per second",
                    "Amount damage per second",
                    "1 damage per amount seconds",
                    "Param3 damage per amount seconds",
                ]),
            ),
        ),
        32 => Schema::unused(),
        42 | 62 => Schema::new(
            Slot::Unsigned("# spells to add"),
            Slot::Flags(
                "Spell levels",
                Labels::indexed(&[
                    "Level 1", "Level 2", "Level 3", "Level 4", "Level 5", "Level 6", "Level 7",
                    "Level 8", "Level 9",
                ]),
            ),
        ),
        53 => Schema::new(Slot::Unsigned("Morph type"), Slot::Unsigned("Unused")),
        55 => Schema::new(
            Slot::Unsigned("IDS entry"),
            Slot::Enum("IDS target", ids_targets(false)),
        ),
        57 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Alignment", c.ids(IdsTable::Align).clone()),
        ),
        58 => Schema::new(
            Slot::Unsigned("Level"),
            Slot::Enum(
                "Dispel type",
                Labels::indexed(&["Always dispel", "Use caster level", "Use specific level"]),
            ),
        ),
        60 => Schema::new(
            Slot::Unsigned("Failure chance"),
            Slot::Enum(
                "Spell class",
                Labels::indexed(&["Wizard", "Priest", "Innate", "Wizard (dead magic)"]),
            ),
        ),
        63 | 64 | 65 | 69 => Schema::unused(),
        66 => Schema::value("Fade amount"),
        67 | 127 => Schema::new(
            Slot::Unsigned("Unused"),
            l.labels("Allegiance", &c.allegiances),
        )
        .resource(ResourceCategory::Cre),
        68 => Schema::unused(),
        71 => Schema::new(
            Slot::Enum("Gender", c.ids(IdsTable::Gender).clone()),
            Slot::Enum("How?", Labels::indexed(&["Reverse gender", "Set gender"])),
        ),
        72 => Schema::new(
            Slot::Unsigned("Value"),
            Slot::Enum(
                "AI type",
                Labels::indexed(&["EA", "General", "Race", "Class", "Specific", "Gender", "Alignment"]),
            ),
        ),
        82 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Script level",
                Labels::indexed(&[
                    "Override", "Area", "Specifics", "Unused", "Class", "Race", "General",
                    "Default",
                ]),
            ),
        )
        .resource(ResourceCategory::Bcs),
        83 => Schema::value("Projectile"),
        96 => Schema::value("Value"),
        98 => Schema::new(
            Slot::Unsigned("Value"),
            Slot::Enum(
                "Regeneration type",
                Labels::indexed(&[
                    "Amount HP per second",
                    "Amount HP per second",
                    "Amount HP percentage per second",
                    "1 HP per amount seconds",
                    "Param3 HP per amount seconds",
                ]),
            ),
        ),
        99 => Schema::new(
            Slot::Unsigned("Percentage"),
            Slot::Enum("Spell class", Labels::indexed(&["Wizard", "Priest"])),
        ),
        100 | 178 | 179 => l.ids_target(),
        101 => Schema::new(
            Slot::Unsigned("Unused"),
            l.labels("Effect", &c.opcodes),
        ),
        102 => Schema::value("Spell level"),
        103 | 139 => Schema::value("String"),
        105 => Schema::value("Amount"),
        106 => Schema::value("Value"),
        107 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Which portrait", Labels::indexed(&["Small", "Large"])),
        )
        .resource(ResourceCategory::Bmp),
        110 => Schema::value("Duration"),
        111 | 122 => Schema::new(Slot::Unsigned("# charges"), Slot::Unsigned("Unused"))
            .resource(ResourceCategory::Itm),
        112 | 123 => Schema::unused().resource(ResourceCategory::Itm),
        113 => Schema::value("Slot"),
        114 | 117 | 118 | 119 | 149 | 150 | 153 | 154 | 155 | 156 | 157 | 158 | 159 | 165
        | 168 | 184 => Schema::unused(),
        115 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Alignment",
                Labels::indexed(&["Evil", "Neutral", "Good", "Chaotic", "Lawful"]),
            ),
        ),
        120 => Schema::new(
            Slot::Unsigned("Maximum enchantment"),
            Slot::Enum(
                "Weapon type",
                Labels::indexed(&["Enchanted", "Magical", "Non-magical", "Silver", "Cold iron"]),
            ),
        ),
        121 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Unsigned("Animation"),
        )
        .resource(ResourceCategory::Vvc),
        124 => Schema::unused(),
        125 => Schema::value("Strength"),
        129 | 130 | 131 | 132 | 133 | 137 => Schema::value("Amount"),
        135 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Polymorph type",
                Labels::indexed(&["Change into", "Appearance only", "Appearance only", "Appearance only"]),
            ),
        )
        .resource(ResourceCategory::Cre),
        138 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Sequence",
                Labels::indexed(&["Lay down", "Move hands", "Move hands 2", "Move shoulders", "Hand gesture"]),
            ),
        ),
        140 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Glow",
                Labels::sparse(&[
                    (9, "Necromancy"),
                    (10, "Alteration"),
                    (11, "Enchantment"),
                    (12, "Abjuration"),
                    (13, "Illusion"),
                    (14, "Conjuration"),
                    (15, "Invocation"),
                    (16, "Divination"),
                ]),
            ),
        ),
        141 => Schema::new(
            Slot::Enum(
                "Target",
                Labels::indexed(&["Spell target", "Target point", "Invalid"]),
            ),
            Slot::Unsigned("Lighting"),
        ),
        142 | 169 => Schema::value("Icon"),
        143 => Schema::new(Slot::Unsigned("Slot"), Slot::Unsigned("Unused"))
            .resource(ResourceCategory::Itm),
        144 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Button",
                Labels::indexed(&[
                    "Stealth", "Thieving", "Cast spell", "Quick spell 0", "Quick spell 1",
                    "Quick spell 2", "Turn undead", "Talk", "Use item", "Quick item 1",
                ]),
            ),
        ),
        145 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Spell class",
                Labels::indexed(&["Wizard", "Priest", "Innate", "Wizard (dead magic)"]),
            ),
        ),
        146 | 148 => Schema::new(
            Slot::Unsigned("Cast at level"),
            l.labels("Mode", &c.cast_modes),
        )
        .resource(ResourceCategory::Spl),
        147 | 171 | 172 => Schema::unused().resource(ResourceCategory::Spl),
        151 => Schema::new(Slot::Unsigned("Unused"), Slot::Unsigned("Replacement method"))
            .resource(ResourceCategory::Cre),
        152 => Schema::unused().resource(ResourceCategory::Mve),
        170 => Schema::value("Animation"),
        174 => Schema::unused().resource(ResourceCategory::Wav),
        175 | 185 => l.ids_target(),
        177 | 183 => Schema {
            resource: Resource::Ref(ResourceCategory::Eff),
            ..l.ids_target()
        },
        180 => Schema::unused().resource(ResourceCategory::Itm),
        181 => Schema::value("Item type"),
        182 => Schema::unused().resource(ResourceCategory::Eff),
        _ => return None,
    };
    Some(schema)
}

/// Opcode 12: the high word of parameter 2 holds the damage type.
fn damage(l: &Lookup<'_>) -> Schema {
    let c = l.catalog;
    let high = l.param2_high();
    let damage_type = if c.damage_types.get(high as i64).is_some() {
        Slot::Enum("Damage type", c.damage_types.clone())
    } else {
        // A combination of types; show the individual bits.
        Slot::Flags(
            "Damage type",
            Labels::indexed(&[
                "Acid",
                "Cold",
                "Electricity",
                "Fire",
                "Piercing",
                "Poison",
                "Magic",
                "Missile",
                "Slashing",
                "Magic fire",
                "Magic cold",
                "Stunning",
            ]),
        )
    };
    let special = if l.enhanced() {
        Slot::Flags(
            "Special",
            Labels::indexed(&[
                "Drain HP to caster",
                "Transfer HP to target",
                "Fist damage only",
                "Drain HP to caster (no max HP)",
                "Save for half damage",
                "Fail for half damage",
                "Does not wake sleepers",
            ]),
        )
    } else {
        Slot::Unsigned("Special")
    };
    Schema::new(
        Slot::Signed("Amount"),
        Slot::Split(vec![
            (2, l.labels("Mode", &c.damage_modes)),
            (2, damage_type),
        ]),
    )
    .special(special)
}

fn charm_types(enhanced: bool) -> Labels {
    let base: &[(i64, &'static str)] = &[
        (0, "Charmed (neutral)"),
        (1, "Charmed (hostile)"),
        (2, "Dire charmed (neutral)"),
        (3, "Dire charmed (hostile)"),
        (4, "Controlled by cleric"),
        (5, "Thrall (hostile)"),
    ];
    if enhanced {
        Labels::layered(&[
            base,
            &[
                (1000, "Charmed (neutral, no text)"),
                (1001, "Charmed (hostile, no text)"),
                (1002, "Dire charmed (neutral, no text)"),
                (1003, "Dire charmed (hostile, no text)"),
                (1004, "Controlled by cleric (no text)"),
                (1005, "Thrall (hostile, no text)"),
            ],
        ])
    } else {
        Labels::sparse(base)
    }
}
