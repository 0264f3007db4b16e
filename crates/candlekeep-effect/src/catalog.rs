//! Immutable label tables for one engine context.

use std::sync::Arc;

use candlekeep_struct::Labels;

use crate::context::{ContextProvider, EngineFamily, Feature};
use crate::names;

/// Identifier tables used as enumerations by effect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdsTable {
    Ea,
    General,
    Race,
    Class,
    Specific,
    Gender,
    Align,
    Kit,
}

impl IdsTable {
    /// The table's file name.
    pub const fn file_name(&self) -> &'static str {
        match self {
            IdsTable::Ea => "EA.IDS",
            IdsTable::General => "GENERAL.IDS",
            IdsTable::Race => "RACE.IDS",
            IdsTable::Class => "CLASS.IDS",
            IdsTable::Specific => "SPECIFIC.IDS",
            IdsTable::Gender => "GENDER.IDS",
            IdsTable::Align => "ALIGN.IDS",
            IdsTable::Kit => "KIT.IDS",
        }
    }
}

/// Every label set the resolver needs, fixed for one context.
///
/// Built once with [`Catalog::for_context`] and shared through an [`Arc`].
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Opcode names known to the context.
    pub opcodes: Labels,
    pub targets: Labels,
    pub timings: Labels,
    pub resistances: Labels,
    pub save_types: Labels,
    pub schools: Labels,
    pub secondary_types: Labels,
    /// Increment/set/percentage modes shared by most stat opcodes.
    pub modifier_types: Labels,
    pub attack_rates: Labels,
    pub damage_modes: Labels,
    /// Damage types, keyed by their value in the high word of parameter 2.
    pub damage_types: Labels,
    pub colors: Labels,
    pub color_locations: Labels,
    pub allegiances: Labels,
    pub cast_modes: Labels,
    pub boolean: Labels,
    ea: Labels,
    general: Labels,
    race: Labels,
    class: Labels,
    specific: Labels,
    gender: Labels,
    align: Labels,
    kit: Labels,
}

impl Catalog {
    /// Resolve the label tables for a context.
    pub fn for_context(context: &impl ContextProvider) -> Arc<Self> {
        let engine = context.engine();
        let enhanced = context.is_enhanced();

        let opcodes = match engine {
            EngineFamily::Bg1 => Labels::layered(&[names::COMMON]),
            EngineFamily::Bg2 if enhanced && context.has_feature(Feature::EeEx) => {
                Labels::layered(&[names::COMMON, names::BG2, names::ENHANCED, names::EEEX])
            }
            EngineFamily::Bg2 if enhanced => {
                Labels::layered(&[names::COMMON, names::BG2, names::ENHANCED])
            }
            EngineFamily::Bg2 if context.has_feature(Feature::TobEx) => {
                Labels::layered(&[names::COMMON, names::BG2, names::TOBEX])
            }
            EngineFamily::Bg2 => Labels::layered(&[names::COMMON, names::BG2]),
            EngineFamily::Torment => Labels::layered(&[names::COMMON, names::TORMENT]),
            EngineFamily::IceWind => {
                Labels::layered(&[names::COMMON, &names::BG2[..46], names::ICEWIND])
            }
            EngineFamily::IceWind2 => Labels::layered(&[
                names::COMMON,
                &names::BG2[..46],
                names::ICEWIND,
                names::ICEWIND2,
            ]),
        };

        let save_types = match engine {
            EngineFamily::IceWind2 => {
                Labels::sparse(&[(2, "Fortitude"), (3, "Reflex"), (4, "Will")])
            }
            _ if enhanced => Labels::sparse(&[
                (0, "Spell"),
                (1, "Breath weapon"),
                (2, "Paralyze/Poison/Death"),
                (3, "Rod/Staff/Wand"),
                (4, "Petrify/Polymorph"),
                (10, "Ignore primary target"),
                (11, "Ignore secondary target"),
                (23, "Bypass mirror image"),
                (24, "Ignore difficulty"),
            ]),
            _ => Labels::indexed(&[
                "Spell",
                "Breath weapon",
                "Paralyze/Poison/Death",
                "Rod/Staff/Wand",
                "Petrify/Polymorph",
            ]),
        };

        let mut timing: Vec<(i64, &'static str)> = vec![
            (0, "Instant/Limited"),
            (1, "Instant/Permanent until death"),
            (2, "Instant/While equipped"),
            (3, "Delay/Limited"),
            (4, "Delay/Permanent"),
            (5, "Delay/While equipped"),
            (6, "Limited after duration"),
            (7, "Permanent after duration"),
            (8, "Equipped after duration"),
            (9, "Instant/Permanent"),
            (10, "Instant/Limited (ticks)"),
        ];
        if enhanced {
            timing.push((4096, "Absolute duration"));
        }

        let race = match engine {
            EngineFamily::IceWind2 => Labels::sparse(&[
                (1, "Human"),
                (2, "Elf"),
                (3, "Half-elf"),
                (4, "Dwarf"),
                (5, "Halfling"),
                (6, "Gnome"),
                (7, "Half-orc"),
                (152, "Aasimar"),
                (153, "Tiefling"),
                (154, "Drow"),
                (155, "Wild elf"),
                (156, "Duergar"),
                (157, "Deep gnome"),
            ]),
            _ => Labels::sparse(&[
                (1, "Human"),
                (2, "Elf"),
                (3, "Half-elf"),
                (4, "Dwarf"),
                (5, "Halfling"),
                (6, "Gnome"),
                (7, "Half-orc"),
                (101, "Ankheg"),
                (102, "Basilisk"),
                (104, "Beetle"),
                (105, "Dog"),
                (108, "Ghoul"),
                (111, "Golem"),
                (115, "Lycanthrope"),
                (118, "Ogre"),
                (122, "Skeleton"),
                (126, "Wolf"),
                (152, "Drow"),
                (155, "Troll"),
                (156, "Umberhulk"),
                (157, "Vampire"),
                (185, "Lich"),
                (190, "Dragon"),
            ]),
        };

        Arc::new(Self {
            opcodes,
            targets: Labels::indexed(&[
                "None",
                "Self",
                "Preset target",
                "Party",
                "Everyone",
                "Everyone except party",
                "Caster group",
                "Target group",
                "Everyone except self",
                "Original caster",
            ]),
            timings: Labels::sparse(&timing),
            resistances: Labels::indexed(&[
                "Natural/Nonmagical",
                "Dispel/Not bypass resistance",
                "Not dispel/Bypass resistance",
                "Dispel/Bypass resistance",
            ]),
            save_types,
            schools: Labels::indexed(&[
                "None",
                "Abjurer",
                "Conjurer",
                "Diviner",
                "Enchanter",
                "Illusionist",
                "Invoker",
                "Necromancer",
                "Transmuter",
                "Generalist",
            ]),
            secondary_types: Labels::indexed(&[
                "None",
                "Spell protections",
                "Specific protections",
                "Illusionary protections",
                "Magic attack",
                "Divination attack",
                "Conjuration",
                "Combat protections",
                "Contingency",
                "Battleground",
                "Offensive damage",
                "Disabling",
                "Combination",
                "Non-combat",
            ]),
            modifier_types: Labels::indexed(&["Increment", "Set", "Set % of"]),
            attack_rates: Labels::indexed(&[
                "0 attacks per round",
                "1 attack per round",
                "2 attacks per round",
                "3 attacks per round",
                "4 attacks per round",
                "5 attacks per round",
                "1 attack per 2 rounds",
                "3 attacks per 2 rounds",
                "5 attacks per 2 rounds",
                "7 attacks per 2 rounds",
                "9 attacks per 2 rounds",
            ]),
            damage_modes: if enhanced {
                Labels::indexed(&["Normal", "Set to value", "Set to %", "Percentage"])
            } else {
                Labels::indexed(&["Normal", "Set to value", "Set to %"])
            },
            damage_types: Labels::sparse(&[
                (0x0000, "Crushing"),
                (0x0001, "Acid"),
                (0x0002, "Cold"),
                (0x0004, "Electricity"),
                (0x0008, "Fire"),
                (0x0010, "Piercing"),
                (0x0020, "Poison"),
                (0x0040, "Magic"),
                (0x0080, "Missile"),
                (0x0100, "Slashing"),
                (0x0200, "Magic fire"),
                (0x0400, "Magic cold"),
                (0x0800, "Stunning"),
            ]),
            colors: Labels::sparse(&[
                (0, "Black"),
                (1, "Pale Blue"),
                (2, "Dark Blue"),
                (18, "Dark Red"),
                (32, "Red"),
                (45, "Orange"),
                (60, "Light Green"),
                (63, "Dark Green"),
                (66, "Purple"),
            ]),
            color_locations: Labels::sparse(&[
                (0, "Metal"),
                (1, "Minor"),
                (2, "Major"),
                (3, "Skin"),
                (4, "Leather"),
                (5, "Armor"),
                (6, "Hair"),
                (0xff, "Whole body"),
            ]),
            allegiances: Labels::indexed(&[
                "Match target",
                "Match target",
                "From CRE file",
                "Match target",
                "From CRE file",
                "Hostile",
            ]),
            cast_modes: Labels::indexed(&["Default", "Cast instantly", "Ignore conditions"]),
            boolean: Labels::indexed(&["No", "Yes"]),
            ea: Labels::sparse(&[
                (0, "Anyone"),
                (1, "Inanimate"),
                (2, "PC"),
                (3, "Familiar"),
                (4, "Ally"),
                (5, "Controlled"),
                (6, "Charmed"),
                (28, "Good but red"),
                (29, "Good but blue"),
                (30, "Good cutoff"),
                (31, "Not good"),
                (126, "Anything"),
                (128, "Neutral"),
                (199, "Not evil"),
                (200, "Evil cutoff"),
                (201, "Evil but green"),
                (202, "Evil but blue"),
                (255, "Enemy"),
            ]),
            general: Labels::sparse(&[
                (0, "Anyone"),
                (1, "Humanoid"),
                (2, "Animal"),
                (3, "Dead"),
                (4, "Undead"),
                (5, "Giant humanoid"),
                (6, "Frozen"),
                (255, "Monster"),
            ]),
            race,
            class: Labels::sparse(&[
                (1, "Mage"),
                (2, "Fighter"),
                (3, "Cleric"),
                (4, "Thief"),
                (5, "Bard"),
                (6, "Paladin"),
                (7, "Fighter/Mage"),
                (8, "Fighter/Cleric"),
                (9, "Fighter/Thief"),
                (10, "Fighter/Mage/Thief"),
                (11, "Druid"),
                (12, "Ranger"),
                (13, "Mage/Thief"),
                (14, "Cleric/Mage"),
                (15, "Cleric/Thief"),
                (16, "Fighter/Druid"),
                (17, "Fighter/Mage/Cleric"),
                (18, "Cleric/Ranger"),
                (19, "Sorcerer"),
                (20, "Monk"),
                (21, "Shaman"),
            ]),
            specific: Labels::sparse(&[(0, "Normal"), (1, "Magic"), (255, "Magic")]),
            gender: Labels::sparse(&[
                (1, "Male"),
                (2, "Female"),
                (3, "Other"),
                (4, "Neither"),
                (5, "Both"),
                (6, "Summoned"),
                (7, "Illusionary"),
            ]),
            align: Labels::sparse(&[
                (0x01, "Mask good"),
                (0x02, "Mask general"),
                (0x03, "Mask evil"),
                (0x11, "Lawful good"),
                (0x12, "Lawful neutral"),
                (0x13, "Lawful evil"),
                (0x21, "Neutral good"),
                (0x22, "Neutral"),
                (0x23, "Neutral evil"),
                (0x31, "Chaotic good"),
                (0x32, "Chaotic neutral"),
                (0x33, "Chaotic evil"),
            ]),
            kit: Labels::sparse(&[
                (0x4000, "Barbarian"),
                (0x4001, "Trueclass"),
                (0x4002, "Berserker"),
                (0x4003, "Wizard slayer"),
                (0x4004, "Kensai"),
                (0x4005, "Cavalier"),
                (0x4006, "Inquisitor"),
                (0x4007, "Undead hunter"),
                (0x4008, "Abjurer"),
                (0x4009, "Conjurer"),
            ]),
        })
    }

    /// Labels of an identifier table.
    pub fn ids(&self, table: IdsTable) -> &Labels {
        match table {
            IdsTable::Ea => &self.ea,
            IdsTable::General => &self.general,
            IdsTable::Race => &self.race,
            IdsTable::Class => &self.class,
            IdsTable::Specific => &self.specific,
            IdsTable::Gender => &self.gender,
            IdsTable::Align => &self.align,
            IdsTable::Kit => &self.kit,
        }
    }

    /// The name of an opcode, if the context knows it.
    pub fn opcode_name(&self, opcode: u32) -> Option<&str> {
        self.opcodes.get(opcode as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, Game};

    #[test]
    fn test_opcode_names_follow_engine() {
        let bg1 = Catalog::for_context(&Context::new(Game::Bg1));
        let bg2ee = Catalog::for_context(&Context::new(Game::Bg2ee));
        let pst = Catalog::for_context(&Context::new(Game::Pst));
        let iwd2 = Catalog::for_context(&Context::new(Game::Iwd2));

        assert_eq!(bg1.opcode_name(1), Some("Modify attacks per round"));
        assert_eq!(bg1.opcode_name(318), None);
        assert_eq!(bg2ee.opcode_name(319), Some("Item usability"));
        assert_eq!(pst.opcode_name(186), Some("Set status"));
        assert_eq!(iwd2.opcode_name(233), Some("Show visual effect"));
        assert_eq!(iwd2.opcode_name(231), Some("Time stop"));
    }

    #[test]
    fn test_tobex_overrides() {
        let tob = Catalog::for_context(&Context::new(Game::Tob));
        let tobex = Catalog::for_context(&Context::new(Game::Tob).with_feature(Feature::TobEx));
        assert_eq!(tob.opcode_name(318), Some("Protection from resource"));
        assert_eq!(tobex.opcode_name(318), Some("Set stat"));
    }

    #[test]
    fn test_eeex_names_need_an_enhanced_edition() {
        let bg2ee = Catalog::for_context(&Context::new(Game::Bg2ee));
        let eeex = Catalog::for_context(&Context::new(Game::Bg2ee).with_feature(Feature::EeEx));
        let tob = Catalog::for_context(&Context::new(Game::Tob).with_feature(Feature::EeEx));
        assert_eq!(bg2ee.opcode_name(402), None);
        assert_eq!(eeex.opcode_name(402), Some("Invoke Lua"));
        assert_eq!(eeex.opcode_name(319), Some("Item usability"));
        assert_eq!(tob.opcode_name(402), None);
    }

    #[test]
    fn test_save_types() {
        let iwd2 = Catalog::for_context(&Context::new(Game::Iwd2));
        assert_eq!(iwd2.save_types.set_bits(0b1100), vec!["Fortitude", "Reflex"]);

        let bg2 = Catalog::for_context(&Context::new(Game::Bg2));
        assert_eq!(bg2.save_types.set_bits(0b1), vec!["Spell"]);
    }
}
