//! Item files (ITM V1 and V1.1).
//!
//! All effects of an item live in one table. The header owns the global
//! effects and every ability owns its own effects; each owner records the
//! index of its first effect in the table and how many it has. Adding or
//! removing an effect therefore updates the owner's count and the first
//! index of every owner whose effects follow.

use candlekeep_common::{BinaryReader, ResourceCategory};
use candlekeep_effect::{ContextProvider, EffectAddressing, EffectVersion, LayoutResolver, EFFECT};
use candlekeep_struct::{
    Capability, Document, FieldValue, Labels, NodeId, RecordKind, StructReader,
};

use crate::header::SignatureHeader;
use crate::{Error, Result};

/// Record kind of the item root.
pub const ITEM: RecordKind = RecordKind::new("Item");

/// Record kind of item abilities.
pub const ABILITY: RecordKind = RecordKind::new("Ability");

/// Size of one ability record.
pub const ABILITY_SIZE: usize = 0x38;

const SIGNATURE: [u8; 4] = *b"ITM ";

/// Item file version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemVersion {
    /// Baldur's Gate, Icewind Dale and the Enhanced Editions.
    V1,
    /// Planescape: Torment.
    V1_1,
}

impl ItemVersion {
    const TAGS: [[u8; 4]; 2] = [*b"V1  ", *b"V1.1"];

    /// Size of the item header.
    pub const fn header_size(&self) -> usize {
        match self {
            ItemVersion::V1 => 0x72,
            ItemVersion::V1_1 => 0x9a,
        }
    }

    const fn tag(&self) -> [u8; 4] {
        match self {
            ItemVersion::V1 => Self::TAGS[0],
            ItemVersion::V1_1 => Self::TAGS[1],
        }
    }
}

/// Who an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectOwner {
    /// Applied while the item is equipped.
    Global,
    /// Applied by the ability with this index.
    Ability(usize),
}

/// An owner's slice of the effect table and the fields recording it.
#[derive(Debug, Clone, Copy)]
struct Span {
    owner: EffectOwner,
    first_id: NodeId,
    first: u32,
    count_id: NodeId,
    count: u32,
}

impl Span {
    fn end(&self) -> usize {
        (self.first + self.count) as usize
    }
}

/// An item file.
#[derive(Debug)]
pub struct ItemResource {
    doc: Document,
    version: ItemVersion,
}

impl ItemResource {
    /// Parse an item file. Effects are resolved with `resolver`.
    pub fn parse(data: &[u8], resolver: &LayoutResolver) -> Result<Self> {
        let header = SignatureHeader::read(&mut BinaryReader::new(data))?;
        header.expect_signature(&SIGNATURE)?;
        let version = match header.expect_version(ResourceCategory::Itm, &ItemVersion::TAGS)? {
            0 => ItemVersion::V1,
            _ => ItemVersion::V1_1,
        };

        let shift = resolver.context().game().section_shift();
        let mut doc = Document::new("ITM", ITEM, 0).with_section_shift(shift);
        let root = doc.root();
        let mut abilities = 0;
        let mut effects = 0;
        {
            let mut reader = StructReader::new(&mut doc, root, data, 0);
            let counts = read_header(&mut reader, version)?;

            let mut end = counts.first_effect + counts.global_effects;
            reader.seek(counts.abilities_offset as usize);
            for _ in 0..counts.abilities {
                let mut span = (0, 0);
                let read = reader.nested("Ability", ABILITY, Capability::Addable(ABILITY), |r| {
                    span = read_ability(r)?;
                    Ok(())
                })?;
                if read.is_none() {
                    break;
                }
                abilities += 1;
                end = end.max(span.0 + span.1);
            }

            reader.seek(counts.effects_offset as usize);
            for _ in 0..end {
                let read = resolver.read_into(
                    &mut reader,
                    EffectVersion::V1,
                    "Effect",
                    Capability::Addable(EFFECT),
                )?;
                if read.is_none() {
                    break;
                }
                effects += 1;
            }
        }
        let padding = doc.fill_holes(root, data)?;

        tracing::debug!(?version, abilities, effects, padding, "parsed ITM file");
        Ok(Self { doc, version })
    }

    /// An item with no abilities and no effects.
    pub fn blank(version: ItemVersion, resolver: &LayoutResolver) -> Result<Self> {
        let size = version.header_size();
        let mut data = vec![0u8; size];
        data[..4].copy_from_slice(&SIGNATURE);
        data[4..8].copy_from_slice(&version.tag());
        // Abilities and effects both start right after the header.
        data[0x64..0x68].copy_from_slice(&(size as u32).to_le_bytes());
        data[0x6a..0x6e].copy_from_slice(&(size as u32).to_le_bytes());
        Self::parse(&data, resolver)
    }

    pub fn version(&self) -> ItemVersion {
        self.version
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Ability structures in file order.
    pub fn abilities(&self) -> Vec<NodeId> {
        self.records(ABILITY)
    }

    /// The effect table in file order.
    pub fn effects(&self) -> Vec<NodeId> {
        self.records(EFFECT)
    }

    fn records(&self, kind: RecordKind) -> Vec<NodeId> {
        self.doc
            .get(self.doc.root())
            .map(|root| {
                root.children()
                    .filter(|c| c.kind() == Some(kind))
                    .map(|c| c.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The effects of one owner, in order.
    pub fn effects_of(&self, owner: EffectOwner) -> Result<Vec<NodeId>> {
        let span = self.span(owner)?;
        let effects = self.effects();
        effects
            .get(span.first as usize..span.end())
            .map(<[NodeId]>::to_vec)
            .ok_or_else(|| {
                Error::EffectTable(format!(
                    "{owner:?} claims effects {}..{} of {}",
                    span.first,
                    span.end(),
                    effects.len()
                ))
            })
    }

    /// Role addressing for one effect of the table.
    pub fn effect_addressing(&self, effect: NodeId, resolver: &LayoutResolver) -> Result<EffectAddressing> {
        Ok(EffectAddressing::build_with(&self.doc, effect, resolver)?)
    }

    fn spans(&self) -> Result<Vec<Span>> {
        let root = self.doc.root();
        let mut spans = vec![self.span_of(EffectOwner::Global, root, "# global effects")?];
        for (index, ability) in self.abilities().into_iter().enumerate() {
            spans.push(self.span_of(EffectOwner::Ability(index), ability, "# effects")?);
        }
        Ok(spans)
    }

    fn span(&self, owner: EffectOwner) -> Result<Span> {
        let spans = self.spans()?;
        spans
            .iter()
            .find(|s| s.owner == owner)
            .copied()
            .ok_or(Error::NoSuchAbility {
                index: match owner {
                    EffectOwner::Ability(index) => index,
                    EffectOwner::Global => 0,
                },
                count: spans.len() - 1,
            })
    }

    fn span_of(&self, owner: EffectOwner, parent: NodeId, count: &str) -> Result<Span> {
        let (first_id, first) = self.u16_field(parent, "First effect index")?;
        let (count_id, count) = self.u16_field(parent, count)?;
        Ok(Span {
            owner,
            first_id,
            first,
            count_id,
            count,
        })
    }

    fn u16_field(&self, parent: NodeId, name: &str) -> Result<(NodeId, u32)> {
        let id = self
            .doc
            .find_by_name(parent, name, false)
            .ok_or_else(|| Error::EffectTable(format!("missing field {name:?}")))?;
        let value = self
            .doc
            .get(id)
            .and_then(|n| n.value())
            .and_then(FieldValue::as_u32)
            .unwrap_or(0);
        Ok((id, value))
    }

    /// Append an effect to an owner's effects.
    ///
    /// `effect` must be an addable V1 effect record, for example one built
    /// with [`LayoutResolver::build_record`].
    pub fn add_effect(&mut self, owner: EffectOwner, effect: Document) -> Result<NodeId> {
        let size = effect.get(effect.root()).map(|r| r.size()).unwrap_or(0);
        if size != EffectVersion::V1.size() {
            return Err(Error::EffectTable(format!(
                "item effects are {:#x} bytes, got {size:#x}",
                EffectVersion::V1.size()
            )));
        }

        let spans = self.spans()?;
        let span = self.span(owner)?;
        let position = span.end();
        let effects = self.effects();
        if position > effects.len() {
            return Err(Error::EffectTable(format!(
                "{owner:?} ends at effect {position} of {}",
                effects.len()
            )));
        }

        let mut updates = vec![(span.count_id, span.count + 1)];
        for other in spans.iter().filter(|s| s.owner != owner) {
            if other.first as usize >= position {
                updates.push((other.first_id, other.first + 1));
            }
        }
        if updates.iter().any(|(_, v)| *v > u32::from(u16::MAX)) {
            return Err(Error::EffectTable("effect index overflows 16 bits".to_string()));
        }

        let root = self.doc.root();
        let id = match effects.get(position) {
            Some(&next) => {
                let index = self.child_index(next)?;
                self.doc.insert_addable_at(root, index, effect)?
            }
            None => self.doc.insert_addable(root, effect)?,
        };
        for (field, value) in updates {
            self.doc.set_value(field, FieldValue::Unsigned(value))?;
        }

        tracing::debug!(?owner, position, "added item effect");
        Ok(id)
    }

    /// Remove the `index`-th effect of an owner.
    pub fn remove_effect(&mut self, owner: EffectOwner, index: usize) -> Result<()> {
        let spans = self.spans()?;
        let span = self.span(owner)?;
        if index >= span.count as usize {
            return Err(Error::NoSuchEffect {
                index,
                count: span.count as usize,
            });
        }
        let position = span.first as usize + index;
        let node = *self.effects().get(position).ok_or_else(|| {
            Error::EffectTable(format!("{owner:?} effect {index} is past the effect table"))
        })?;

        let mut updates = vec![(span.count_id, span.count - 1)];
        for other in spans.iter().filter(|s| s.owner != owner) {
            if other.first as usize > position {
                updates.push((other.first_id, other.first - 1));
            }
        }

        self.doc.remove_addable(node, false)?;
        for (field, value) in updates {
            self.doc.set_value(field, FieldValue::Unsigned(value))?;
        }

        tracing::debug!(?owner, position, "removed item effect");
        Ok(())
    }

    /// Append a blank ability. Its effects start at the end of the table.
    pub fn add_ability(&mut self) -> Result<NodeId> {
        let total = self.effects().len() as u32;
        let blank = [0u8; ABILITY_SIZE];
        let mut record = Document::record("Ability", ABILITY);
        let record_root = record.root();
        {
            let mut reader = StructReader::new(&mut record, record_root, &blank, 0);
            read_ability(&mut reader)?;
            reader.finish()?;
        }
        let first = record
            .find_by_name(record_root, "First effect index", false)
            .ok_or_else(|| Error::EffectTable("ability has no first effect index".to_string()))?;
        record.set_value(first, FieldValue::Unsigned(total))?;

        let root = self.doc.root();
        Ok(self.doc.insert_addable(root, record)?)
    }

    /// Remove an ability together with its effects.
    pub fn remove_ability(&mut self, index: usize) -> Result<()> {
        let abilities = self.abilities();
        let node = *abilities.get(index).ok_or(Error::NoSuchAbility {
            index,
            count: abilities.len(),
        })?;
        let owner = EffectOwner::Ability(index);
        let count = self.span(owner)?.count as usize;
        for effect in (0..count).rev() {
            self.remove_effect(owner, effect)?;
        }
        self.doc.remove_addable(node, false)?;
        Ok(())
    }

    fn child_index(&self, node: NodeId) -> Result<usize> {
        self.doc
            .get(self.doc.root())
            .and_then(|root| root.children().position(|c| c.id() == node))
            .ok_or_else(|| candlekeep_struct::Error::UnknownNode(node).into())
    }

    /// Serialize the item.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let root = self.doc.root();
        Ok(self.doc.serialize(root)?)
    }
}

struct HeaderCounts {
    abilities_offset: u32,
    abilities: u32,
    effects_offset: u32,
    first_effect: u32,
    global_effects: u32,
}

fn read_header(r: &mut StructReader<'_, '_>, version: ItemVersion) -> candlekeep_struct::Result<HeaderCounts> {
    r.text("Signature", 4)?;
    r.text("Version", 4)?;
    r.unsigned("Unidentified name", 4)?;
    r.unsigned("Identified name", 4)?;
    r.resref("Used up item", Some(ResourceCategory::Itm))?;
    r.flags(
        "Flags",
        4,
        Labels::indexed(&[
            "Critical item",
            "Two-handed",
            "Movable",
            "Displayable",
            "Cursed",
            "Not copyable",
            "Magical",
            "Left-handed",
            "Silver",
            "Cold iron",
            "Off-handed",
            "Conversable",
        ]),
    )?;
    r.enumeration(
        "Category",
        2,
        Labels::indexed(&[
            "Miscellaneous", "Amulets and necklaces", "Armor", "Belts and girdles", "Boots",
            "Arrows", "Bracers and gauntlets", "Headgear", "Keys", "Potions", "Rings",
            "Scrolls", "Shields", "Food", "Bullets", "Bows", "Daggers", "Maces", "Slings",
            "Small swords", "Large swords", "Hammers", "Morning stars", "Flails", "Darts",
            "Axes", "Quarterstaves", "Crossbows", "Hand-to-hand weapons", "Spears",
            "Halberds", "Bolts", "Cloaks and robes", "Gold pieces", "Gems", "Wands",
        ]),
    )?;
    r.flags(
        "Unusable by",
        4,
        Labels::indexed(&[
            "Chaotic", "Evil", "Good", "Neutral (good/evil)", "Lawful", "Neutral (law/chaos)",
            "Bard", "Cleric", "Cleric-Mage", "Cleric-Thief", "Cleric-Ranger", "Fighter",
            "Fighter-Druid", "Fighter-Mage", "Fighter-Cleric", "Fighter-Mage-Cleric",
            "Fighter-Mage-Thief", "Fighter-Thief", "Mage", "Mage-Thief", "Paladin", "Ranger",
            "Thief", "Elf", "Dwarf", "Half-elf", "Halfling", "Human", "Gnome", "Monk", "Druid",
            "Half-orc",
        ]),
    )?;
    r.text("Equipped appearance", 2)?;
    r.unsigned("Minimum level", 2)?;
    r.unsigned("Minimum strength", 2)?;
    r.unsigned("Minimum strength bonus", 1)?;
    r.unsigned("Kit usability 1", 1)?;
    r.unsigned("Minimum intelligence", 1)?;
    r.unsigned("Kit usability 2", 1)?;
    r.unsigned("Minimum dexterity", 1)?;
    r.unsigned("Kit usability 3", 1)?;
    r.unsigned("Minimum wisdom", 1)?;
    r.unsigned("Kit usability 4", 1)?;
    r.unsigned("Minimum constitution", 1)?;
    r.unsigned("Weapon proficiency", 1)?;
    r.unsigned("Minimum charisma", 2)?;
    r.unsigned("Price", 4)?;
    r.unsigned("Maximum in stack", 2)?;
    r.resref("Icon", Some(ResourceCategory::Bam))?;
    r.unsigned("Lore to identify", 2)?;
    r.resref("Ground icon", Some(ResourceCategory::Bam))?;
    r.unsigned("Weight", 4)?;
    r.unsigned("Unidentified description", 4)?;
    r.unsigned("Identified description", 4)?;
    r.resref("Description image", Some(ResourceCategory::Bam))?;
    r.unsigned("Enchantment", 4)?;
    let abilities_offset = r.section_offset("Abilities offset", 4, ABILITY)?;
    let abilities = r.section_count("# abilities", 2, ABILITY)?;
    let effects_offset = r.section_offset("Effects offset", 4, EFFECT)?;
    let first_effect = r.unsigned("First effect index", 2)?;
    let global_effects = r.unsigned("# global effects", 2)?;

    if version == ItemVersion::V1_1 {
        r.resref("Dialogue", Some(ResourceCategory::Dlg))?;
        r.unsigned("Speaker name", 4)?;
        r.unsigned("Weapon color", 2)?;
        r.bytes("Unused", 26)?;
    }

    Ok(HeaderCounts {
        abilities_offset,
        abilities,
        effects_offset,
        first_effect,
        global_effects,
    })
}

/// Read one ability; returns its first effect index and effect count.
fn read_ability(r: &mut StructReader<'_, '_>) -> candlekeep_struct::Result<(u32, u32)> {
    r.enumeration(
        "Type",
        1,
        Labels::indexed(&["Default", "Melee", "Ranged", "Magical", "Launcher"]),
    )?;
    r.enumeration("Identify to use?", 1, Labels::indexed(&["No", "Yes"]))?;
    r.enumeration(
        "Ability location",
        1,
        Labels::indexed(&["None", "Weapon slots", "Spell slots", "Item slots", "Ability slots"]),
    )?;
    r.unsigned("Alternate dice size", 1)?;
    r.resref("Icon", Some(ResourceCategory::Bam))?;
    r.enumeration(
        "Target",
        1,
        Labels::indexed(&[
            "Invalid",
            "Living actor",
            "Inventory",
            "Dead actor",
            "Any point within range",
            "Caster",
            "Unknown",
            "Caster (instant)",
        ]),
    )?;
    r.unsigned("# targets", 1)?;
    r.unsigned("Range (feet)", 2)?;
    r.enumeration(
        "Launcher required",
        1,
        Labels::indexed(&["None", "Bow", "Crossbow", "Sling"]),
    )?;
    r.unsigned("Alternate # dice thrown", 1)?;
    r.unsigned("Speed factor", 1)?;
    r.unsigned("Alternate damage bonus", 1)?;
    r.signed("THAC0 bonus", 2)?;
    r.unsigned("Dice size", 1)?;
    r.unsigned("Primary type (school)", 1)?;
    r.unsigned("# dice thrown", 1)?;
    r.unsigned("Secondary type", 1)?;
    r.signed("Damage bonus", 2)?;
    r.enumeration(
        "Damage type",
        2,
        Labels::indexed(&[
            "None",
            "Piercing",
            "Crushing",
            "Slashing",
            "Missile",
            "Fist",
            "Piercing/Crushing",
            "Piercing/Slashing",
            "Crushing/Slashing",
            "Blunt missile",
        ]),
    )?;
    let count = r.unsigned("# effects", 2)?;
    let first = r.unsigned("First effect index", 2)?;
    r.unsigned("# charges", 2)?;
    r.enumeration(
        "When drained",
        2,
        Labels::indexed(&[
            "Item remains",
            "Item vanishes",
            "Replace with used up",
            "Item recharges",
        ]),
    )?;
    r.flags(
        "Flags",
        4,
        Labels::indexed(&[
            "Add strength bonus",
            "Breakable",
            "Damage strength bonus",
            "THAC0 strength bonus",
        ]),
    )?;
    r.unsigned("Projectile", 2)?;
    r.unsigned("Overhand swing %", 2)?;
    r.unsigned("Backhand swing %", 2)?;
    r.unsigned("Thrust %", 2)?;
    r.enumeration("Is arrow?", 2, Labels::indexed(&["No", "Yes"]))?;
    r.enumeration("Is bolt?", 2, Labels::indexed(&["No", "Yes"]))?;
    r.enumeration("Is bullet?", 2, Labels::indexed(&["No", "Yes"]))?;
    Ok((first, count))
}
