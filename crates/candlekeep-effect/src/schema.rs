//! Parameter schemas produced by the opcode tables.

use candlekeep_common::{BinaryReader, ResourceCategory};
use candlekeep_struct::Labels;

use crate::catalog::{Catalog, IdsTable};
use crate::context::{Context, ContextProvider, EngineFamily, Feature};
use crate::EffectVersion;

/// Interpretation of a numeric slot.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Unsigned(&'static str),
    Signed(&'static str),
    Enum(&'static str, Labels),
    Flags(&'static str, Labels),
    /// Sub-slots of the given widths, low bytes first.
    Split(Vec<(usize, Slot)>),
}

impl Slot {
    /// The field name, or `None` for a split slot.
    #[cfg(test)]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Slot::Unsigned(name) | Slot::Signed(name) => Some(*name),
            Slot::Enum(name, _) | Slot::Flags(name, _) => Some(*name),
            Slot::Split(_) => None,
        }
    }
}

/// Interpretation of the 8-byte resource slot.
#[derive(Debug, Clone)]
pub(crate) enum Resource {
    Unused,
    Ref(ResourceCategory),
    Text(&'static str),
}

/// Parameter layout of one opcode.
#[derive(Debug, Clone)]
pub(crate) struct Schema {
    pub param1: Slot,
    pub param2: Slot,
    pub resource: Resource,
    pub special: Option<Slot>,
}

impl Schema {
    pub fn new(param1: Slot, param2: Slot) -> Self {
        Self {
            param1,
            param2,
            resource: Resource::Unused,
            special: None,
        }
    }

    /// Both parameters unused.
    pub fn unused() -> Self {
        Self::new(Slot::Unsigned("Unused"), Slot::Unsigned("Unused"))
    }

    /// Parameter 1 only.
    pub fn value(name: &'static str) -> Self {
        Self::new(Slot::Unsigned(name), Slot::Unsigned("Unused"))
    }

    pub fn resource(mut self, category: ResourceCategory) -> Self {
        self.resource = Resource::Ref(category);
        self
    }

    pub fn resource_text(mut self, name: &'static str) -> Self {
        self.resource = Resource::Text(name);
        self
    }

    pub fn special(mut self, slot: Slot) -> Self {
        self.special = Some(slot);
        self
    }

    /// The category the resource slot links to.
    pub fn linked_category(&self) -> Option<ResourceCategory> {
        match self.resource {
            Resource::Ref(category) => Some(category),
            _ => None,
        }
    }
}

/// Everything an opcode table entry may branch on.
pub(crate) struct Lookup<'a> {
    pub opcode: u32,
    version: EffectVersion,
    context: &'a Context,
    pub catalog: &'a Catalog,
    data: &'a [u8],
    base: usize,
}

impl<'a> Lookup<'a> {
    pub fn new(
        opcode: u32,
        version: EffectVersion,
        context: &'a Context,
        catalog: &'a Catalog,
        data: &'a [u8],
        base: usize,
    ) -> Self {
        Self {
            opcode,
            version,
            context,
            catalog,
            data,
            base,
        }
    }

    fn peek_u32(&self, relative: usize) -> u32 {
        BinaryReader::new(self.data)
            .peek_u32_at(self.base + relative)
            .unwrap_or(0)
    }

    /// Raw parameter 2.
    pub fn param2(&self) -> u32 {
        self.peek_u32(self.version.param2_offset())
    }

    /// High word of parameter 2.
    pub fn param2_high(&self) -> u16 {
        (self.param2() >> 16) as u16
    }

    pub fn engine(&self) -> EngineFamily {
        self.context.engine()
    }

    pub fn enhanced(&self) -> bool {
        self.context.is_enhanced()
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.context.has_feature(feature)
    }

    /// Value / increment-set-percentage pair used by most stat opcodes.
    pub fn stat(&self) -> Schema {
        Schema::new(
            Slot::Signed("Value"),
            Slot::Enum("Modifier type", self.catalog.modifier_types.clone()),
        )
    }

    pub fn labels(&self, name: &'static str, labels: &Labels) -> Slot {
        Slot::Enum(name, labels.clone())
    }

    /// An IDS value in parameter 1 whose table is picked by parameter 2.
    pub fn ids_target(&self) -> Schema {
        let table = match self.param2() {
            2 => Some(IdsTable::Ea),
            3 => Some(IdsTable::General),
            4 => Some(IdsTable::Race),
            5 => Some(IdsTable::Class),
            6 => Some(IdsTable::Specific),
            7 => Some(IdsTable::Gender),
            8 => Some(IdsTable::Align),
            9 if self.enhanced() => Some(IdsTable::Kit),
            _ => None,
        };
        let param1 = match table {
            Some(table) => Slot::Enum("IDS entry", self.catalog.ids(table).clone()),
            None => Slot::Unsigned("IDS entry"),
        };
        Schema::new(param1, Slot::Enum("IDS target", ids_targets(self.enhanced())))
    }
}

pub(crate) fn ids_targets(enhanced: bool) -> Labels {
    let base: &[(i64, &'static str)] = &[
        (2, "EA.IDS"),
        (3, "GENERAL.IDS"),
        (4, "RACE.IDS"),
        (5, "CLASS.IDS"),
        (6, "SPECIFIC.IDS"),
        (7, "GENDER.IDS"),
        (8, "ALIGN.IDS"),
    ];
    if enhanced {
        Labels::layered(&[
            base,
            &[(9, "KIT.IDS"), (10, "Actor's name"), (11, "Actor's script name")],
        ])
    } else {
        Labels::sparse(base)
    }
}
