//! Effect layout resolution.

use std::borrow::Cow;
use std::sync::Arc;

use candlekeep_common::{text, BinaryReader, ResRef, ResourceCategory};
use candlekeep_struct::{Capability, Document, Field, Labels, NodeId, RecordKind, StructReader};

use crate::addressing::Role;
use crate::catalog::Catalog;
use crate::context::{Context, ContextProvider};
use crate::schema::{Lookup, Resource, Schema, Slot};
use crate::{tables, Error, Result};

/// Record kind of effect structures.
pub const EFFECT: RecordKind = RecordKind::new("Effect");

/// Structural version of an effect record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectVersion {
    /// Embedded effect with a 2-byte opcode (0x30 bytes).
    V1,
    /// Standalone effect with 4-byte slots (0x100 bytes).
    V2,
}

impl EffectVersion {
    /// Size of one record in bytes.
    pub const fn size(&self) -> usize {
        match self {
            EffectVersion::V1 => 0x30,
            EffectVersion::V2 => 0x100,
        }
    }

    /// The version whose records are `size` bytes long.
    pub const fn from_size(size: usize) -> Option<Self> {
        match size {
            0x30 => Some(EffectVersion::V1),
            0x100 => Some(EffectVersion::V2),
            _ => None,
        }
    }

    pub(crate) const fn param2_offset(&self) -> usize {
        match self {
            EffectVersion::V1 => 0x08,
            EffectVersion::V2 => 0x10,
        }
    }

    pub(crate) const fn special_offset(&self) -> usize {
        match self {
            EffectVersion::V1 => 0x2c,
            EffectVersion::V2 => 0x38,
        }
    }
}

/// The resolved field list of one effect record.
///
/// Field offsets are absolute within the buffer the layout was resolved
/// from. `roles` runs parallel to `fields`.
#[derive(Debug, Clone)]
pub struct EffectLayout {
    opcode: u32,
    version: EffectVersion,
    linked_category: Option<ResourceCategory>,
    fields: Vec<Field>,
    roles: Vec<Option<Role>>,
    failsafe: bool,
}

impl EffectLayout {
    pub fn opcode(&self) -> u32 {
        self.opcode
    }

    pub fn version(&self) -> EffectVersion {
        self.version
    }

    /// The category the resource slot refers to, if any.
    pub fn linked_category(&self) -> Option<ResourceCategory> {
        self.linked_category
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The role of each field, in field order.
    pub fn roles(&self) -> &[Option<Role>] {
        &self.roles
    }

    /// Whether no table knew the opcode and generic parameters were used.
    pub fn is_failsafe(&self) -> bool {
        self.failsafe
    }

    /// Index of the first field playing `role`.
    pub fn position(&self, role: Role) -> Option<usize> {
        self.roles.iter().position(|r| *r == Some(role))
    }

    /// The first field playing `role`.
    pub fn field(&self, role: Role) -> Option<&Field> {
        self.position(role).map(|index| &self.fields[index])
    }

    /// Total size covered by the fields.
    pub fn size(&self) -> usize {
        self.fields.iter().map(Field::size).sum()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

/// Produces effect layouts for one context.
///
/// The resolver is immutable; resolving the same bytes twice yields the same
/// layout.
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    context: Context,
    catalog: Arc<Catalog>,
}

impl LayoutResolver {
    pub fn new(context: Context) -> Self {
        let catalog = Catalog::for_context(&context);
        Self { context, catalog }
    }

    /// Reuse an existing catalog. The catalog must have been built for
    /// `context`.
    pub fn with_catalog(context: Context, catalog: Arc<Catalog>) -> Self {
        Self { context, catalog }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Resolve the layout of the record at `offset`.
    pub fn resolve(&self, data: &[u8], offset: usize, version: EffectVersion) -> Result<EffectLayout> {
        let size = version.size();
        let available = data.len().saturating_sub(offset);
        if available < size {
            return Err(Error::InvalidRecord {
                offset,
                reason: format!("needs {size:#x} bytes, {available:#x} available"),
            });
        }

        let reader = BinaryReader::new(data);
        let opcode = match version {
            EffectVersion::V1 => reader.peek_u16_at(offset).map(u32::from),
            EffectVersion::V2 => reader.peek_u32_at(offset),
        }
        .map_err(|err| Error::InvalidRecord {
            offset,
            reason: format!("cannot read opcode: {err}"),
        })?;

        let lookup = Lookup::new(opcode, version, &self.context, &self.catalog, data, offset);
        let (schema, failsafe) = match tables::shared(&lookup).or_else(|| tables::engine(&lookup)) {
            Some(schema) => (schema, false),
            None => {
                tracing::debug!(
                    opcode,
                    game = %self.context.game(),
                    offset,
                    "unrecognized opcode, using generic parameters"
                );
                (
                    Schema::new(Slot::Unsigned("Parameter 1"), Slot::Unsigned("Parameter 2")),
                    true,
                )
            }
        };

        let mut emit = Emitter {
            data,
            base: offset,
            version,
            catalog: &self.catalog,
            fields: Vec::with_capacity(48),
            roles: Vec::with_capacity(48),
        };
        match version {
            EffectVersion::V1 => emit.v1(&schema)?,
            EffectVersion::V2 => emit.v2(&schema)?,
        }

        tracing::trace!(opcode, ?version, fields = emit.fields.len(), "resolved effect layout");
        Ok(EffectLayout {
            opcode,
            version,
            linked_category: schema.linked_category(),
            fields: emit.fields,
            roles: emit.roles,
            failsafe,
        })
    }

    /// Read one effect record at the reader's position as a nested
    /// structure.
    ///
    /// A record cut short by the end of the input becomes an opaque
    /// placeholder and `None` is returned.
    pub fn read_into(
        &self,
        reader: &mut StructReader<'_, '_>,
        version: EffectVersion,
        name: impl Into<Cow<'static, str>>,
        capability: Capability,
    ) -> Result<Option<NodeId>> {
        let name = name.into();
        let layout = match self.resolve(reader.data(), reader.position(), version) {
            Ok(layout) => layout,
            Err(Error::InvalidRecord { .. }) => {
                reader.bytes(name, version.size())?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        let fields = layout.into_fields();
        Ok(reader.nested(name, EFFECT, capability, |inner| inner.fields(fields))?)
    }

    /// Build a detached, addable effect record from `data`.
    pub fn build_record(&self, data: &[u8], version: EffectVersion) -> Result<Document> {
        let layout = self.resolve(data, 0, version)?;
        let mut doc = Document::record("Effect", EFFECT);
        let root = doc.root();
        let mut reader = StructReader::new(&mut doc, root, data, 0);
        reader.fields(layout.into_fields())?;
        reader.finish()?;
        Ok(doc)
    }

    /// A blank effect record of the given version.
    pub fn blank_record(&self, version: EffectVersion) -> Result<Document> {
        self.build_record(&vec![0u8; version.size()], version)
    }
}

/// Turns a schema into fields over the record bytes.
struct Emitter<'a> {
    data: &'a [u8],
    base: usize,
    version: EffectVersion,
    catalog: &'a Catalog,
    fields: Vec<Field>,
    roles: Vec<Option<Role>>,
}

impl Emitter<'_> {
    fn reader(&self, relative: usize) -> BinaryReader<'_> {
        BinaryReader::new_at(self.data, self.base + relative)
    }

    fn push(&mut self, role: Option<Role>, field: Field) {
        self.fields.push(field);
        self.roles.push(role);
    }

    fn unsigned(&mut self, role: Role, name: &'static str, relative: usize, size: usize) -> Result<()> {
        let value = self.reader(relative).read_uint(size)?;
        self.push(Some(role), Field::unsigned(name, self.base + relative, size, value));
        Ok(())
    }

    fn signed(&mut self, role: Role, name: &'static str, relative: usize, size: usize) -> Result<()> {
        let value = self.reader(relative).read_int(size)?;
        self.push(Some(role), Field::signed(name, self.base + relative, size, value));
        Ok(())
    }

    fn enumeration(
        &mut self,
        role: Role,
        name: &'static str,
        relative: usize,
        size: usize,
        labels: &Labels,
    ) -> Result<()> {
        let value = self.reader(relative).read_uint(size)?;
        self.push(
            Some(role),
            Field::enumeration(name, self.base + relative, size, value, labels.clone()),
        );
        Ok(())
    }

    fn flags(
        &mut self,
        role: Role,
        name: &'static str,
        relative: usize,
        size: usize,
        labels: &Labels,
    ) -> Result<()> {
        let bits = self.reader(relative).read_uint(size)?;
        self.push(
            Some(role),
            Field::flags(name, self.base + relative, size, bits, labels.clone()),
        );
        Ok(())
    }

    fn resref(
        &mut self,
        role: Role,
        name: &'static str,
        relative: usize,
        category: Option<ResourceCategory>,
    ) -> Result<()> {
        let value: ResRef = self.reader(relative).read_resref()?;
        self.push(Some(role), Field::resref(name, self.base + relative, value, category));
        Ok(())
    }

    fn text(&mut self, role: Role, name: &'static str, relative: usize, size: usize) -> Result<()> {
        let bytes = self.reader(relative).read_bytes(size)?;
        self.push(
            Some(role),
            Field::text(name, self.base + relative, size, text::decode(bytes)),
        );
        Ok(())
    }

    fn bytes(&mut self, role: Role, name: &'static str, relative: usize, size: usize) -> Result<()> {
        let bytes = self.reader(relative).read_bytes(size)?.to_vec();
        self.push(Some(role), Field::bytes(name, self.base + relative, bytes));
        Ok(())
    }

    /// Emit a numeric slot. Split slots give the role to their first part.
    fn slot(&mut self, role: Role, relative: usize, size: usize, slot: &Slot) -> Result<()> {
        match slot {
            Slot::Unsigned(name) => self.unsigned(role, *name, relative, size),
            Slot::Signed(name) => self.signed(role, *name, relative, size),
            Slot::Enum(name, labels) => self.enumeration(role, *name, relative, size, labels),
            Slot::Flags(name, labels) => self.flags(role, *name, relative, size, labels),
            Slot::Split(parts) => {
                let mut at = relative;
                for (index, (width, part)) in parts.iter().enumerate() {
                    let first = self.fields.len();
                    self.slot(role, at, *width, part)?;
                    if index > 0 {
                        self.roles[first] = None;
                    }
                    at += width;
                }
                Ok(())
            }
        }
    }

    fn resource(&mut self, role: Role, name: &'static str, relative: usize, resource: &Resource) -> Result<()> {
        match resource {
            Resource::Unused => self.resref(role, name, relative, None),
            Resource::Ref(category) => self.resref(role, name, relative, Some(*category)),
            Resource::Text(label) => self.text(role, *label, relative, 8),
        }
    }

    fn v1(&mut self, schema: &Schema) -> Result<()> {
        let c = self.catalog;
        self.enumeration(Role::Opcode, "Type", 0x00, 2, &c.opcodes)?;
        self.enumeration(Role::Target, "Target", 0x02, 1, &c.targets)?;
        self.unsigned(Role::Power, "Power", 0x03, 1)?;
        self.slot(Role::Param1, 0x04, 4, &schema.param1)?;
        self.slot(Role::Param2, 0x08, 4, &schema.param2)?;
        self.enumeration(Role::Timing, "Timing mode", 0x0c, 1, &c.timings)?;
        self.enumeration(Role::Resistance, "Dispel/Resistance", 0x0d, 1, &c.resistances)?;
        self.unsigned(Role::Duration, "Duration", 0x0e, 4)?;
        self.unsigned(Role::Probability1, "Probability 1", 0x12, 1)?;
        self.unsigned(Role::Probability2, "Probability 2", 0x13, 1)?;
        self.resource(Role::Resource, "Resource", 0x14, &schema.resource)?;
        self.unsigned(Role::DiceCount, "# dice thrown", 0x1c, 4)?;
        self.unsigned(Role::DiceSize, "Dice size", 0x20, 4)?;
        self.flags(Role::SaveType, "Save type", 0x24, 4, &c.save_types)?;
        self.signed(Role::SaveBonus, "Save bonus", 0x28, 4)?;
        self.special(schema)
    }

    fn v2(&mut self, schema: &Schema) -> Result<()> {
        let c = self.catalog;
        self.enumeration(Role::Opcode, "Type", 0x00, 4, &c.opcodes)?;
        self.enumeration(Role::Target, "Target", 0x04, 4, &c.targets)?;
        self.unsigned(Role::Power, "Power", 0x08, 4)?;
        self.slot(Role::Param1, 0x0c, 4, &schema.param1)?;
        self.slot(Role::Param2, 0x10, 4, &schema.param2)?;
        self.enumeration(Role::Timing, "Timing mode", 0x14, 4, &c.timings)?;
        self.unsigned(Role::Duration, "Duration", 0x18, 4)?;
        self.unsigned(Role::Probability1, "Probability 1", 0x1c, 2)?;
        self.unsigned(Role::Probability2, "Probability 2", 0x1e, 2)?;
        self.resource(Role::Resource, "Resource", 0x20, &schema.resource)?;
        self.unsigned(Role::DiceCount, "# dice thrown", 0x28, 4)?;
        self.unsigned(Role::DiceSize, "Dice size", 0x2c, 4)?;
        self.flags(Role::SaveType, "Save type", 0x30, 4, &c.save_types)?;
        self.signed(Role::SaveBonus, "Save bonus", 0x34, 4)?;
        self.special(schema)?;
        self.enumeration(Role::PrimaryType, "Primary type", 0x3c, 4, &c.schools)?;
        self.unsigned(Role::Reserved, "Reserved", 0x40, 4)?;
        self.unsigned(Role::MinLevel, "Minimum level", 0x44, 4)?;
        self.unsigned(Role::MaxLevel, "Maximum level", 0x48, 4)?;
        self.enumeration(Role::Resistance, "Dispel/Resistance", 0x4c, 4, &c.resistances)?;
        self.unsigned(Role::Param3, "Parameter 3", 0x50, 4)?;
        self.unsigned(Role::Param4, "Parameter 4", 0x54, 4)?;
        self.unsigned(Role::Param5, "Parameter 5", 0x58, 4)?;
        self.unsigned(Role::TimeApplied, "Time applied", 0x5c, 4)?;
        self.resref(Role::Resource2, "Resource 2", 0x60, None)?;
        self.resref(Role::Resource3, "Resource 3", 0x68, None)?;
        self.signed(Role::CasterX, "Caster location: X", 0x70, 4)?;
        self.signed(Role::CasterY, "Caster location: Y", 0x74, 4)?;
        self.signed(Role::TargetX, "Target location: X", 0x78, 4)?;
        self.signed(Role::TargetY, "Target location: Y", 0x7c, 4)?;
        self.enumeration(
            Role::ParentType,
            "Parent resource type",
            0x80,
            4,
            &Labels::indexed(&["None", "Spell", "Item"]),
        )?;
        self.resref(Role::ParentResource, "Parent resource", 0x84, None)?;
        self.flags(
            Role::ParentFlags,
            "Parent resource flags",
            0x8c,
            4,
            &Labels::sparse(&[(9, "Hostile"), (10, "No LOS required"), (11, "Allow spotting")]),
        )?;
        self.unsigned(Role::Projectile, "Projectile", 0x90, 4)?;
        self.signed(Role::ParentSlot, "Parent resource slot", 0x94, 4)?;
        self.text(Role::VariableName, "Variable name", 0x98, 32)?;
        self.unsigned(Role::CasterLevel, "Caster level", 0xb8, 4)?;
        self.unsigned(Role::FirstApply, "First apply", 0xbc, 4)?;
        self.enumeration(Role::SecondaryType, "Secondary type", 0xc0, 4, &c.secondary_types)?;
        self.bytes(Role::Unused, "Unused", 0xc4, 60)
    }

    fn special(&mut self, schema: &Schema) -> Result<()> {
        let offset = self.version.special_offset();
        match &schema.special {
            Some(slot) => self.slot(Role::Special, offset, 4, slot),
            None => self.unsigned(Role::Special, "Special", offset, 4),
        }
    }
}
