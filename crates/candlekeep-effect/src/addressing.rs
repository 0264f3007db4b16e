//! Role-based addressing of effect fields.
//!
//! Field names depend on the opcode and the context, so code that edits an
//! effect addresses its fields by [`Role`] instead.

use candlekeep_struct::{Document, Field, NodeId};
use rustc_hash::FxHashMap;

use crate::context::{Context, ContextProvider};
use crate::{EffectVersion, Error, LayoutResolver, Result};

/// The structural role of an effect field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Opcode,
    Target,
    Power,
    Param1,
    Param2,
    Timing,
    Resistance,
    Duration,
    Probability1,
    Probability2,
    Resource,
    DiceCount,
    DiceSize,
    SaveType,
    SaveBonus,
    Special,
    PrimaryType,
    Reserved,
    MinLevel,
    MaxLevel,
    Param3,
    Param4,
    Param5,
    TimeApplied,
    Resource2,
    Resource3,
    CasterX,
    CasterY,
    TargetX,
    TargetY,
    ParentType,
    ParentResource,
    ParentFlags,
    Projectile,
    ParentSlot,
    VariableName,
    CasterLevel,
    FirstApply,
    SecondaryType,
    Unused,
}

impl Role {
    /// Roles present in every effect version.
    pub const COMMON: &'static [Role] = &[
        Role::Opcode,
        Role::Target,
        Role::Power,
        Role::Param1,
        Role::Param2,
        Role::Timing,
        Role::Resistance,
        Role::Duration,
        Role::Probability1,
        Role::Probability2,
        Role::Resource,
        Role::DiceCount,
        Role::DiceSize,
        Role::SaveType,
        Role::SaveBonus,
        Role::Special,
    ];

    /// Roles added by version 2 records.
    pub const EXTENDED: &'static [Role] = &[
        Role::PrimaryType,
        Role::Reserved,
        Role::MinLevel,
        Role::MaxLevel,
        Role::Param3,
        Role::Param4,
        Role::Param5,
        Role::TimeApplied,
        Role::Resource2,
        Role::Resource3,
        Role::CasterX,
        Role::CasterY,
        Role::TargetX,
        Role::TargetY,
        Role::ParentType,
        Role::ParentResource,
        Role::ParentFlags,
        Role::Projectile,
        Role::ParentSlot,
        Role::VariableName,
        Role::CasterLevel,
        Role::FirstApply,
        Role::SecondaryType,
        Role::Unused,
    ];

    /// Whether records of `version` have a field for this role.
    pub fn applies_to(&self, version: EffectVersion) -> bool {
        version == EffectVersion::V2 || Self::COMMON.contains(self)
    }
}

/// Where each role lives inside one effect structure.
#[derive(Debug, Clone)]
pub struct EffectAddressing {
    node: NodeId,
    version: EffectVersion,
    opcode: u32,
    slots: FxHashMap<Role, (usize, usize)>,
}

impl EffectAddressing {
    /// Build the table for the effect structure `node`.
    ///
    /// The layout is re-derived from the structure's current bytes, so the
    /// table reflects edits made since the record was read.
    pub fn build(doc: &Document, node: NodeId, context: &impl ContextProvider) -> Result<Self> {
        Self::build_with(doc, node, &LayoutResolver::new(Context::from_provider(context)))
    }

    /// Build the table with an existing resolver.
    pub fn build_with(doc: &Document, node: NodeId, resolver: &LayoutResolver) -> Result<Self> {
        let view = doc
            .get(node)
            .ok_or(candlekeep_struct::Error::UnknownNode(node))?;
        let bytes = doc.serialize_flat(node)?;
        let version = EffectVersion::from_size(bytes.len()).ok_or_else(|| Error::InvalidRecord {
            offset: view.offset(),
            reason: format!("{:#x} bytes is not an effect record", bytes.len()),
        })?;
        let layout = resolver.resolve(&bytes, 0, version)?;

        let base = view.offset();
        let mut slots = FxHashMap::default();
        for (field, role) in layout.fields().iter().zip(layout.roles()) {
            let Some(role) = *role else {
                continue;
            };
            let offset = base + field.offset();
            let index = view
                .children()
                .position(|child| child.offset() == offset && !child.is_aliased())
                .ok_or_else(|| Error::Addressing {
                    role,
                    reason: format!("no field at {offset:#x}"),
                })?;
            slots.entry(role).or_insert((index, offset));
        }

        tracing::trace!(?node, opcode = layout.opcode(), roles = slots.len(), "built effect addressing");
        Ok(Self {
            node,
            version,
            opcode: layout.opcode(),
            slots,
        })
    }

    /// The effect structure this table addresses.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn version(&self) -> EffectVersion {
        self.version
    }

    pub fn opcode(&self) -> u32 {
        self.opcode
    }

    /// `(child index, absolute offset)` of a role.
    pub fn get(&self, role: Role) -> Option<(usize, usize)> {
        self.slots.get(&role).copied()
    }

    pub fn index(&self, role: Role) -> Option<usize> {
        self.get(role).map(|(index, _)| index)
    }

    pub fn offset(&self, role: Role) -> Option<usize> {
        self.get(role).map(|(_, offset)| offset)
    }

    /// Addressed roles in declaration order.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.slots.keys().copied().collect();
        roles.sort();
        roles
    }

    /// Replace the field playing `role`.
    ///
    /// The replacement is moved to the role's offset and must have exactly
    /// the size of the field it replaces. Nothing changes on failure.
    pub fn replace(&self, doc: &mut Document, role: Role, field: Field) -> Result<NodeId> {
        let (index, offset) = self.get(role).ok_or_else(|| Error::Addressing {
            role,
            reason: format!("not present in a {:?} record", self.version),
        })?;
        let current = doc
            .get(self.node)
            .and_then(|node| node.child(index))
            .ok_or_else(|| Error::Addressing {
                role,
                reason: format!("child index {index} out of range"),
            })?;
        if current.size() != field.size() {
            return Err(Error::Addressing {
                role,
                reason: format!(
                    "size mismatch: {} bytes, replacement has {}",
                    current.size(),
                    field.size()
                ),
            });
        }

        doc.replace_field(self.node, index, field.at(offset))
            .map_err(|err| {
                if err.is_addressing() {
                    Error::Addressing {
                        role,
                        reason: err.to_string(),
                    }
                } else {
                    err.into()
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_per_version() {
        assert!(Role::Param1.applies_to(EffectVersion::V1));
        assert!(!Role::Param3.applies_to(EffectVersion::V1));
        assert!(Role::Param3.applies_to(EffectVersion::V2));
        assert_eq!(Role::COMMON.len() + Role::EXTENDED.len(), 40);
    }
}
