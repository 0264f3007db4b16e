//! Resource references held by a document.

use candlekeep_common::{ResRef, ResourceCategory};
use candlekeep_struct::{Document, FieldValue, NodeId};

use crate::provider::ResourceProvider;

/// A resource reference field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The field holding the reference.
    pub node: NodeId,
    /// The field's name.
    pub field: String,
    pub name: ResRef,
    pub category: ResourceCategory,
}

/// Every non-empty, typed resource reference under `id`, in offset order.
pub fn references(doc: &Document, id: NodeId) -> Vec<Reference> {
    doc.flatten(id)
        .into_iter()
        .filter_map(|leaf| {
            let node = doc.get(leaf)?;
            let FieldValue::ResRef {
                name,
                category: Some(category),
            } = node.value()?
            else {
                return None;
            };
            if name.is_empty() {
                return None;
            }
            Some(Reference {
                node: leaf,
                field: node.name().to_string(),
                name: *name,
                category: *category,
            })
        })
        .collect()
}

/// References under `id` whose target `provider` does not have.
///
/// This is advisory: a reference may resolve through game archives the
/// provider does not see.
pub fn check_links(doc: &Document, id: NodeId, provider: &impl ResourceProvider) -> Vec<Reference> {
    references(doc, id)
        .into_iter()
        .filter(|r| {
            let found = provider.contains(&r.name, r.category);
            if !found {
                tracing::debug!(field = %r.field, name = %r.name, category = %r.category, "missing resource");
            }
            !found
        })
        .collect()
}
