//! Candlekeep - structured, editable Infinity Engine resource records.
//!
//! This crate provides a unified interface to the Candlekeep library
//! ecosystem.
//!
//! # Crates
//!
//! - [`candlekeep_common`] - Binary reading, resource names and categories
//! - [`candlekeep_struct`] - Offset-addressed field trees with structural edits
//! - [`candlekeep_effect`] - Context-driven effect record layouts
//! - [`candlekeep_resource`] - EFF and ITM files, resource providers
//!
//! # Example
//!
//! ```
//! use candlekeep::prelude::*;
//!
//! let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
//! let mut eff = EffResource::blank(&resolver)?;
//! assert_eq!(eff.opcode(), Some(0));
//!
//! let doc = eff.document();
//! for leaf in doc.flatten(doc.root()).into_iter().take(4) {
//!     let field = doc.get(leaf).unwrap();
//!     println!("{:#06x} {}", field.offset(), field.name());
//! }
//! assert_eq!(eff.to_bytes()?.len(), EFF_SIZE);
//! # Ok::<(), candlekeep::resource::Error>(())
//! ```

// Re-export all sub-crates
pub use candlekeep_common as common;
pub use candlekeep_effect as effect;
pub use candlekeep_resource as resource;
pub use candlekeep_struct as structure;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use candlekeep_common::{BinaryReader, ResRef, ResourceCategory};
    pub use candlekeep_effect::{
        Context, ContextProvider, EffectAddressing, EffectVersion, Feature, Game, LayoutResolver,
        Role,
    };
    pub use candlekeep_resource::{
        check_links, DirectoryProvider, EffResource, EffectOwner, ItemResource, ItemVersion,
        MemoryProvider, ResourceProvider, EFF_SIZE,
    };
    pub use candlekeep_struct::{Document, Field, FieldValue, NodeId, StructureEvent};
}

// Re-export commonly used types at the crate root
pub use candlekeep_struct::Document;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
