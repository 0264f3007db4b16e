//! Effect record layouts for Infinity Engine games.
//!
//! The meaning of an effect's parameters depends on its opcode, the engine
//! family, the game edition, installed engine extensions and sometimes on the
//! value of a sibling parameter. This crate turns raw effect bytes into an
//! ordered [`Field`](candlekeep_struct::Field) list for a given [`Context`]:
//!
//! - [`Context`] / [`ContextProvider`] - game edition and feature flags
//! - [`Catalog`] - immutable label tables for one context
//! - [`LayoutResolver`] - shared table, engine tables, then a generic fallback
//! - [`EffectAddressing`] - role to `(child index, offset)` lookups for edits
//!
//! # Example
//!
//! ```
//! use candlekeep_effect::{Context, EffectVersion, Game, LayoutResolver, Role};
//!
//! let mut data = vec![0u8; 0x30];
//! data[0] = 1; // Modify attacks per round
//! data[8] = 2; // parameter 2: "Set % of"
//!
//! let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
//! let layout = resolver.resolve(&data, 0, EffectVersion::V1).unwrap();
//! assert_eq!(layout.field(Role::Param1).unwrap().name(), "Value");
//! ```

mod addressing;
mod catalog;
mod context;
mod error;
mod names;
mod resolver;
mod schema;
mod tables;

pub use addressing::{EffectAddressing, Role};
pub use catalog::{Catalog, IdsTable};
pub use context::{Context, ContextProvider, EngineFamily, Feature, Game};
pub use error::{Error, Result};
pub use resolver::{EffectLayout, EffectVersion, LayoutResolver, EFFECT};
