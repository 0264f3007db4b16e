//! EFF and ITM resources built on the Candlekeep document engine.
//!
//! - [`EffResource`] - standalone V2 effect files
//! - [`ItemResource`] - items, their abilities and their effect table
//! - [`ResourceProvider`] - existence checks and reads by name and category
//! - [`check_links`] - references to resources a provider does not have
//!
//! # Example
//!
//! ```
//! use candlekeep_effect::{Context, Game, LayoutResolver};
//! use candlekeep_resource::{EffectOwner, ItemResource, ItemVersion};
//!
//! let resolver = LayoutResolver::new(Context::new(Game::Bg2ee));
//! let mut item = ItemResource::blank(ItemVersion::V1, &resolver)?;
//! item.add_ability()?;
//!
//! let effect = resolver.build_record(&[0u8; 0x30], candlekeep_effect::EffectVersion::V1)?;
//! item.add_effect(EffectOwner::Ability(0), effect)?;
//! assert_eq!(item.effects_of(EffectOwner::Ability(0))?.len(), 1);
//! # Ok::<(), candlekeep_resource::Error>(())
//! ```

mod eff;
mod error;
mod header;
mod itm;
mod links;
mod provider;

pub use eff::{EffResource, EFF_FILE, EFF_SIZE};
pub use error::{Error, Result};
pub use header::SignatureHeader;
pub use itm::{EffectOwner, ItemResource, ItemVersion, ABILITY, ABILITY_SIZE, ITEM};
pub use links::{check_links, references, Reference};
pub use provider::{DirectoryProvider, MemoryProvider, ResourceProvider};
