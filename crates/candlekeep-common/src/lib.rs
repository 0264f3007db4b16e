//! Common utilities for Candlekeep.
//!
//! This crate provides foundational types used across all Candlekeep crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`ResRef`] - The 8-byte resource name used by Infinity Engine files
//! - [`ResourceCategory`] - Resource type tags (`ITM`, `SPL`, `EFF`, ...)
//! - [`text`] - Fixed-width, NUL-padded text helpers

mod category;
mod error;
mod reader;
mod resref;

pub mod text;

pub use category::ResourceCategory;
pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use resref::ResRef;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
