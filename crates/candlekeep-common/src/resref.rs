//! Resource reference type - the 8-byte resource name.
//!
//! Every cross-resource reference in an Infinity Engine file is stored as a
//! fixed 8-byte slot holding an ASCII name without extension, padded with NUL
//! bytes. Names are case-insensitive as far as the engine is concerned, but
//! the raw bytes are kept verbatim so that files round-trip exactly.

use std::fmt;
use std::str::FromStr;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{text, Error};

/// Size of a resource reference slot in bytes.
pub const RESREF_SIZE: usize = 8;

/// An 8-byte resource name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ResRef {
    bytes: [u8; RESREF_SIZE],
}

impl ResRef {
    /// Empty reference (all zeros).
    pub const EMPTY: Self = Self {
        bytes: [0; RESREF_SIZE],
    };

    /// Create a reference from raw slot bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; RESREF_SIZE]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes of the slot.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; RESREF_SIZE] {
        &self.bytes
    }

    /// Check if the slot is empty (first byte is NUL).
    ///
    /// The engine treats a leading NUL as "no resource" regardless of what
    /// follows, and so do we.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes[0] == 0
    }

    /// The name as stored, up to the first NUL.
    pub fn name(&self) -> String {
        text::decode(&self.bytes)
    }

    /// The name normalized to upper case, suitable as a lookup key.
    pub fn key(&self) -> String {
        self.name().to_ascii_uppercase()
    }

    /// Case-insensitive comparison, as the engine performs it.
    pub fn eq_ignore_case(&self, other: &ResRef) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Debug for ResRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResRef({:?})", self.name())
    }
}

impl fmt::Display for ResRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ResRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > RESREF_SIZE || !s.is_ascii() || s.contains('\0') {
            return Err(Error::InvalidResRef(s.to_string()));
        }

        let mut bytes = [0u8; RESREF_SIZE];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Ok(Self { bytes })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ResRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
