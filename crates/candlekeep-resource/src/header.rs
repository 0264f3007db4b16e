//! Signature and version prefix shared by Infinity Engine files.

use candlekeep_common::{text, BinaryReader, ResourceCategory};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// The 8-byte prefix of a resource file: a 4-byte signature followed by a
/// 4-byte version, both space padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SignatureHeader {
    pub signature: [u8; 4],
    pub version: [u8; 4],
}

impl SignatureHeader {
    /// Size in bytes.
    pub const SIZE: usize = 8;

    pub const fn new(signature: [u8; 4], version: [u8; 4]) -> Self {
        Self { signature, version }
    }

    /// Read the prefix at the reader's position.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(reader.read_struct::<Self>()?)
    }

    /// Fail unless the signature matches.
    pub fn expect_signature(&self, signature: &[u8; 4]) -> Result<()> {
        if &self.signature != signature {
            return Err(Error::InvalidSignature {
                expected: text::decode(signature),
                actual: text::decode(&self.signature),
            });
        }
        Ok(())
    }

    /// Fail unless the version is one of `versions`; returns its position.
    pub fn expect_version(&self, category: ResourceCategory, versions: &[[u8; 4]]) -> Result<usize> {
        versions
            .iter()
            .position(|v| *v == self.version)
            .ok_or_else(|| Error::UnsupportedVersion {
                category,
                version: text::decode(&self.version),
            })
    }
}
