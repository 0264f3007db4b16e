//! Resource categories.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The type of a game resource, identified by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceCategory {
    /// Area.
    Are,
    /// Animation (BAM).
    Bam,
    /// Compiled script.
    Bcs,
    /// Creature.
    Cre,
    /// Dialog.
    Dlg,
    /// Effect.
    Eff,
    /// Item.
    Itm,
    /// Projectile.
    Pro,
    /// Spell.
    Spl,
    /// Store.
    Sto,
    /// Sound.
    Wav,
    /// Video.
    Mve,
    /// Visual effect.
    Vvc,
    /// Identifier table.
    Ids,
    /// 2D array table.
    TwoDa,
    /// Palette bitmap.
    Bmp,
    /// Text.
    Tlk,
}

impl ResourceCategory {
    /// All known categories.
    pub const ALL: [ResourceCategory; 17] = [
        ResourceCategory::Are,
        ResourceCategory::Bam,
        ResourceCategory::Bcs,
        ResourceCategory::Cre,
        ResourceCategory::Dlg,
        ResourceCategory::Eff,
        ResourceCategory::Itm,
        ResourceCategory::Pro,
        ResourceCategory::Spl,
        ResourceCategory::Sto,
        ResourceCategory::Wav,
        ResourceCategory::Mve,
        ResourceCategory::Vvc,
        ResourceCategory::Ids,
        ResourceCategory::TwoDa,
        ResourceCategory::Bmp,
        ResourceCategory::Tlk,
    ];

    /// The file extension for this category (upper case, without dot).
    pub const fn extension(&self) -> &'static str {
        match self {
            ResourceCategory::Are => "ARE",
            ResourceCategory::Bam => "BAM",
            ResourceCategory::Bcs => "BCS",
            ResourceCategory::Cre => "CRE",
            ResourceCategory::Dlg => "DLG",
            ResourceCategory::Eff => "EFF",
            ResourceCategory::Itm => "ITM",
            ResourceCategory::Pro => "PRO",
            ResourceCategory::Spl => "SPL",
            ResourceCategory::Sto => "STO",
            ResourceCategory::Wav => "WAV",
            ResourceCategory::Mve => "MVE",
            ResourceCategory::Vvc => "VVC",
            ResourceCategory::Ids => "IDS",
            ResourceCategory::TwoDa => "2DA",
            ResourceCategory::Bmp => "BMP",
            ResourceCategory::Tlk => "TLK",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ResourceCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|c| c.extension().eq_ignore_ascii_case(ext))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}
