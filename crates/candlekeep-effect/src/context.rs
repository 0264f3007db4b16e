//! Engine, game edition and feature flags.

use std::fmt;
use std::str::FromStr;

use candlekeep_struct::SectionShift;

use crate::Error;

/// One of the engine lineages whose effect opcodes diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineFamily {
    /// Baldur's Gate and Tales of the Sword Coast.
    Bg1,
    /// Baldur's Gate II, Throne of Bhaal and every Enhanced Edition.
    Bg2,
    /// Planescape: Torment.
    Torment,
    /// Icewind Dale and its expansions.
    IceWind,
    /// Icewind Dale II.
    IceWind2,
}

/// A released game or expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Game {
    Bg1,
    Tutu,
    Bg2,
    Tob,
    Pst,
    Iwd,
    IwdHow,
    IwdTotl,
    Iwd2,
    Bgee,
    Sod,
    Bg2ee,
    Iwdee,
    Pstee,
    Eet,
}

impl Game {
    /// Every known edition.
    pub const ALL: [Game; 15] = [
        Game::Bg1,
        Game::Tutu,
        Game::Bg2,
        Game::Tob,
        Game::Pst,
        Game::Iwd,
        Game::IwdHow,
        Game::IwdTotl,
        Game::Iwd2,
        Game::Bgee,
        Game::Sod,
        Game::Bg2ee,
        Game::Iwdee,
        Game::Pstee,
        Game::Eet,
    ];

    /// The engine lineage the edition's opcodes follow.
    pub const fn engine(&self) -> EngineFamily {
        match self {
            Game::Bg1 | Game::Tutu => EngineFamily::Bg1,
            Game::Bg2
            | Game::Tob
            | Game::Bgee
            | Game::Sod
            | Game::Bg2ee
            | Game::Iwdee
            | Game::Pstee
            | Game::Eet => EngineFamily::Bg2,
            Game::Pst => EngineFamily::Torment,
            Game::Iwd | Game::IwdHow | Game::IwdTotl => EngineFamily::IceWind,
            Game::Iwd2 => EngineFamily::IceWind2,
        }
    }

    /// Whether this is one of the Enhanced Editions.
    pub const fn is_enhanced(&self) -> bool {
        matches!(
            self,
            Game::Bgee | Game::Sod | Game::Bg2ee | Game::Iwdee | Game::Pstee | Game::Eet
        )
    }

    /// How section offsets at an insertion point react to growth.
    ///
    /// Icewind Dale II moves a section even when a record of its own kind
    /// is inserted at its start.
    pub const fn section_shift(&self) -> SectionShift {
        match self {
            Game::Iwd2 => SectionShift::AlwaysShift,
            _ => SectionShift::ExemptOwnSection,
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub const fn id(&self) -> &'static str {
        match self {
            Game::Bg1 => "bg1",
            Game::Tutu => "tutu",
            Game::Bg2 => "bg2",
            Game::Tob => "tob",
            Game::Pst => "pst",
            Game::Iwd => "iwd",
            Game::IwdHow => "iwdhow",
            Game::IwdTotl => "iwdtotl",
            Game::Iwd2 => "iwd2",
            Game::Bgee => "bgee",
            Game::Sod => "sod",
            Game::Bg2ee => "bg2ee",
            Game::Iwdee => "iwdee",
            Game::Pstee => "pstee",
            Game::Eet => "eet",
        }
    }

    /// Human-readable title.
    pub const fn title(&self) -> &'static str {
        match self {
            Game::Bg1 => "Baldur's Gate",
            Game::Tutu => "Baldur's Gate: Tales of the Sword Coast",
            Game::Bg2 => "Baldur's Gate II: Shadows of Amn",
            Game::Tob => "Baldur's Gate II: Throne of Bhaal",
            Game::Pst => "Planescape: Torment",
            Game::Iwd => "Icewind Dale",
            Game::IwdHow => "Icewind Dale: Heart of Winter",
            Game::IwdTotl => "Icewind Dale: Trials of the Luremaster",
            Game::Iwd2 => "Icewind Dale II",
            Game::Bgee => "Baldur's Gate: Enhanced Edition",
            Game::Sod => "Baldur's Gate: Siege of Dragonspear",
            Game::Bg2ee => "Baldur's Gate II: Enhanced Edition",
            Game::Iwdee => "Icewind Dale: Enhanced Edition",
            Game::Pstee => "Planescape: Torment: Enhanced Edition",
            Game::Eet => "Enhanced Edition Trilogy",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Game {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Game::ALL
            .into_iter()
            .find(|g| g.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownGame(s.to_string()))
    }
}

/// Optional engine extensions that change opcode semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feature {
    /// TobEx, the Throne of Bhaal engine extender.
    TobEx,
    /// EEex, the Enhanced Edition engine extender.
    EeEx,
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tobex" => Ok(Feature::TobEx),
            "eeex" => Ok(Feature::EeEx),
            _ => Err(Error::UnknownFeature(s.to_string())),
        }
    }
}

/// Source of the engine/game/feature facts the resolver branches on.
pub trait ContextProvider {
    /// The current game edition.
    fn game(&self) -> Game;

    /// Whether an engine extension is active.
    fn has_feature(&self, feature: Feature) -> bool;

    /// The engine lineage.
    fn engine(&self) -> EngineFamily {
        self.game().engine()
    }

    /// Whether the game is an Enhanced Edition.
    fn is_enhanced(&self) -> bool {
        self.game().is_enhanced()
    }
}

/// A fixed game edition and feature set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
    game: Game,
    #[cfg_attr(feature = "serde", serde(default))]
    features: Vec<Feature>,
}

impl Context {
    /// Context for a game with no extensions.
    pub fn new(game: Game) -> Self {
        Self {
            game,
            features: Vec::new(),
        }
    }

    /// Enable an engine extension.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        if !self.features.contains(&feature) {
            self.features.push(feature);
        }
        self
    }

    /// Copy the facts of any provider.
    pub fn from_provider(provider: &impl ContextProvider) -> Self {
        let mut context = Self::new(provider.game());
        for feature in [Feature::TobEx, Feature::EeEx] {
            if provider.has_feature(feature) {
                context.features.push(feature);
            }
        }
        context
    }

    /// Enabled extensions.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl ContextProvider for Context {
    fn game(&self) -> Game {
        self.game
    }

    fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_of_editions() {
        assert_eq!(Game::Bg2ee.engine(), EngineFamily::Bg2);
        assert_eq!(Game::Pstee.engine(), EngineFamily::Bg2);
        assert_eq!(Game::Pst.engine(), EngineFamily::Torment);
        assert_eq!(Game::IwdTotl.engine(), EngineFamily::IceWind);
        assert!(Game::Iwdee.is_enhanced());
        assert!(!Game::Tob.is_enhanced());
    }

    #[test]
    fn test_section_shift_policy() {
        assert_eq!(Game::Iwd2.section_shift(), SectionShift::AlwaysShift);
        assert_eq!(Game::Iwd.section_shift(), SectionShift::ExemptOwnSection);
        assert_eq!(Game::Bg2ee.section_shift(), SectionShift::ExemptOwnSection);
    }

    #[test]
    fn test_parse_game() {
        assert_eq!("BG2EE".parse::<Game>().unwrap(), Game::Bg2ee);
        assert!("bg3".parse::<Game>().is_err());
        assert_eq!("TobEx".parse::<Feature>().unwrap(), Feature::TobEx);
    }

    #[test]
    fn test_context_features() {
        let context = Context::new(Game::Tob).with_feature(Feature::TobEx);
        assert!(context.has_feature(Feature::TobEx));
        assert!(!context.has_feature(Feature::EeEx));
        assert_eq!(Context::from_provider(&context), context);
    }
}
