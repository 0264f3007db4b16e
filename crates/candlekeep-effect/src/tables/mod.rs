//! Opcode tables.
//!
//! Resolution tries the shared table first and then the table of the
//! context's engine family. Each table answers `None` for opcodes it does
//! not know, which leaves the caller to fall back.

mod baldur;
mod baldur2;
mod icewind;
mod icewind2;
mod shared;
mod torment;

use candlekeep_struct::Labels;

use crate::context::EngineFamily;
use crate::schema::{Lookup, Schema};

pub(crate) use shared::lookup as shared;

/// The engine-specific table for the lookup's context.
pub(crate) fn engine(l: &Lookup<'_>) -> Option<Schema> {
    match l.engine() {
        EngineFamily::Bg1 => baldur::lookup(l),
        EngineFamily::Bg2 => baldur2::lookup(l),
        EngineFamily::Torment => torment::lookup(l),
        EngineFamily::IceWind => icewind::lookup(l),
        EngineFamily::IceWind2 => icewind2::lookup(l),
    }
}

fn set_or_increment() -> Labels {
    Labels::indexed(&["Set", "Increment"])
}

fn spell_classes() -> Labels {
    Labels::indexed(&["Wizard", "Priest", "Innate"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::context::{Context, Game};
    use crate::EffectVersion;

    fn names(game: Game, opcode: u32) -> Option<(String, String)> {
        let context = Context::new(game);
        let catalog = Catalog::for_context(&context);
        let data = [0u8; 0x30];
        let l = Lookup::new(opcode, EffectVersion::V1, &context, &catalog, &data, 0);
        shared(&l).or_else(|| engine(&l)).map(|schema| {
            (
                schema.param1.name().unwrap_or_default().to_string(),
                schema.param2.name().unwrap_or_default().to_string(),
            )
        })
    }

    #[test]
    fn test_engine_tables_disagree_on_high_opcodes() {
        assert_eq!(
            names(Game::Bg2, 187),
            Some(("Value".to_string(), "Unused".to_string()))
        );
        assert_eq!(
            names(Game::Pst, 192),
            Some(("Amount".to_string(), "Direction".to_string()))
        );
        assert_eq!(names(Game::Bg1, 187), None);
    }

    #[test]
    fn test_icewind_shares_classic_range() {
        assert_eq!(names(Game::Iwd, 202), names(Game::Bg2, 202));
        assert_eq!(names(Game::Iwd2, 202), names(Game::Bg2, 202));
        assert_ne!(names(Game::Iwd, 233), names(Game::Bg2, 233));
    }
}
