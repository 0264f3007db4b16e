//! Baldur's Gate and Tales of the Sword Coast.
//!
//! The low opcodes below vary slightly between engines, so they live here and
//! the later engines delegate to this table before their own ranges.

use candlekeep_struct::Labels;

use crate::schema::{Lookup, Schema, Slot};

pub(super) fn lookup(l: &Lookup<'_>) -> Option<Schema> {
    let schema = match l.opcode {
        23 => l.stat(),
        26 | 48 | 56 => Schema::unused(),
        41 => Schema::new(
            Slot::Enum(
                "Color",
                Labels::indexed(&[
                    "Custom", "Black", "Blue", "Chromatic", "Gold", "Green", "Purple", "Red",
                    "White", "Ice", "Stone", "Magenta", "Orange",
                ]),
            ),
            Slot::Enum(
                "Particle effect",
                Labels::indexed(&["Custom", "Explosion", "Swirl", "Shower"]),
            ),
        ),
        61 => Schema::new(
            Slot::Split(vec![
                (1, Slot::Unsigned("Unused")),
                (1, Slot::Unsigned("Red")),
                (1, Slot::Unsigned("Green")),
                (1, Slot::Unsigned("Blue")),
            ]),
            Slot::Split(vec![
                (2, Slot::Unsigned("Location")),
                (2, Slot::Unsigned("Fade speed")),
            ]),
        ),
        _ => return None,
    };
    Some(schema)
}
