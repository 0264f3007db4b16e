//! Planescape: Torment.

use candlekeep_common::ResourceCategory;
use candlekeep_struct::Labels;

use crate::schema::{Lookup, Schema, Slot};

pub(super) fn lookup(l: &Lookup<'_>) -> Option<Schema> {
    if let Some(schema) = super::baldur::lookup(l) {
        return Some(schema);
    }
    let schema = match l.opcode {
        186 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Status",
                Labels::indexed(&["Unused", "Stoneskin", "Iron fist", "Eye of the mind"]),
            ),
        ),
        187 | 188 | 189 | 190 | 191 | 201 => Schema::new(
            Slot::Split(vec![
                (1, Slot::Unsigned("Unused")),
                (1, Slot::Unsigned("Red")),
                (1, Slot::Unsigned("Green")),
                (1, Slot::Unsigned("Blue")),
            ]),
            Slot::Enum(
                "Play where?",
                Labels::indexed(&["Over target", "At target point", "Over caster"]),
            ),
        )
        .resource(ResourceCategory::Bam),
        192 => Schema::new(
            Slot::Signed("Amount"),
            Slot::Enum(
                "Direction",
                Labels::indexed(&[
                    "Source to target",
                    "Target to source",
                    "Swap",
                    "Caster to target",
                    "Target to caster",
                ]),
            ),
        ),
        193 => Schema::value("Strength"),
        194 | 195 => Schema::new(
            Slot::Split(vec![
                (1, Slot::Unsigned("Red")),
                (1, Slot::Unsigned("Green")),
                (1, Slot::Unsigned("Blue")),
                (1, Slot::Unsigned("Unused")),
            ]),
            Slot::Enum(
                "Method",
                Labels::indexed(&[
                    "Quick to color, quick from color",
                    "Quick to color, slow from color",
                    "Slow to color, quick from color",
                    "Slow to color, slow from color",
                ]),
            ),
        ),
        196 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Effect",
                Labels::indexed(&["Adder's kiss", "Ball lightning", "Fizzlers"]),
            ),
        ),
        202 | 209 => Schema::value("Range"),
        203 | 204 | 205 | 206 | 207 | 208 => Schema::unused(),
        _ => return None,
    };
    Some(schema)
}
