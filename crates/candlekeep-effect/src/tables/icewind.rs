//! Icewind Dale, Heart of Winter and Trials of the Luremaster.

use candlekeep_common::ResourceCategory;
use candlekeep_struct::Labels;

use crate::schema::{Lookup, Schema, Slot};

pub(super) fn lookup(l: &Lookup<'_>) -> Option<Schema> {
    super::baldur::lookup(l)
        .or_else(|| super::baldur2::classic(l))
        .or_else(|| winter(l))
}

/// Opcodes 232-287, which Icewind Dale II inherits.
pub(super) fn winter(l: &Lookup<'_>) -> Option<Schema> {
    let c = l.catalog;
    let schema = match l.opcode {
        232 => Schema::new(
            Slot::Split(vec![
                (1, Slot::Unsigned("Unused")),
                (1, Slot::Unsigned("Red")),
                (1, Slot::Unsigned("Green")),
                (1, Slot::Unsigned("Blue")),
            ]),
            Slot::Split(vec![
                (2, Slot::Unsigned("Unused")),
                (2, Slot::Unsigned("Fade speed")),
            ]),
        ),
        233 => Schema::value("Effect"),
        234 | 235 | 236 | 237 | 239 | 241 | 244 | 245 | 249 | 250 | 255 | 256 | 257 | 260
        | 267 | 268 | 269 | 270 | 271 | 272 | 273 | 274 | 275 | 277 | 278 | 279 | 281 | 282
        | 284 | 285 | 286 | 287 => Schema::unused(),
        238 | 266 => l.stat(),
        240 | 246 | 259 => Schema::value("# creatures").resource(ResourceCategory::Cre),
        242 => Schema::value("Overlay"),
        243 | 248 => Schema::unused().resource(ResourceCategory::Cre),
        247 | 251 | 252 => Schema::new(Slot::Signed("Amount"), Slot::Unsigned("Unused")),
        253 => Schema::new(
            Slot::Signed("AC value"),
            Slot::Enum(
                "Weapon type",
                Labels::indexed(&["All weapons", "Blunt", "Missile", "Piercing", "Slashing"]),
            ),
        ),
        254 | 258 | 261 => Schema::unused().resource(ResourceCategory::Spl),
        262 => Schema::value("# images"),
        263 | 265 => Schema::value("Amount"),
        264 => Schema::value("# hits").resource(ResourceCategory::Spl),
        276 => Schema::new(Slot::Unsigned("Unused"), l.labels("Effect", &c.opcodes)),
        280 => Schema::value("Level"),
        283 => Schema::value("String"),
        _ => return None,
    };
    Some(schema)
}
