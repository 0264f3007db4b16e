//! Icewind Dale II.

use candlekeep_common::ResourceCategory;
use candlekeep_struct::Labels;

use super::set_or_increment;
use crate::schema::{Lookup, Schema, Slot};

pub(super) fn lookup(l: &Lookup<'_>) -> Option<Schema> {
    super::baldur::lookup(l)
        .or_else(|| super::baldur2::classic(l))
        .or_else(|| super::icewind::winter(l))
        .or_else(|| own(l))
}

fn own(l: &Lookup<'_>) -> Option<Schema> {
    let schema = match l.opcode {
        288 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "State",
                Labels::indexed(&[
                    "Berserk",
                    "Hopelessness",
                    "Protection from evil",
                    "Armor of faith",
                    "Nausea",
                    "Enfeeblement",
                    "Fire shield",
                    "Death ward",
                ]),
            ),
        ),
        289 | 291 | 292 | 293 | 295 | 400 | 401 | 403 | 404 | 405 | 406 | 407 | 408 | 409
        | 412 | 414 | 415 | 416 | 418 | 419 | 420 | 421 | 422 | 423 | 424 | 425 | 426 | 427
        | 428 | 431 | 432 | 433 | 435 | 437 | 438 | 439 | 440 | 444 | 445 | 446 | 447 | 448
        | 449 | 450 => Schema::unused(),
        290 => Schema::value("String"),
        294 => Schema::value("Amount"),
        296 => Schema::new(Slot::Signed("Value"), Slot::Enum("Type", set_or_increment()))
            .resource_text("Variable"),
        402 | 417 | 429 | 430 | 434 => Schema::unused().resource(ResourceCategory::Spl),
        410 | 411 => Schema::value("# creatures").resource(ResourceCategory::Cre),
        413 => Schema::value("Effect"),
        436 | 443 => Schema::new(
            Slot::Unsigned("Amount"),
            Slot::Unsigned("Enchantment"),
        ),
        441 => l.stat(),
        _ => return None,
    };
    Some(schema)
}
