//! Baldur's Gate II, its expansion, the Enhanced Editions, TobEx and EEex.

use candlekeep_common::ResourceCategory;
use candlekeep_struct::Labels;

use super::{set_or_increment, spell_classes};
use crate::context::Feature;
use crate::schema::{ids_targets, Lookup, Schema, Slot};

pub(super) fn lookup(l: &Lookup<'_>) -> Option<Schema> {
    if l.enhanced() {
        if l.has(Feature::EeEx) {
            if let Some(schema) = eeex(l) {
                return Some(schema);
            }
        }
        if let Some(schema) = enhanced(l) {
            return Some(schema);
        }
    } else if l.has(Feature::TobEx) {
        if let Some(schema) = tobex(l) {
            return Some(schema);
        }
    }
    super::baldur::lookup(l)
        .or_else(|| classic(l))
        .or_else(|| throne(l))
}

/// Opcodes 186-231, which the Icewind Dale engines share.
pub(super) fn classic(l: &Lookup<'_>) -> Option<Schema> {
    let c = l.catalog;
    let schema = match l.opcode {
        186 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Orientation",
                Labels::indexed(&[
                    "South", "SSW", "SW", "WSW", "West", "WNW", "NW", "NNW", "North", "NNE",
                    "NE", "ENE", "East", "ESE", "SE", "SSE",
                ]),
            ),
        )
        .resource(ResourceCategory::Are),
        187 => Schema::value("Value").resource_text("Variable"),
        188 | 189 | 190 => Schema::value("Value"),
        191 => Schema::new(
            Slot::Unsigned("Level"),
            Slot::Enum("Spell class", spell_classes()),
        ),
        192 => Schema::unused().resource(ResourceCategory::Cre),
        193 | 194 | 195 | 196 | 197 | 209 | 210 | 211 | 212 | 213 | 217 | 224 | 225
        | 231 => Schema::unused(),
        198 => Schema::new(Slot::Unsigned("Unused"), l.labels("Effect", &c.opcodes)),
        199 => Schema::value("Spell level"),
        200 | 201 => Schema::new(
            Slot::Unsigned("# levels"),
            Slot::Unsigned("Spell level"),
        ),
        202 | 204 => Schema::new(Slot::Unsigned("Unused"), l.labels("School", &c.schools)),
        203 | 205 => Schema::new(
            Slot::Unsigned("Unused"),
            l.labels("Secondary type", &c.secondary_types),
        ),
        206 | 207 => Schema::unused().resource(ResourceCategory::Spl),
        208 => Schema::value("HP amount"),
        214 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Source", Labels::indexed(&["2DA file", "Innate list"])),
        )
        .resource_text("2DA file"),
        215 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Play where?",
                Labels::indexed(&[
                    "Over target (unattached)",
                    "Over target (attached)",
                    "At target point",
                ]),
            ),
        )
        .resource(ResourceCategory::Vvc),
        216 => Schema::value("# levels"),
        218 => Schema::value("# skins"),
        219 => l.ids_target(),
        220 | 229 => Schema::new(
            Slot::Unsigned("Maximum level"),
            l.labels("School", &c.schools),
        ),
        221 | 230 => Schema::new(
            Slot::Unsigned("Maximum level"),
            l.labels("Secondary type", &c.secondary_types),
        ),
        222 => Schema::value("Maximum range"),
        223 | 227 => Schema::new(Slot::Unsigned("# levels"), l.labels("School", &c.schools)),
        226 | 228 => Schema::new(
            Slot::Unsigned("# levels"),
            l.labels("Secondary type", &c.secondary_types),
        ),
        _ => return None,
    };
    Some(schema)
}

/// Opcodes 232-318.
fn throne(l: &Lookup<'_>) -> Option<Schema> {
    let schema = match l.opcode {
        232 => Schema::new(
            Slot::Enum(
                "Target",
                Labels::indexed(&["Myself", "LastHitter", "NearestEnemyOf", "Anyone"]),
            ),
            Slot::Enum(
                "Condition",
                Labels::indexed(&[
                    "HitBy([ANYONE])",
                    "See(NearestEnemyOf())",
                    "HPPercentLT(Myself, 50)",
                    "HPPercentLT(Myself, 25)",
                    "HPPercentLT(Myself, 10)",
                    "StateCheck(Myself, STATE_HELPLESS)",
                    "StateCheck(Myself, STATE_POISONED)",
                    "AttackedBy([ANYONE])",
                    "PersonalSpaceDistance([ANYONE], 4)",
                    "PersonalSpaceDistance([ANYONE], 10)",
                    "Every round",
                    "TookDamage()",
                ]),
            ),
        )
        .resource(ResourceCategory::Spl),
        233 => Schema::new(
            Slot::Unsigned("# stars"),
            Slot::Enum(
                "Proficiency",
                Labels::sparse(&[
                    (89, "Bastard sword"),
                    (90, "Long sword"),
                    (91, "Short sword"),
                    (92, "Axe"),
                    (93, "Two-handed sword"),
                    (94, "Katana"),
                    (95, "Scimitar"),
                    (96, "Dagger"),
                    (97, "War hammer"),
                    (98, "Spear"),
                    (99, "Halberd"),
                    (100, "Flail"),
                    (101, "Mace"),
                    (102, "Quarterstaff"),
                    (103, "Crossbow"),
                    (104, "Long bow"),
                    (105, "Short bow"),
                    (106, "Dart"),
                    (107, "Sling"),
                ]),
            ),
        ),
        234 | 239 | 242 | 243 | 244 | 245 | 246 | 247 | 250 | 268 | 270 | 271 | 274 | 287
        | 291 | 292 | 293 | 294 | 295 | 297 | 298 | 299 | 300 | 302 | 303 | 304 | 307 | 308
        | 310 | 312 | 316 | 317 => Schema::unused(),
        235 => Schema::new(
            Slot::Unsigned("Amount"),
            Slot::Enum("Direction", Labels::indexed(&["Away from source", "Toward source"])),
        ),
        236 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Image type",
                Labels::indexed(&["Unused", "Mislead", "Project image", "Simulacrum"]),
            ),
        ),
        237 => Schema::value("Puppet master"),
        238 | 241 => l.ids_target(),
        240 => Schema::value("Icon"),
        248 | 249 | 283 => Schema::unused().resource(ResourceCategory::Eff),
        251 | 252 | 266 => Schema::unused().resource(ResourceCategory::Spl),
        253 | 254 | 267 => Schema::value("String"),
        255 => Schema::value("# items").resource(ResourceCategory::Itm),
        256 | 257 | 258 | 260 => Schema::value("# spells"),
        259 => Schema::new(Slot::Unsigned("# spells"), Slot::Unsigned("Spell level")),
        261 => Schema::new(
            Slot::Unsigned("Spell level"),
            Slot::Enum("Spell class", spell_classes()),
        ),
        262 | 263 | 275 | 276 | 277 | 278 | 281 | 284 | 285 | 286 | 288 | 289 | 301 | 305
        | 306 => l.stat(),
        264 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Drop", Labels::indexed(&["Inventory", "Only weapons"])),
        ),
        265 | 309 => Schema::new(Slot::Signed("Value"), Slot::Enum("Type", set_or_increment()))
            .resource_text("Variable"),
        269 => Schema::value("Strength"),
        272 => Schema::new(
            Slot::Unsigned("Interval"),
            Slot::Enum(
                "Frequency",
                Labels::indexed(&[
                    "Once per second",
                    "Once per second",
                    "Once per second",
                    "Param3 per second",
                    "Once per param3 seconds",
                ]),
            ),
        )
        .resource(ResourceCategory::Eff),
        273 => Schema::unused().resource_text("Area"),
        279 => Schema::value("Button"),
        280 => Schema::value("Surge roll"),
        282 => Schema::new(
            Slot::Unsigned("Value"),
            Slot::Enum(
                "State",
                Labels::indexed(&[
                    "Wing buffet",
                    "Death ward",
                    "Level drain",
                    "Invisible",
                    "Set state",
                    "Shielded",
                ]),
            ),
        ),
        290 => Schema::new(
            Slot::Unsigned("String"),
            Slot::Enum("Title type", Labels::indexed(&["Class", "Rank"])),
        ),
        296 => Schema::unused().resource(ResourceCategory::Vvc),
        311 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum("Mode", Labels::indexed(&["Wish", "Limited wish"])),
        ),
        313 => Schema::unused().resource(ResourceCategory::Spl),
        314 => Schema::value("# skins"),
        315 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Mode",
                Labels::indexed(&["Vanish", "Move into background", "Remove"]),
            ),
        ),
        318 => Schema::unused().resource(ResourceCategory::Spl),
        _ => return None,
    };
    Some(schema)
}

/// TobEx reuses 318 and adds 319-320.
fn tobex(l: &Lookup<'_>) -> Option<Schema> {
    let schema = match l.opcode {
        318 | 320 => set_stat(l),
        319 => l.ids_target().resource(ResourceCategory::Itm),
        _ => return None,
    };
    Some(schema)
}

fn set_stat(l: &Lookup<'_>) -> Schema {
    Schema::new(
        Slot::Signed("Value"),
        Slot::Split(vec![
            (2, l.labels("Modifier type", &l.catalog.modifier_types)),
            (2, Slot::Unsigned("Stat")),
        ]),
    )
}

/// Enhanced Edition overrides and 319-347.
fn enhanced(l: &Lookup<'_>) -> Option<Schema> {
    let c = l.catalog;
    let schema = match l.opcode {
        318 | 324 => l.ids_target().resource(ResourceCategory::Spl),
        319 => match l.param2() {
            10 => Schema::new(
                Slot::Unsigned("Actor's name"),
                Slot::Enum("IDS target", ids_targets(true)),
            )
            .resource(ResourceCategory::Itm),
            11 => Schema::new(
                Slot::Unsigned("Unused"),
                Slot::Enum("IDS target", ids_targets(true)),
            )
            .resource_text("Script name"),
            _ => l.ids_target().resource(ResourceCategory::Itm),
        }
        .special(Slot::Unsigned("Description")),
        320 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Weather",
                Labels::indexed(&["Normal", "Rain", "Snow", "Nothing"]),
            ),
        ),
        321 | 335 | 340 | 341 => Schema::unused().resource(ResourceCategory::Spl),
        322 | 329 | 343 => Schema::unused(),
        323 | 325 => l.stat(),
        326 => l.ids_target().resource(ResourceCategory::Spl),
        327 => Schema::value("Effect"),
        328 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Unsigned("State"),
        )
        .special(Slot::Enum(
            "Mode",
            Labels::indexed(&["Use SPLSTATE.IDS", "Use STATE.IDS"]),
        )),
        330 => Schema::new(
            Slot::Unsigned("String"),
            Slot::Enum(
                "Display type",
                Labels::indexed(&["Overhead", "Overhead (no log)", "Log only"]),
            ),
        ),
        331 => Schema::value("# creatures").resource_text("2DA file"),
        332 => Schema::new(
            Slot::Signed("Value"),
            Slot::Enum(
                "Damage type",
                Labels::indexed(&[
                    "Crushing", "Acid", "Cold", "Electricity", "Fire", "Piercing", "Poison",
                    "Magic", "Missile", "Slashing", "Magic fire", "Magic cold", "Stunning",
                ]),
            ),
        ),
        333 => Schema::value("# hits").resource(ResourceCategory::Spl),
        334 => Schema::value("Level"),
        336 => Schema::unused().resource(ResourceCategory::Vvc),
        337 => Schema::new(l.labels("Opcode", &c.opcodes), Slot::Signed("Match parameter 2")),
        338 => Schema::value("String"),
        339 => Schema::value("Projectile"),
        342 => Schema::new(
            Slot::Unsigned("Value"),
            Slot::Enum(
                "Field",
                Labels::indexed(&["Unselectable", "Body heat", "Blood color", "Personal space"]),
            ),
        ),
        344 => l.ids_target(),
        345 => Schema::value("Enchantment"),
        346 => Schema::new(Slot::Signed("Value"), l.labels("School", &c.schools)),
        347 => Schema::unused().resource_text("Area"),
        _ => return None,
    };
    Some(schema)
}

/// EEex adds 400-409 to the Enhanced Editions.
fn eeex(l: &Lookup<'_>) -> Option<Schema> {
    let schema = match l.opcode {
        400 => Schema::new(
            Slot::Unsigned("Unused"),
            Slot::Enum(
                "Script level",
                Labels::indexed(&[
                    "Override", "Area", "Specifics", "Class", "Race", "General", "Default",
                ]),
            ),
        )
        .resource(ResourceCategory::Bcs),
        401 => Schema::new(
            Slot::Signed("Value"),
            Slot::Enum("Modifier type", Labels::indexed(&["Increment", "Set", "Percentage"])),
        )
        .special(Slot::Unsigned("Extended stat")),
        402 | 403 => Schema::unused().resource_text("Lua function"),
        404 => Schema::new(
            Slot::Unsigned("Button type"),
            Slot::Unsigned("Unused"),
        )
        .resource_text("Lua function"),
        405 => Schema::new(
            Slot::Unsigned("Button index"),
            Slot::Unsigned("Unused"),
        )
        .resource_text("Lua function"),
        406 => Schema::unused().resource_text("Lua function"),
        407 => Schema::unused().resource(ResourceCategory::Spl),
        408 => Schema::unused().resource_text("Mutator table"),
        409 => Schema::value("Action").resource_text("Lua function"),
        _ => return None,
    };
    Some(schema)
}
