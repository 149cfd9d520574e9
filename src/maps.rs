//! The static dictionary asset and name-to-id resolvers.
//!
//! `CalculatorMaps` is produced offline by the map-generator script from the
//! replay-bot and replay-editor data dumps and shipped as a JSON asset. All
//! of its keys are pre-normalized (lowercase, alphanumeric-only). Resolution
//! is best-effort: an explicit numeric id field on the input object always
//! wins over name lookup, and toys additionally fall back to a hardcoded
//! table for names the generated dump is missing.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::read;


/// Field aliases accepted as an explicit pet id on an input object.
const PET_ID_ALIASES: &[&str] = &["id", "petId", "enum", "Enu"];
/// Field aliases accepted as an explicit toy id on an input object.
const TOY_ID_ALIASES: &[&str] = &["id", "toyId", "enum", "Enu"];

/// Observed in live battle payloads: toy ability enum is offset by +32.
/// Example: 580 -> 612, 594 -> 626. A heuristic, not a schema rule.
const TOY_ABILITY_ENUM_OFFSET: i64 = 32;

/// Ability ids for pets the generated dictionary is known to miss.
const FALLBACK_ABILITY_IDS_BY_PET_ID: &[(i64, &[i64])] =
    &[(338, &[368]), (373, &[403]), (635, &[669])];

/// Toy ids missing from the generated dump, keyed by normalized name.
const FALLBACK_TOY_IDS_BY_NAME: &[(&str, i64)] = &[
    ("actionfigure", 294),
    ("airpalmtree", 511),
    ("balloon", 479),
    ("boot", 299),
    ("bowlingball", 300),
    ("brokenpiggybank", 310),
    ("broom", 301),
    ("candelabra", 574),
    ("cardboardbox", 302),
    ("chocolatebox", 794),
    ("crumpledpaper", 482),
    ("crystalball", 580),
    ("deckofcards", 303),
    ("dice", 304),
    ("dicecup", 286),
    ("evilbook", 645),
    ("excalibur", 583),
    ("flashlight", 484),
    ("flute", 485),
    ("foamsword", 507),
    ("garlicpress", 509),
    ("glassshoes", 586),
    ("goldenharp", 589),
    ("handkerchief", 306),
    ("holygrail", 592),
    ("kite", 307),
    ("lamp", 506),
    ("lockofhair", 595),
    ("lunchbox", 308),
    ("magiccarpet", 598),
    ("magiclamp", 575),
    ("magicmirror", 578),
    ("magicwand", 581),
    ("melonhelmet", 510),
    ("microwaveoven", 699),
    ("nutcracker", 584),
    ("ocarina", 587),
    ("onesie", 590),
    ("ovenmitts", 311),
    ("pandorasbox", 593),
    ("papershredder", 312),
    ("peanutjar", 512),
    ("pen", 313),
    ("pickaxe", 599),
    ("pillbottle", 284),
    ("plasticsaw", 789),
    ("pogostick", 314),
    ("radio", 488),
    ("redcape", 576),
    ("remotecar", 315),
    ("ring", 582),
    ("ringpyramid", 316),
    ("rockbag", 285),
    ("rosebud", 579),
    ("rubberduck", 318),
    ("scale", 795),
    ("scissors", 319),
    ("soccerball", 486),
    ("stickyhand", 792),
    ("stinkysock", 513),
    ("stuffedbear", 324),
    ("television", 491),
    ("tennisball", 478),
    ("thunderhammer", 585),
    ("tinderbox", 588),
    ("toiletpaper", 326),
    ("toygun", 493),
    ("toymouse", 327),
    ("treasurechest", 591),
    ("treasuremap", 594),
    ("vacuumcleaner", 793),
    ("witchbroom", 600),
];

/// Cosmetic defaults observed in real payloads, overridable by the asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapDefaults {
    #[serde(rename = "backgroundId", default)]
    background_id: Option<i64>,
    #[serde(rename = "mascotId", default)]
    mascot_id: Option<i64>,
    #[serde(rename = "cosmeticId", default)]
    cosmetic_id: Option<i64>,
}

/// The generated dictionary asset. Loaded once at startup, read-only after.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculatorMaps {
    #[serde(rename = "petIdsByName", default)]
    pet_ids_by_name: HashMap<String, i64>,
    #[serde(rename = "perkIdsByName", default)]
    perk_ids_by_name: HashMap<String, i64>,
    #[serde(rename = "toyIdsByName", default)]
    toy_ids_by_name: HashMap<String, i64>,
    #[serde(rename = "abilityIdsByPetId", default)]
    ability_ids_by_pet_id: HashMap<String, Vec<i64>>,
    #[serde(rename = "packIdsByName", default)]
    pack_ids_by_name: HashMap<String, i64>,
    #[serde(default)]
    defaults: MapDefaults,
}

impl CalculatorMaps {
    /// The dictionary bundled into the binary at build time.
    pub fn bundled() -> Result<Self> {
        serde_json::from_str(include_str!("../data/calculator_maps.json")).map_err(|err| {
            ConvertError::MapsLoad {
                path: "data/calculator_maps.json (bundled)".to_string(),
                message: err.to_string(),
            }
        })
    }

    /// Load a dictionary from a user-supplied path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| ConvertError::MapsLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| ConvertError::MapsLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Build a maps value directly from JSON (primarily for tests).
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn background_id(&self) -> i64 {
        self.defaults.background_id.unwrap_or(0)
    }

    pub fn mascot_id(&self) -> i64 {
        self.defaults.mascot_id.unwrap_or(18)
    }

    pub fn cosmetic_id(&self) -> i64 {
        self.defaults.cosmetic_id.unwrap_or(0)
    }

    pub fn pet_id_by_name(&self, name: &str) -> Option<i64> {
        let key = read::normalize_lookup_key(name);
        if key.is_empty() {
            return None;
        }
        self.pet_ids_by_name.get(&key).copied()
    }

    /// Resolve a pet id from a raw pet object: explicit id aliases take
    /// precedence, then name lookup. Pets have no fallback table; an
    /// unresolved name is reported as a warning by the caller.
    pub fn resolve_pet_id(&self, raw_pet: &Value) -> Option<i64> {
        let obj = raw_pet.as_object()?;
        if let Some(id) = PET_ID_ALIASES
            .iter()
            .filter_map(|alias| obj.get(*alias))
            .find_map(read::as_finite)
        {
            return Some(id.trunc() as i64);
        }
        obj.get("name")
            .and_then(Value::as_str)
            .and_then(|name| self.pet_id_by_name(name))
    }

    /// Resolve a pet id from an unknown shape: object, bare id, or bare name.
    /// Swallowed-pet fields arrive in all three forms.
    pub fn resolve_pet_id_from_unknown(&self, value: &Value) -> Option<i64> {
        match value {
            Value::Null => None,
            Value::Object(_) => self.resolve_pet_id(value),
            other => {
                if let Some(id) = read::as_finite(other) {
                    return Some(id.trunc() as i64);
                }
                other.as_str().and_then(|name| self.pet_id_by_name(name))
            }
        }
    }

    /// Ability ids for a pet: generated mapping unioned with the hardcoded
    /// fallback list, de-duplicated preserving first-seen order.
    pub fn ability_enums_for_pet(&self, pet_id: i64) -> Vec<i64> {
        let mapped = self
            .ability_ids_by_pet_id
            .get(&pet_id.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let fallback = FALLBACK_ABILITY_IDS_BY_PET_ID
            .iter()
            .find(|(id, _)| *id == pet_id)
            .map(|(_, ids)| *ids)
            .unwrap_or(&[]);
        read::unique_ints(mapped.iter().chain(fallback).copied())
    }

    /// Perk id for a raw pet's equipment name, if mapped. Perks have no
    /// fallback table.
    pub fn resolve_perk_id(&self, raw_pet: &Value) -> Option<i64> {
        let name = equipment_name(raw_pet)?;
        let key = read::normalize_lookup_key(name);
        if key.is_empty() {
            return None;
        }
        self.perk_ids_by_name.get(&key).copied()
    }

    /// Toy id: explicit id aliases, generated dictionary, hardcoded fallback.
    pub fn resolve_toy_id(&self, raw_toy: &Value) -> Option<i64> {
        if let Some(obj) = raw_toy.as_object() {
            if let Some(id) = TOY_ID_ALIASES
                .iter()
                .filter_map(|alias| obj.get(*alias))
                .find_map(read::as_finite)
            {
                return Some(id.trunc() as i64);
            }
        }

        let key = read::normalize_lookup_key(toy_name(raw_toy)?);
        if key.is_empty() {
            return None;
        }
        if let Some(id) = self.toy_ids_by_name.get(&key) {
            return Some(*id);
        }
        FALLBACK_TOY_IDS_BY_NAME
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, id)| *id)
    }

    /// Toy ability enum: explicit field, otherwise the observed `+32` offset.
    pub fn resolve_toy_ability_enum(&self, raw_toy: &Value, toy_id: i64) -> i64 {
        if let Some(obj) = raw_toy.as_object() {
            let direct = read::first_finite(raw_toy, &["abilityEnum", "abilityId"]).or_else(|| {
                ["Abil", "abilities"].iter().find_map(|key| {
                    obj.get(*key)
                        .and_then(|a| a.get(0))
                        .and_then(|entry| entry.get("Enu"))
                        .and_then(read::as_finite)
                })
            });
            if let Some(value) = direct {
                return value.trunc() as i64;
            }
        }
        toy_id + TOY_ABILITY_ENUM_OFFSET
    }

    pub fn has_pack_mapping(&self, pack_name: &str) -> bool {
        let key = read::normalize_lookup_key(pack_name);
        !key.is_empty() && self.pack_ids_by_name.contains_key(&key)
    }

    /// Pack id, defaulting to 0 when unmapped (the caller records a warning).
    pub fn resolve_pack_id(&self, pack_name: &str) -> i64 {
        let key = read::normalize_lookup_key(pack_name);
        self.pack_ids_by_name.get(&key).copied().unwrap_or(0)
    }
}

/// Equipment name off a raw pet: string form or `{ name: ... }` form.
pub fn equipment_name(raw_pet: &Value) -> Option<&str> {
    let equipment = raw_pet.get("equipment")?;
    match equipment {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str),
        _ => None,
    }
}

/// Toy name: string form or `{ name: ... }` form.
pub fn toy_name(raw_toy: &Value) -> Option<&str> {
    match raw_toy {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str),
        _ => None,
    }
}
