//! Synthesized "memory" state for swallow-ability species.
//!
//! Two species carry swallowed creatures the battle schema stores under
//! `MiMs.Lsts`: the beluga whale keeps a single swallowed pet keyed by its
//! fixed ability name, and the abomination keeps up to three independently
//! tracked swallows, each keyed by the swallowed creature's own ability enum.
//! An abomination slot that swallowed a beluga preserves that beluga's own
//! swallow chain as a nested memory.
//!
//! Which builder applies is decided once per creature via [`MemoryKind`]
//! instead of re-probing fields at every call site.

use serde_json::Value;

use crate::battle::schema::{MinionMemory, SwallowedEntry};
use crate::maps::CalculatorMaps;
use crate::read;

/// Pet id of the single-swallow species (beluga whale).
pub const SINGLE_SWALLOW_PET_ID: i64 = 182;
/// Pet ids of the triple-swallow species (abomination variants).
pub const TRIPLE_SWALLOW_PET_IDS: [i64; 2] = [338, 373];
/// Fixed memory-list key the game uses for the single-swallow ability.
pub const SINGLE_SWALLOW_ABILITY_KEY: &str = "WhiteWhaleAbility";

const SINGLE_SWALLOW_FIELDS: [&str; 2] = ["belugaSwallowedPet", "swallowedPet"];
const TRIPLE_SWALLOW_FIELDS: [&str; 3] = [
    "abominationSwallowedPet1",
    "abominationSwallowedPet2",
    "abominationSwallowedPet3",
];
/// Legacy export shape: swallowed pets as a flat list.
const TRIPLE_SWALLOW_LEGACY_FIELD: &str = "abominationSwallowedPets";

/// Memory category of one creature, resolved once from its id and fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryKind {
    None,
    SingleSwallow,
    TripleSwallow,
}

fn has_field(raw_pet: &Value, key: &str) -> bool {
    raw_pet.get(key).is_some_and(|v| !v.is_null())
}

/// Classify a creature by id or by presence of swallow fields (exports from
/// older calculators carry the fields without a resolvable species id).
pub fn classify(raw_pet: &Value, pet_id: i64) -> MemoryKind {
    if pet_id == SINGLE_SWALLOW_PET_ID
        || SINGLE_SWALLOW_FIELDS.iter().any(|f| has_field(raw_pet, f))
    {
        return MemoryKind::SingleSwallow;
    }

    let has_triple_fields = TRIPLE_SWALLOW_FIELDS.iter().any(|f| has_field(raw_pet, f))
        || raw_pet
            .get(TRIPLE_SWALLOW_LEGACY_FIELD)
            .is_some_and(Value::is_array);
    if TRIPLE_SWALLOW_PET_IDS.contains(&pet_id) || has_triple_fields {
        return MemoryKind::TripleSwallow;
    }

    MemoryKind::None
}

/// Build the memory sub-record for a creature, if its kind calls for one.
pub fn build_memory(
    maps: &CalculatorMaps,
    raw_pet: &Value,
    pet_id: i64,
) -> Option<MinionMemory> {
    match classify(raw_pet, pet_id) {
        MemoryKind::None => None,
        MemoryKind::SingleSwallow => build_single_swallow_memory(maps, raw_pet, pet_id),
        MemoryKind::TripleSwallow => build_triple_swallow_memory(maps, raw_pet, pet_id),
    }
}

/// One resolved swallow slot of a triple-swallow creature.
struct SwallowSlot {
    ability_enum: Option<i64>,
    entry: SwallowedEntry,
}

/// Descriptor for one swallowed creature: identifier plus whatever stats the
/// export stated. Returns `None` only when no identifier resolves.
pub(crate) fn build_swallowed_entry(
    maps: &CalculatorMaps,
    swallowed_raw: &Value,
) -> Option<SwallowedEntry> {
    let pet_id = maps.resolve_pet_id_from_unknown(swallowed_raw)?;
    let mut entry = SwallowedEntry::new(pet_id);
    if !swallowed_raw.is_object() {
        return Some(entry);
    }

    entry.attack = read::first_finite(swallowed_raw, &["attack", "At", "at"])
        .map(|v| read::round_at_least(v, 0));
    entry.health = read::first_finite(swallowed_raw, &["health", "Hp", "hp"])
        .map(|v| read::round_at_least(v, 1));
    entry.mana =
        read::first_finite(swallowed_raw, &["mana", "Mana"]).map(|v| read::round_at_least(v, 0));
    entry.level =
        read::first_finite(swallowed_raw, &["level", "lvl", "Lvl"]).map(|v| read::clamp_int(v, 1, 3));
    entry.exp =
        read::first_finite(swallowed_raw, &["exp", "Exp"]).map(|v| read::round_at_least(v, 0));
    entry.perk = maps.resolve_perk_id(swallowed_raw);

    Some(entry)
}

/// The single-swallow memory: every ability enum mapped to the species (plus
/// the fixed ability name) points at an independent copy of the descriptor.
fn build_single_swallow_memory(
    maps: &CalculatorMaps,
    raw_pet: &Value,
    pet_id: i64,
) -> Option<MinionMemory> {
    let swallowed_raw = SINGLE_SWALLOW_FIELDS
        .iter()
        .filter_map(|f| raw_pet.get(*f))
        .find(|v| !v.is_null())?;
    let entry = build_swallowed_entry(maps, swallowed_raw)?;

    let mapped = maps.ability_enums_for_pet(pet_id);
    let enums = if mapped.is_empty() {
        primary_ability_enum(maps, raw_pet, pet_id).map(|e| vec![e])?
    } else {
        mapped
    };

    let mut memory = MinionMemory::default();
    memory
        .lists
        .insert(SINGLE_SWALLOW_ABILITY_KEY.to_string(), vec![entry.clone()]);
    for ability_enum in &enums {
        memory
            .lists
            .insert(ability_enum.to_string(), vec![entry.clone()]);
    }

    log::debug!(
        "single-swallow memory: pet_id={pet_id} ability_enums={enums:?} swallowed={}",
        entry.pet_enum
    );

    Some(memory)
}

fn single_swallow_chain(maps: &CalculatorMaps, chain_raw: &Value) -> Option<MinionMemory> {
    let chain_entry = build_swallowed_entry(maps, chain_raw)?;
    let mut memory = MinionMemory::default();
    memory.lists.insert(
        SINGLE_SWALLOW_ABILITY_KEY.to_string(),
        vec![chain_entry.clone()],
    );
    for ability_enum in maps.ability_enums_for_pet(SINGLE_SWALLOW_PET_ID) {
        memory
            .lists
            .insert(ability_enum.to_string(), vec![chain_entry.clone()]);
    }
    Some(memory)
}

/// Resolve the up-to-three named swallow slots (falling back to the legacy
/// flat-list shape when none are present).
fn collect_swallow_slots(maps: &CalculatorMaps, raw_pet: &Value) -> Vec<SwallowSlot> {
    let mut slots = Vec::new();

    for field in TRIPLE_SWALLOW_FIELDS {
        let Some(swallowed_raw) = raw_pet.get(field).filter(|v| !v.is_null()) else {
            continue;
        };
        let Some(swallowed_id) = maps.resolve_pet_id_from_unknown(swallowed_raw) else {
            continue;
        };

        let ability_enum = maps.ability_enums_for_pet(swallowed_id).first().copied();
        let mut entry = build_swallowed_entry(maps, swallowed_raw)
            .unwrap_or_else(|| SwallowedEntry::new(swallowed_id));

        // Each slot carries its own level override field.
        if let Some(level) = raw_pet.get(format!("{field}Level")).and_then(read::as_finite) {
            entry.level = Some(read::clamp_int(level, 1, 3));
        }

        // A swallowed beluga keeps its own swallow chain as nested memory.
        if swallowed_id == SINGLE_SWALLOW_PET_ID {
            let chain_raw = raw_pet
                .get(format!("{field}BelugaSwallowedPet"))
                .filter(|v| !v.is_null())
                .or_else(|| {
                    swallowed_raw
                        .get("belugaSwallowedPet")
                        .filter(|v| !v.is_null())
                });
            if let Some(chain_raw) = chain_raw {
                entry.memory = single_swallow_chain(maps, chain_raw);
            }
        }

        slots.push(SwallowSlot {
            ability_enum,
            entry,
        });
    }

    if !slots.is_empty() {
        return slots;
    }

    let legacy = raw_pet
        .get(TRIPLE_SWALLOW_LEGACY_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for swallowed_raw in legacy {
        let Some(swallowed_id) = maps.resolve_pet_id_from_unknown(swallowed_raw) else {
            continue;
        };
        slots.push(SwallowSlot {
            ability_enum: maps.ability_enums_for_pet(swallowed_id).first().copied(),
            entry: build_swallowed_entry(maps, swallowed_raw)
                .unwrap_or_else(|| SwallowedEntry::new(swallowed_id)),
        });
    }

    slots
}

/// Ability enums inferred from what a triple-swallow creature actually
/// swallowed. Overrides the species' generic ability list when non-empty so
/// the in-game trigger matches the swallowed creatures.
pub fn infer_swallowed_ability_enums(maps: &CalculatorMaps, raw_pet: &Value) -> Vec<i64> {
    read::unique_ints(
        collect_swallow_slots(maps, raw_pet)
            .iter()
            .filter_map(|slot| slot.ability_enum),
    )
}

/// The ability enum used to key a creature's memory: an explicit field on
/// the export, then swallow inference (triple-swallow species only), then
/// the species' first mapped ability.
pub fn primary_ability_enum(
    maps: &CalculatorMaps,
    raw_pet: &Value,
    pet_id: i64,
) -> Option<i64> {
    let direct = read::first_finite(raw_pet, &["abilityEnum", "abilityId"]).or_else(|| {
        ["Abil", "abilities"].iter().find_map(|key| {
            raw_pet
                .get(*key)
                .and_then(|a| a.get(0))
                .and_then(|entry| entry.get("Enu"))
                .and_then(read::as_finite)
        })
    });
    if let Some(value) = direct {
        return Some(value.trunc() as i64);
    }

    if TRIPLE_SWALLOW_PET_IDS.contains(&pet_id) {
        if let Some(inferred) = infer_swallowed_ability_enums(maps, raw_pet).first() {
            log::debug!(
                "inferred ability enum {inferred} for pet_id={pet_id} from swallowed pets"
            );
            return Some(*inferred);
        }
    }

    maps.ability_enums_for_pet(pet_id).first().copied()
}

/// The triple-swallow memory: slots grouped under each swallowed creature's
/// ability enum, falling back to the host's primary ability when inference
/// fails for a slot.
fn build_triple_swallow_memory(
    maps: &CalculatorMaps,
    raw_pet: &Value,
    pet_id: i64,
) -> Option<MinionMemory> {
    let slots = collect_swallow_slots(maps, raw_pet);
    if slots.is_empty() {
        return None;
    }

    let fallback_enum = primary_ability_enum(maps, raw_pet, pet_id);
    let mut memory = MinionMemory::default();
    for slot in slots {
        let Some(key_enum) = slot.ability_enum.or(fallback_enum) else {
            continue;
        };
        memory
            .lists
            .entry(key_enum.to_string())
            .or_default()
            .push(slot.entry);
    }

    if memory.lists.is_empty() {
        None
    } else {
        Some(memory)
    }
}
