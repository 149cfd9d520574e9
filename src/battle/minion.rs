//! Per-creature record synthesis.

use serde_json::Value;

use crate::battle::memory::{self, SINGLE_SWALLOW_PET_ID, TRIPLE_SWALLOW_PET_IDS};
use crate::battle::schema::{
    AbilityEntry, MinionRecord, Point, PowerState, SlotId, StatBlock,
};
use crate::battle::warnings::Warnings;
use crate::maps::{self, CalculatorMaps};
use crate::read;

/// Experience thresholds per level: {0, 2, 5} for levels {1, 2, 3}.
const EXP_PER_LEVEL: [i64; 3] = [0, 2, 5];

/// Level from an explicit field, otherwise derived from experience.
pub fn level_from_pet(raw_pet: &Value) -> i64 {
    if let Some(level) = raw_pet.get("level").and_then(read::as_finite) {
        return read::clamp_int(level, 1, 3);
    }

    let exp = raw_pet
        .get("exp")
        .and_then(read::as_finite)
        .unwrap_or(0.0);
    if exp >= 5.0 {
        3
    } else if exp >= 2.0 {
        2
    } else {
        1
    }
}

/// Experience from an explicit field, otherwise the level threshold.
pub fn exp_from_pet(raw_pet: &Value, level: i64) -> i64 {
    if let Some(exp) = raw_pet.get("exp").and_then(read::as_finite) {
        return read::round_at_least(exp, 0);
    }
    EXP_PER_LEVEL[level.clamp(1, 3) as usize - 1]
}

fn key_matches_triggers_consumed(key: &str) -> bool {
    let normalized = key.to_ascii_lowercase();
    let has_trigger = normalized.contains("trigger") || normalized.contains("trig");
    let has_consumed = normalized.contains("consum");
    let is_abbrev = ["trgc", "trgcn", "trc", "trcn", "trco"].contains(&normalized.as_str());
    (has_trigger && has_consumed) || is_abbrev
}

fn first_finite_by_key_predicate(source: &Value, predicate: fn(&str) -> bool) -> Option<f64> {
    let obj = source.as_object()?;
    obj.iter()
        .filter(|(key, _)| predicate(key))
        .find_map(|(_, value)| read::as_finite(value))
}

/// Trigger-consumption counter, scavenged from the many places different
/// export shapes put it: direct aliases, any trigger/consumed-looking key on
/// the pet or its power object, or the maximum across its ability entries.
pub fn triggers_consumed_from_pet(raw_pet: &Value) -> Option<i64> {
    if let Some(direct) = read::first_finite(
        raw_pet,
        &["triggersConsumed", "TrCo", "trco", "triggerConsumed"],
    ) {
        return Some(read::round_at_least(direct, 0));
    }

    for candidate in [Some(raw_pet), raw_pet.get("pow"), raw_pet.get("Pow")]
        .into_iter()
        .flatten()
    {
        if let Some(value) = first_finite_by_key_predicate(candidate, key_matches_triggers_consumed)
        {
            return Some(read::round_at_least(value, 0));
        }
    }

    let mut from_abilities: Option<f64> = None;
    for key in ["abilities", "Abil"] {
        let Some(entries) = raw_pet.get(key).and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            if let Some(value) =
                first_finite_by_key_predicate(entry, key_matches_triggers_consumed)
            {
                from_abilities = Some(from_abilities.map_or(value, |max: f64| max.max(value)));
            }
        }
    }
    from_abilities.map(|value| read::round_at_least(value, 0))
}

/// Times-damaged counter for the sabertooth power sub-record.
pub fn times_hurt_from_pet(raw_pet: &Value) -> Option<i64> {
    read::first_finite(raw_pet, &["timesHurt", "TimesHurt"])
        .or_else(|| {
            ["Pow", "pow"].iter().find_map(|key| {
                raw_pet
                    .get(*key)
                    .and_then(|p| p.get("SabertoothTigerAbility"))
                    .and_then(read::as_finite)
            })
        })
        .map(|value| read::round_at_least(value, 0))
}

pub fn spell_count_from_pet(raw_pet: &Value) -> i64 {
    read::first_finite(
        raw_pet,
        &["spellCount", "spellsCast", "spellsCastThisTurn", "SpCT"],
    )
    .map(|value| read::round_at_least(value, 0))
    .unwrap_or(0)
}

/// Ability enums for the record's `Abil` list. Swallow species override the
/// species' generic list with what was actually swallowed, so the in-game
/// trigger matches the memory contents.
fn ability_enums_for_minion(
    maps: &CalculatorMaps,
    raw_pet: &Value,
    pet_id: i64,
    has_memory: bool,
) -> Vec<i64> {
    let mapped = maps.ability_enums_for_pet(pet_id);
    let primary = memory::primary_ability_enum(maps, raw_pet, pet_id);

    if TRIPLE_SWALLOW_PET_IDS.contains(&pet_id) {
        let inferred = memory::infer_swallowed_ability_enums(maps, raw_pet);
        if !inferred.is_empty() {
            return inferred;
        }
        if has_memory {
            if let Some(primary) = primary {
                return vec![primary];
            }
        }
        return mapped;
    }

    if has_memory && pet_id != SINGLE_SWALLOW_PET_ID {
        if let Some(primary) = primary {
            return vec![primary];
        }
    }

    if pet_id == SINGLE_SWALLOW_PET_ID && mapped.is_empty() {
        if let Some(primary) = primary {
            return vec![primary];
        }
    }

    mapped
}

/// Build one creature record, or `None` for an empty/unresolvable slot.
///
/// A missing name is an empty slot (no warning); an unresolvable name drops
/// the slot and records it under `unknown_pets`.
pub fn build_minion(
    calculator_maps: &CalculatorMaps,
    raw_pet: &Value,
    position: i64,
    board_id: &str,
    unique_id: i64,
    warnings: &mut Warnings,
) -> Option<MinionRecord> {
    let name = raw_pet.get("name").and_then(read::as_trimmed_str)?;

    let Some(pet_id) = calculator_maps.resolve_pet_id(raw_pet) else {
        warnings.unknown_pets.push(name.to_string());
        return None;
    };

    let level = level_from_pet(raw_pet);
    let exp = exp_from_pet(raw_pet, level);
    let attack = read::round_at_least(read::first_finite_or(raw_pet, &["attack"], 1.0), 0);
    let health = read::round_at_least(read::first_finite_or(raw_pet, &["health"], 1.0), 1);
    let mana = read::round_at_least(read::first_finite_or(raw_pet, &["mana"], 0.0), 0);

    let perk_id = calculator_maps.resolve_perk_id(raw_pet);
    if let Some(perk_name) = maps::equipment_name(raw_pet) {
        if perk_id.is_none() && !perk_name.trim().is_empty() {
            warnings.missing_perk_map.push(perk_name.to_string());
        }
    }

    let minion_memory = memory::build_memory(calculator_maps, raw_pet, pet_id);
    let ability_enums =
        ability_enums_for_minion(calculator_maps, raw_pet, pet_id, minion_memory.is_some());
    if ability_enums.is_empty() {
        warnings.missing_ability_map.push(name.to_string());
    }

    let triggers_consumed = triggers_consumed_from_pet(raw_pet).unwrap_or(0);
    let power = times_hurt_from_pet(raw_pet).map(|times_hurt| PowerState { times_hurt });
    let spell_count = spell_count_from_pet(raw_pet);

    log::debug!(
        "built minion: name={name} pet_id={pet_id} level={level} kind={:?} abilities={ability_enums:?}",
        memory::classify(raw_pet, pet_id)
    );

    Some(MinionRecord {
        owner: 1,
        pet_enum: pet_id,
        location: 1,
        position: Point { x: position, y: 0 },
        exp,
        level,
        health: StatBlock {
            perm: health,
            temp: 0,
            max: None,
        },
        attack: StatBlock {
            perm: attack,
            temp: 0,
            max: None,
        },
        mana,
        uses_left: None,
        co_br: None,
        la_pp: None,
        perk: perk_id,
        perk_bought: false,
        perk_duration: None,
        perk_dm: None,
        perk_multiplier: None,
        perk_drain: 0,
        abilities: ability_enums
            .iter()
            .map(|ability_enum| AbilityEntry::new(*ability_enum, level, triggers_consumed))
            .collect(),
        abilities_disabled: false,
        cosmetic: calculator_maps.cosmetic_id(),
        dead: false,
        destroyed: false,
        destroyed_by: None,
        link: None,
        power,
        se_v: None,
        rewards: 0,
        rewarded: false,
        memory: minion_memory,
        sp_me: None,
        tri: None,
        attack_count: 0,
        hurt_count: 0,
        spells_cast_this_turn: spell_count,
        ol_ts: None,
        id: SlotId {
            board_id: board_id.to_string(),
            unique: unique_id,
        },
        priority: 3,
        frozen: false,
        was_frozen: false,
        auto_frozen: false,
        last_targets_this_turn: None,
    })
}
