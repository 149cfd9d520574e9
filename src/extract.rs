//! Extraction of a normalized [`CalculatorState`] from a decoded export tree.
//!
//! Different calculator versions wrap the team data at different depths, so
//! a fixed candidate list is probed in priority order: the tree itself, then
//! `state`, `calculatorState`, `calculator`, `payload`, `data`, `formGroup`.
//! The first candidate carrying a `playerPets` or `opponentPets` array wins.

use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::read;

#[cfg(test)]
mod tests;

/// Nested property names a calculator state may hide under, in priority order.
const CANDIDATE_KEYS: &[&str] = &[
    "state",
    "calculatorState",
    "calculator",
    "payload",
    "data",
    "formGroup",
];

/// One side's raw inputs: pets plus the per-side scalars the board needs.
#[derive(Debug, Clone, Default)]
pub struct SideState {
    /// Raw pet objects, in calculator order. Read-only to the builders.
    pub pets: Vec<Value>,
    pub pack: Option<String>,
    pub toy: Option<Value>,
    pub toy_level: Option<f64>,
    pub gold_spent: Option<f64>,
    pub roll_amount: Option<f64>,
    pub summoned_amount: Option<f64>,
    pub level3_sold: Option<f64>,
    pub transformation_amount: Option<f64>,
    pub display_name: Option<String>,
}

/// The normalized calculator export. Parsed once per conversion, never
/// mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    pub player: SideState,
    pub opponent: SideState,
    pub turn: Option<f64>,
}

fn looks_like_state(value: &Value) -> bool {
    value
        .as_object()
        .map(|obj| {
            obj.get("playerPets").is_some_and(Value::is_array)
                || obj.get("opponentPets").is_some_and(Value::is_array)
        })
        .unwrap_or(false)
}

fn find_candidate(expanded: &Value) -> Option<&Value> {
    if looks_like_state(expanded) {
        return Some(expanded);
    }
    CANDIDATE_KEYS
        .iter()
        .filter_map(|key| expanded.get(key))
        .find(|candidate| looks_like_state(candidate))
}

fn pet_array(state: &Value, key: &str) -> Vec<Value> {
    state
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.to_vec())
        .unwrap_or_default()
}

fn string_field(state: &Value, key: &str) -> Option<String> {
    state
        .get(key)
        .and_then(read::as_trimmed_str)
        .map(str::to_string)
}

fn side_state(state: &Value, prefix: &str, pets_key: &str) -> SideState {
    let field = |suffix: &str| format!("{prefix}{suffix}");
    SideState {
        pets: pet_array(state, pets_key),
        pack: string_field(state, &field("Pack")),
        toy: state.get(field("Toy")).filter(|v| !v.is_null()).cloned(),
        toy_level: state.get(field("ToyLevel")).and_then(read::as_finite),
        gold_spent: state.get(field("GoldSpent")).and_then(read::as_finite),
        roll_amount: state.get(field("RollAmount")).and_then(read::as_finite),
        summoned_amount: state
            .get(field("SummonedAmount"))
            .and_then(read::as_finite),
        level3_sold: state.get(field("Level3Sold")).and_then(read::as_finite),
        transformation_amount: state
            .get(field("TransformationAmount"))
            .and_then(read::as_finite),
        display_name: string_field(state, &field("Name")),
    }
}

/// Extract the calculator state from an already key-expanded tree.
pub fn extract_state(expanded: &Value) -> Result<CalculatorState> {
    let state = find_candidate(expanded).ok_or(ConvertError::MissingTeams)?;

    log::debug!(
        "extracted calculator state: player_pets={} opponent_pets={}",
        state
            .get("playerPets")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        state
            .get("opponentPets")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
    );

    Ok(CalculatorState {
        player: side_state(state, "player", "playerPets"),
        opponent: side_state(state, "opponent", "opponentPets"),
        turn: state.get("turn").and_then(read::as_finite),
    })
}
