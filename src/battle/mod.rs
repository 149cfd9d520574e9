//! Battle-record synthesis: the translation engine's top level.
//!
//! [`convert`] is the full pipeline: decode the export text, expand keys,
//! extract the calculator state, then assemble two boards into a battle
//! record the game client can replay. Identity fields (battle/participant
//! ids, seed, hashes, timestamps) are freshly randomized per call — they are
//! deliberately not derived from the input.

pub mod board;
pub mod memory;
pub mod minion;
pub mod schema;
pub mod warnings;

#[cfg(test)]
mod tests;

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::decode;
use crate::error::Result;
use crate::extract::{self, CalculatorState};
use crate::keys;
use crate::maps::CalculatorMaps;

use board::{build_board, BoardDefaults, BoardOptions};
use schema::{BattleRecord, Participant};
use warnings::Warnings;

/// Outcome code for "player won" — the only outcome a synthesized replay uses.
const OUTCOME_PLAYER_WON: i64 = 1;

const DEFAULT_PLAYER_NAME: &str = "Calculator Player";
const DEFAULT_OPPONENT_NAME: &str = "Calculator Opponent";

/// Non-empty creature counts per side.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TeamSizes {
    pub player: usize,
    pub opponent: usize,
}

/// A successful conversion: the battle record plus everything the caller
/// reports back to the user.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub battle: BattleRecord,
    #[serde(rename = "teamSizes")]
    pub team_sizes: TeamSizes,
    pub warnings: Warnings,
}

fn filled_slots(record: &BattleRecord, opponent: bool) -> usize {
    let board = if opponent {
        &record.opponent_board
    } else {
        &record.user_board
    };
    board
        .minions
        .items
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .flatten()
        .count()
}

/// Assemble a battle record from an extracted calculator state.
pub fn build_battle(
    maps: &CalculatorMaps,
    defaults: &BoardDefaults,
    state: &CalculatorState,
) -> Conversion {
    let user_board_id = Uuid::new_v4().to_string();
    let opponent_board_id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut rng = rand::thread_rng();

    let (user_board, user_warnings) = build_board(
        maps,
        defaults,
        &user_board_id,
        &state.player,
        &BoardOptions {
            reverse_input_order: true,
            turn: state.turn,
            display_label: "Calculator".to_string(),
        },
    );
    let (opponent_board, opponent_warnings) = build_board(
        maps,
        defaults,
        &opponent_board_id,
        &state.opponent,
        &BoardOptions {
            reverse_input_order: true,
            turn: state.turn,
            display_label: "Opponent".to_string(),
        },
    );

    let mut warnings = user_warnings;
    warnings.merge(opponent_warnings);

    let battle = BattleRecord {
        id: Uuid::new_v4().to_string(),
        seed: rng.gen::<i32>(),
        outcome: OUTCOME_PLAYER_WON,
        resolved_on: now.clone(),
        watched_on: now,
        user: Participant {
            id: Uuid::new_v4().to_string(),
            display_name: state
                .player
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
        },
        user_board,
        opponent: Participant {
            id: Uuid::new_v4().to_string(),
            display_name: state
                .opponent
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_OPPONENT_NAME.to_string()),
        },
        opponent_board,
        end_result: rng.gen_range(0..0x7fff_ffff),
    };

    let team_sizes = TeamSizes {
        player: filled_slots(&battle, false),
        opponent: filled_slots(&battle, true),
    };

    Conversion {
        battle,
        team_sizes,
        warnings: warnings.deduplicated(),
    }
}

/// The engine entry point: raw export text in, battle record out.
///
/// Fails on decode/extract problems; per-entity resolution failures are
/// soft and land in [`Conversion::warnings`].
pub fn convert(maps: &CalculatorMaps, raw_export: &str) -> Result<Conversion> {
    convert_with_defaults(maps, &BoardDefaults::default(), raw_export)
}

/// [`convert`] with caller-supplied board defaults.
pub fn convert_with_defaults(
    maps: &CalculatorMaps,
    defaults: &BoardDefaults,
    raw_export: &str,
) -> Result<Conversion> {
    let parsed = decode::parse_export(raw_export)?;
    let expanded = keys::expand(&parsed);
    let state = extract::extract_state(&expanded)?;
    Ok(build_battle(maps, defaults, &state))
}
