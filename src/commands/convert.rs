//! Convert command implementation.

use std::path::PathBuf;

use crate::battle::{self, board::BoardDefaults};
use crate::cli::InputArgs;
use crate::decode;
use crate::Result;

use super::{emit_json, load_maps, read_export};

/// Parameters for the convert command.
#[derive(Debug)]
pub struct ConvertParams {
    pub input: InputArgs,
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub turn: Option<i64>,
    pub gold_spent: Option<i64>,
    pub roll_amount: Option<i64>,
    pub pack: Option<String>,
}

/// Fold the CLI fallback overrides over the stock board defaults.
pub(crate) fn board_defaults(params: &ConvertParams) -> BoardDefaults {
    let mut defaults = BoardDefaults::default();
    if let Some(turn) = params.turn {
        defaults.turn = turn.max(1);
    }
    if let Some(gold_spent) = params.gold_spent {
        defaults.gold_spent = gold_spent.max(0);
    }
    if let Some(roll_amount) = params.roll_amount {
        defaults.roll_amount = roll_amount.max(0);
    }
    if let Some(pack) = &params.pack {
        defaults.pack_name = pack.clone();
    }
    defaults
}

/// Handle the convert command.
pub fn handle_convert(params: ConvertParams) -> Result<()> {
    let maps = load_maps(params.input.maps.as_ref())?;
    let export = read_export(&params.input)?;

    if !decode::looks_like_export(&export) {
        eprintln!("Warning: input does not look like a calculator export; trying anyway");
    }

    let conversion = battle::convert_with_defaults(&maps, &board_defaults(&params), &export)?;

    eprintln!(
        "Converted: {} player / {} opponent pets",
        conversion.team_sizes.player, conversion.team_sizes.opponent
    );
    if !conversion.warnings.is_empty() {
        eprintln!("Warning: {}", conversion.warnings.summary());
    }

    emit_json(&conversion.battle, params.output.as_deref(), params.pretty)
}
