//! One side's full board state.

use rand::Rng;
use serde_json::Value;

use crate::battle::minion::build_minion;
use crate::battle::schema::{
    AbilityEntry, BoardRecord, MinionRecord, Point, ShopBonus, SlotGrid, SlotId, StatBlock,
};
use crate::battle::warnings::Warnings;
use crate::extract::SideState;
use crate::maps::{self, CalculatorMaps};
use crate::read;

pub const BOARD_SLOTS: usize = 5;
pub const RELIC_SLOTS: usize = 2;

/// Slot unique-ids observed in live payloads: minions count from 100, the toy
/// relic sits at 900.
const MINION_UNIQUE_ID_BASE: i64 = 100;
const RELIC_UNIQUE_ID: i64 = 900;

/// Board-level fallbacks for absent calculator fields. These are guesses at
/// reasonable mid-game values, not documented semantics; they live here as
/// one revisable block rather than scattered literals.
#[derive(Debug, Clone)]
pub struct BoardDefaults {
    pub turn: i64,
    pub gold_spent: i64,
    pub roll_amount: i64,
    pub pack_name: String,
}

impl Default for BoardDefaults {
    fn default() -> Self {
        Self {
            turn: 12,
            gold_spent: 10,
            roll_amount: 1,
            pack_name: "Turtle".to_string(),
        }
    }
}

/// Per-board build options derived from one side of the calculator state.
#[derive(Debug, Clone, Default)]
pub struct BoardOptions {
    /// The calculator renders slot 1 on the right, battle payloads store it
    /// on the left. Both sides are read reversed; getting this wrong mirrors
    /// the team in-game.
    pub reverse_input_order: bool,
    pub turn: Option<f64>,
    pub display_label: String,
}

/// Toy uses-left default, matching the observed payload pattern L1=2, L2=1.
fn toy_uses_left(raw_toy: &Value, toy_level: i64) -> i64 {
    if let Some(direct) = read::first_finite(raw_toy, &["cou", "Cou", "usesLeft", "charges"]) {
        return read::round_at_least(direct, 0);
    }
    (3 - toy_level).max(1)
}

/// Toy permanent health default, following the observed progression L1=3, L2=7.
fn toy_health_perm(raw_toy: &Value, toy_level: i64) -> i64 {
    let direct = read::first_finite(raw_toy, &["hp", "health"]).or_else(|| {
        raw_toy
            .get("Hp")
            .and_then(|hp| hp.get("Perm"))
            .and_then(read::as_finite)
    });
    if let Some(direct) = direct {
        return read::round_at_least(direct, 1);
    }
    (3 + (toy_level - 1) * 4).max(1)
}

/// Build the two relic slots. Live payloads model relics with the minion
/// object shape and keep the toy in the second slot; the first stays empty.
fn build_relic_items(
    calculator_maps: &CalculatorMaps,
    board_id: &str,
    side: &SideState,
    warnings: &mut Warnings,
) -> Vec<Option<MinionRecord>> {
    let raw_toy = side.toy.as_ref().unwrap_or(&Value::Null);
    let Some(toy_id) = calculator_maps.resolve_toy_id(raw_toy) else {
        if let Some(toy_name) = maps::toy_name(raw_toy) {
            if !toy_name.trim().is_empty() {
                warnings.unknown_toys.push(toy_name.to_string());
            }
        }
        return vec![None, None];
    };

    let toy_level = read::clamp_int(side.toy_level.unwrap_or(1.0), 1, 3);
    let ability_enum = calculator_maps.resolve_toy_ability_enum(raw_toy, toy_id);

    let relic = MinionRecord {
        owner: 1,
        pet_enum: toy_id,
        location: 4,
        position: Point { x: 1, y: 0 },
        exp: 0,
        level: toy_level,
        health: StatBlock {
            perm: toy_health_perm(raw_toy, toy_level),
            temp: 0,
            max: None,
        },
        attack: StatBlock {
            perm: 1000,
            temp: 0,
            max: Some(1000),
        },
        mana: 0,
        uses_left: Some(toy_uses_left(raw_toy, toy_level)),
        co_br: None,
        la_pp: None,
        perk: None,
        perk_bought: false,
        perk_duration: None,
        perk_dm: None,
        perk_multiplier: None,
        perk_drain: 0,
        abilities: vec![AbilityEntry::new(ability_enum, toy_level, 0)],
        abilities_disabled: false,
        cosmetic: calculator_maps.cosmetic_id(),
        dead: false,
        destroyed: false,
        destroyed_by: None,
        link: None,
        power: None,
        se_v: None,
        rewards: 0,
        rewarded: false,
        memory: None,
        sp_me: None,
        tri: None,
        attack_count: 0,
        hurt_count: 0,
        spells_cast_this_turn: 0,
        ol_ts: None,
        id: SlotId {
            board_id: board_id.to_string(),
            unique: RELIC_UNIQUE_ID,
        },
        priority: 3,
        frozen: false,
        was_frozen: false,
        auto_frozen: false,
        last_targets_this_turn: None,
    };

    vec![None, Some(relic)]
}

/// Assemble one board. Returns the record plus the warnings its builders
/// accumulated; the caller merges them across boards.
pub fn build_board(
    calculator_maps: &CalculatorMaps,
    defaults: &BoardDefaults,
    board_id: &str,
    side: &SideState,
    options: &BoardOptions,
) -> (BoardRecord, Warnings) {
    let mut warnings = Warnings::default();

    let turn = read::round_at_least(options.turn.unwrap_or(defaults.turn as f64), 1);
    let gold_spent =
        read::round_at_least(side.gold_spent.unwrap_or(defaults.gold_spent as f64), 0);
    let rolled = read::round_at_least(side.roll_amount.unwrap_or(defaults.roll_amount as f64), 0);
    let summoned = read::round_at_least(side.summoned_amount.unwrap_or(0.0), 0);
    let level3_sold = read::round_at_least(side.level3_sold.unwrap_or(0.0), 0);
    let transformations =
        read::round_at_least(side.transformation_amount.unwrap_or(0.0), 0);

    // Exactly 5 output slots regardless of input length; missing inputs are
    // empty slots.
    let mut items: Vec<Option<MinionRecord>> = Vec::with_capacity(BOARD_SLOTS);
    for i in 0..BOARD_SLOTS {
        let source_index = if options.reverse_input_order {
            BOARD_SLOTS - 1 - i
        } else {
            i
        };
        let raw_pet = side.pets.get(source_index).unwrap_or(&Value::Null);
        items.push(build_minion(
            calculator_maps,
            raw_pet,
            i as i64,
            board_id,
            MINION_UNIQUE_ID_BASE + i as i64,
            &mut warnings,
        ));
    }

    let relic_items = build_relic_items(calculator_maps, board_id, side, &mut warnings);
    debug_assert_eq!(relic_items.len(), RELIC_SLOTS);

    let present_enums: Vec<i64> = items
        .iter()
        .flatten()
        .map(|minion| minion.pet_enum)
        .collect();

    let pack_name = side.pack.as_deref().unwrap_or(&defaults.pack_name);
    if !pack_name.is_empty() && !calculator_maps.has_pack_mapping(pack_name) {
        warnings.missing_pack_map.push(pack_name.to_string());
    }
    let pack_id = calculator_maps.resolve_pack_id(pack_name);

    let board = BoardRecord {
        s_pow: None,
        id: board_id.to_string(),
        unc: 300 + present_enums.len() as i64,
        sta: 4,
        is_ba: None,
        lives_max: 6,
        losses: 0,
        lpm: 4,
        l_ca: None,
        lo_ps: 5,
        victories: 0,
        victories_max: None,
        rec: None,
        turn,
        gold: 0,
        future_gold: None,
        gold_spent,
        free_rolls: 0,
        future_rolls: None,
        rolled,
        transformations_this_turn: transformations,
        ti_mi: None,
        tier: 6,
        board_cap: 99,
        minions: SlotGrid {
            size: Point {
                x: BOARD_SLOTS as i64,
                y: 1,
            },
            items: Some(items),
        },
        minion_shop_count: 5,
        minion_shop_bonus: vec![ShopBonus {
            attack: 1,
            health: 1,
            tier: None,
            minion: None,
        }],
        minion_shop: Vec::new(),
        spell_shop_count: 2,
        spell_shop: Vec::new(),
        adjective: options.display_label.clone(),
        noun: "Replay".to_string(),
        trumpets: 0,
        previous_outcome: 1,
        present_enums,
        pr_es: Vec::new(),
        minions_placed: 0,
        minions_summoned: summoned,
        level3_sold,
        spells_played: Vec::new(),
        sp_co: None,
        mode: 0,
        cosmetic: calculator_maps.cosmetic_id(),
        co_ma: None,
        background: calculator_maps.background_id(),
        mascot: calculator_maps.mascot_id(),
        entrance: 0,
        award: None,
        pack: pack_id,
        packs: false,
        taunt: None,
        deck: None,
        relics: SlotGrid {
            size: Point {
                x: RELIC_SLOTS as i64,
                y: 1,
            },
            items: Some(relic_items),
        },
        bulletins: SlotGrid {
            size: Point { x: 0, y: 0 },
            items: None,
        },
        choices: None,
        future_choices: None,
        hash: rand::thread_rng().gen_range(0..0x7fff_ffff),
        difficulty: 0,
        sh_re: None,
        cloned: false,
        gold_gained: 0,
        pr_es2: Vec::new(),
        wacky: None,
        wm_ps: None,
        wm_pb: false,
    };

    (board, warnings)
}
