//! Serde models of the upstream battle schema.
//!
//! Field spellings are bit-exact: the game client deserializes this structure
//! directly and there is no schema contract to validate against, so every
//! rename below was reverse-engineered from observed battle payloads. Many
//! fields never vary in replays but must still be present.

use serde::Serialize;
use std::collections::BTreeMap;

/// `{ x, y }` grid coordinate (lowercase keys upstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Permanent/temporary stat pair with an optional cap.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatBlock {
    #[serde(rename = "Perm")]
    pub perm: i64,
    #[serde(rename = "Temp")]
    pub temp: i64,
    #[serde(rename = "Max")]
    pub max: Option<i64>,
}

/// One triggerable ability on a minion or relic.
#[derive(Debug, Clone, Serialize)]
pub struct AbilityEntry {
    #[serde(rename = "Enu")]
    pub ability_enum: i64,
    #[serde(rename = "Lvl")]
    pub level: i64,
    #[serde(rename = "Nat")]
    pub natural: bool,
    #[serde(rename = "Dur")]
    pub duration: i64,
    #[serde(rename = "TrCo")]
    pub triggers_consumed: i64,
    #[serde(rename = "Char")]
    pub charges: Option<i64>,
    #[serde(rename = "Dis")]
    pub disabled: bool,
    #[serde(rename = "AIML")]
    pub aiml: bool,
    #[serde(rename = "IgRe")]
    pub ignore_recall: bool,
    #[serde(rename = "Grop")]
    pub group: i64,
    #[serde(rename = "AcCo")]
    pub activation_count: i64,
    #[serde(rename = "DisT")]
    pub disabled_this_turn: bool,
}

impl AbilityEntry {
    /// Entry with the placeholder fields every observed payload carries.
    pub fn new(ability_enum: i64, level: i64, triggers_consumed: i64) -> Self {
        Self {
            ability_enum,
            level,
            natural: true,
            duration: 0,
            triggers_consumed: triggers_consumed.max(0),
            charges: None,
            disabled: false,
            aiml: false,
            ignore_recall: false,
            group: 0,
            activation_count: 0,
            disabled_this_turn: false,
        }
    }
}

/// Board-scoped slot identity.
#[derive(Debug, Clone, Serialize)]
pub struct SlotId {
    #[serde(rename = "BoId")]
    pub board_id: String,
    #[serde(rename = "Uni")]
    pub unique: i64,
}

/// Ability-keyed memory of swallowed creatures (`MiMs`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct MinionMemory {
    #[serde(rename = "Lsts")]
    pub lists: BTreeMap<String, Vec<SwallowedEntry>>,
}

/// One remembered swallowed creature; optional fields are omitted when the
/// export did not state them.
#[derive(Debug, Clone, Serialize)]
pub struct SwallowedEntry {
    #[serde(rename = "Enu")]
    pub pet_enum: i64,
    #[serde(rename = "At", skip_serializing_if = "Option::is_none")]
    pub attack: Option<i64>,
    #[serde(rename = "Hp", skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    #[serde(rename = "Mana", skip_serializing_if = "Option::is_none")]
    pub mana: Option<i64>,
    #[serde(rename = "Lvl", skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(rename = "Exp", skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(rename = "Perk", skip_serializing_if = "Option::is_none")]
    pub perk: Option<i64>,
    #[serde(rename = "MiMs", skip_serializing_if = "Option::is_none")]
    pub memory: Option<MinionMemory>,
}

impl SwallowedEntry {
    pub fn new(pet_enum: i64) -> Self {
        Self {
            pet_enum,
            attack: None,
            health: None,
            mana: None,
            level: None,
            exp: None,
            perk: None,
            memory: None,
        }
    }
}

/// Species-ability power state. Only the times-damaged counter is ever
/// populated from calculator exports.
#[derive(Debug, Clone, Serialize)]
pub struct PowerState {
    #[serde(rename = "SabertoothTigerAbility")]
    pub times_hurt: i64,
}

/// One creature (or relic: the upstream schema models both with the same
/// object shape, distinguished by `Loc`).
#[derive(Debug, Clone, Serialize)]
pub struct MinionRecord {
    #[serde(rename = "Own")]
    pub owner: i64,
    #[serde(rename = "Enu")]
    pub pet_enum: i64,
    #[serde(rename = "Loc")]
    pub location: i64,
    #[serde(rename = "Poi")]
    pub position: Point,
    #[serde(rename = "Exp")]
    pub exp: i64,
    #[serde(rename = "Lvl")]
    pub level: i64,
    #[serde(rename = "Hp")]
    pub health: StatBlock,
    #[serde(rename = "At")]
    pub attack: StatBlock,
    #[serde(rename = "Mana")]
    pub mana: i64,
    #[serde(rename = "Cou")]
    pub uses_left: Option<i64>,
    #[serde(rename = "CoBr")]
    pub co_br: Option<i64>,
    #[serde(rename = "LaPP")]
    pub la_pp: Option<i64>,
    #[serde(rename = "Perk")]
    pub perk: Option<i64>,
    #[serde(rename = "PeBo")]
    pub perk_bought: bool,
    #[serde(rename = "PeDu")]
    pub perk_duration: Option<i64>,
    #[serde(rename = "PeDM")]
    pub perk_dm: Option<i64>,
    #[serde(rename = "PeMu")]
    pub perk_multiplier: Option<i64>,
    #[serde(rename = "PeDr")]
    pub perk_drain: i64,
    #[serde(rename = "Abil")]
    pub abilities: Vec<AbilityEntry>,
    #[serde(rename = "AbDi")]
    pub abilities_disabled: bool,
    #[serde(rename = "Cosm")]
    pub cosmetic: i64,
    #[serde(rename = "Dead")]
    pub dead: bool,
    #[serde(rename = "Dest")]
    pub destroyed: bool,
    #[serde(rename = "DeBy")]
    pub destroyed_by: Option<i64>,
    #[serde(rename = "Link")]
    pub link: Option<i64>,
    #[serde(rename = "Pow")]
    pub power: Option<PowerState>,
    #[serde(rename = "SeV")]
    pub se_v: Option<i64>,
    #[serde(rename = "Rwds")]
    pub rewards: i64,
    #[serde(rename = "Rwrd")]
    pub rewarded: bool,
    #[serde(rename = "MiMs")]
    pub memory: Option<MinionMemory>,
    #[serde(rename = "SpMe")]
    pub sp_me: Option<i64>,
    #[serde(rename = "Tri")]
    pub tri: Option<i64>,
    #[serde(rename = "AtkC")]
    pub attack_count: i64,
    #[serde(rename = "HrtC")]
    pub hurt_count: i64,
    #[serde(rename = "SpCT")]
    pub spells_cast_this_turn: i64,
    #[serde(rename = "OlTs")]
    pub ol_ts: Option<i64>,
    #[serde(rename = "Id")]
    pub id: SlotId,
    #[serde(rename = "Pri")]
    pub priority: i64,
    #[serde(rename = "Fro")]
    pub frozen: bool,
    #[serde(rename = "WFro")]
    pub was_frozen: bool,
    #[serde(rename = "AFro")]
    pub auto_frozen: bool,
    #[serde(rename = "LastTargetsThisTurn")]
    pub last_targets_this_turn: Option<i64>,
}

/// Sized container of slot items (`Mins`, `Rel`, `Bul`).
#[derive(Debug, Clone, Serialize)]
pub struct SlotGrid {
    #[serde(rename = "Size")]
    pub size: Point,
    #[serde(rename = "Items")]
    pub items: Option<Vec<Option<MinionRecord>>>,
}

/// Shop stat bonus carried on every observed board.
#[derive(Debug, Clone, Serialize)]
pub struct ShopBonus {
    #[serde(rename = "At")]
    pub attack: i64,
    #[serde(rename = "Hp")]
    pub health: i64,
    #[serde(rename = "Ti")]
    pub tier: Option<i64>,
    #[serde(rename = "Mi")]
    pub minion: Option<i64>,
}

/// One side's full board state. Most scalar fields are schema-mandated
/// constants observed from real payloads.
#[derive(Debug, Clone, Serialize)]
pub struct BoardRecord {
    #[serde(rename = "SPow")]
    pub s_pow: Option<i64>,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "UNC")]
    pub unc: i64,
    #[serde(rename = "Sta")]
    pub sta: i64,
    #[serde(rename = "IsBa")]
    pub is_ba: Option<bool>,
    #[serde(rename = "LiMa")]
    pub lives_max: i64,
    #[serde(rename = "Los")]
    pub losses: i64,
    #[serde(rename = "LPM")]
    pub lpm: i64,
    #[serde(rename = "LCa")]
    pub l_ca: Option<i64>,
    #[serde(rename = "LoPs")]
    pub lo_ps: i64,
    #[serde(rename = "Vic")]
    pub victories: i64,
    #[serde(rename = "ViMa")]
    pub victories_max: Option<i64>,
    #[serde(rename = "Rec")]
    pub rec: Option<i64>,
    #[serde(rename = "Tur")]
    pub turn: i64,
    #[serde(rename = "Go")]
    pub gold: i64,
    #[serde(rename = "FuGo")]
    pub future_gold: Option<i64>,
    #[serde(rename = "GoSp")]
    pub gold_spent: i64,
    #[serde(rename = "FrRo")]
    pub free_rolls: i64,
    #[serde(rename = "FuRo")]
    pub future_rolls: Option<i64>,
    #[serde(rename = "Rold")]
    pub rolled: i64,
    #[serde(rename = "TrTT")]
    pub transformations_this_turn: i64,
    #[serde(rename = "TiMi")]
    pub ti_mi: Option<i64>,
    #[serde(rename = "Ti")]
    pub tier: i64,
    #[serde(rename = "BoCa")]
    pub board_cap: i64,
    #[serde(rename = "Mins")]
    pub minions: SlotGrid,
    #[serde(rename = "MiSC")]
    pub minion_shop_count: i64,
    #[serde(rename = "MSBo")]
    pub minion_shop_bonus: Vec<ShopBonus>,
    #[serde(rename = "MiSh")]
    pub minion_shop: Vec<serde_json::Value>,
    #[serde(rename = "SpSC")]
    pub spell_shop_count: i64,
    #[serde(rename = "SpSh")]
    pub spell_shop: Vec<serde_json::Value>,
    #[serde(rename = "Adj")]
    pub adjective: String,
    #[serde(rename = "Nou")]
    pub noun: String,
    #[serde(rename = "Trum")]
    pub trumpets: i64,
    #[serde(rename = "PrOu")]
    pub previous_outcome: i64,
    #[serde(rename = "PrEn")]
    pub present_enums: Vec<i64>,
    #[serde(rename = "PrES")]
    pub pr_es: Vec<serde_json::Value>,
    #[serde(rename = "MiPl")]
    pub minions_placed: i64,
    #[serde(rename = "MiSu")]
    pub minions_summoned: i64,
    #[serde(rename = "MSFL")]
    pub level3_sold: i64,
    #[serde(rename = "SpPl")]
    pub spells_played: Vec<serde_json::Value>,
    #[serde(rename = "SpCo")]
    pub sp_co: Option<i64>,
    #[serde(rename = "Mode")]
    pub mode: i64,
    #[serde(rename = "Cosm")]
    pub cosmetic: i64,
    #[serde(rename = "CoMa")]
    pub co_ma: Option<i64>,
    #[serde(rename = "Back")]
    pub background: i64,
    #[serde(rename = "Masc")]
    pub mascot: i64,
    #[serde(rename = "Entr")]
    pub entrance: i64,
    #[serde(rename = "Awar")]
    pub award: Option<i64>,
    #[serde(rename = "Pack")]
    pub pack: i64,
    #[serde(rename = "Pcks")]
    pub packs: bool,
    #[serde(rename = "Taut")]
    pub taunt: Option<i64>,
    #[serde(rename = "Deck")]
    pub deck: Option<i64>,
    #[serde(rename = "Rel")]
    pub relics: SlotGrid,
    #[serde(rename = "Bul")]
    pub bulletins: SlotGrid,
    #[serde(rename = "Choi")]
    pub choices: Option<i64>,
    #[serde(rename = "FuCh")]
    pub future_choices: Option<i64>,
    #[serde(rename = "Hash")]
    pub hash: i64,
    #[serde(rename = "Diff")]
    pub difficulty: i64,
    #[serde(rename = "ShRe")]
    pub sh_re: Option<i64>,
    #[serde(rename = "Clon")]
    pub cloned: bool,
    #[serde(rename = "GoGa")]
    pub gold_gained: i64,
    #[serde(rename = "PrES2")]
    pub pr_es2: Vec<serde_json::Value>,
    #[serde(rename = "Wacky")]
    pub wacky: Option<i64>,
    #[serde(rename = "WMPs")]
    pub wm_ps: Option<i64>,
    #[serde(rename = "WMPb")]
    pub wm_pb: bool,
}

/// Battle participant stub: id + display name.
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
}

/// Top-level synthesized battle document handed to the replay injector.
#[derive(Debug, Clone, Serialize)]
pub struct BattleRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Seed")]
    pub seed: i32,
    #[serde(rename = "Outcome")]
    pub outcome: i64,
    #[serde(rename = "ResolvedOn")]
    pub resolved_on: String,
    #[serde(rename = "WatchedOn")]
    pub watched_on: String,
    #[serde(rename = "User")]
    pub user: Participant,
    #[serde(rename = "UserBoard")]
    pub user_board: BoardRecord,
    #[serde(rename = "Opponent")]
    pub opponent: Participant,
    #[serde(rename = "OpponentBoard")]
    pub opponent_board: BoardRecord,
    #[serde(rename = "EndResult")]
    pub end_result: i64,
}
