use super::*;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};

fn test_maps() -> CalculatorMaps {
    CalculatorMaps::from_value(json!({
        "petIdsByName": {
            "ant": 1, "bee": 63, "fish": 99, "sloth": 67,
            "belugawhale": 182, "abomination": 373
        },
        "perkIdsByName": { "honey": 231 },
        "toyIdsByName": { "crystalball": 580 },
        "abilityIdsByPetId": { "63": [93], "67": [97], "99": [129], "182": [212] },
        "packIdsByName": { "turtle": 0, "puppy": 1 }
    }))
    .unwrap()
}

fn convert_json(maps: &CalculatorMaps, export: Value) -> Conversion {
    convert(maps, &export.to_string()).unwrap()
}

fn user_items(conversion: &Conversion) -> Vec<Value> {
    let battle = serde_json::to_value(&conversion.battle).unwrap();
    battle["UserBoard"]["Mins"]["Items"]
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn test_single_pet_scenario() {
    let maps = test_maps();
    let conversion = convert_json(&maps, json!({ "p": [{ "n": "Ant", "a": 2, "h": 2 }], "o": [] }));

    let items = user_items(&conversion);
    assert_eq!(items.len(), 5);
    // Input order is reversed: the first calculator slot lands at index 4.
    for item in &items[..4] {
        assert!(item.is_null());
    }
    let ant = &items[4];
    assert_eq!(ant["Enu"], json!(1));
    assert_eq!(ant["At"]["Perm"], json!(2));
    assert_eq!(ant["Hp"]["Perm"], json!(2));
    assert_eq!(ant["Lvl"], json!(1));
    assert_eq!(ant["Exp"], json!(0));
    assert_eq!(ant["Abil"], json!([]));

    let battle = serde_json::to_value(&conversion.battle).unwrap();
    let opponent_items = battle["OpponentBoard"]["Mins"]["Items"].as_array().unwrap();
    assert_eq!(opponent_items.len(), 5);
    assert!(opponent_items.iter().all(Value::is_null));

    assert_eq!(conversion.team_sizes.player, 1);
    assert_eq!(conversion.team_sizes.opponent, 0);
    assert_eq!(conversion.warnings.missing_ability_map, vec!["Ant"]);
    assert!(conversion.warnings.unknown_pets.is_empty());
}

#[test]
fn test_missing_name_is_empty_slot_not_warning() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({ "p": [{ "a": 5, "h": 5 }, { "n": "Bee" }], "o": [] }),
    );
    assert_eq!(conversion.team_sizes.player, 1);
    assert!(conversion.warnings.unknown_pets.is_empty());
}

#[test]
fn test_unknown_pet_warned_once_across_sides() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [{ "n": "Yeti" }, { "n": "Yeti" }],
            "o": [{ "n": "Yeti" }]
        }),
    );
    assert_eq!(conversion.warnings.unknown_pets, vec!["Yeti"]);
    assert_eq!(conversion.team_sizes.player, 0);
    assert_eq!(conversion.team_sizes.opponent, 0);
}

#[test]
fn test_board_always_five_slots() {
    let maps = test_maps();
    for pet_count in [0usize, 3, 5, 8] {
        let pets: Vec<Value> = (0..pet_count).map(|_| json!({ "n": "Bee" })).collect();
        let conversion = convert_json(&maps, json!({ "p": pets, "o": [] }));
        assert_eq!(user_items(&conversion).len(), 5, "{pet_count} inputs");
        assert_eq!(conversion.team_sizes.player, pet_count.min(5));
    }
}

#[test]
fn test_level_exp_thresholds() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [
                { "n": "Bee", "level": 1 },
                { "n": "Bee", "level": 2 },
                { "n": "Bee", "level": 3 },
                { "n": "Bee", "level": 2, "e": 3 },
                { "n": "Bee", "e": 5 }
            ],
            "o": []
        }),
    );
    let items = user_items(&conversion);
    // Reversed: input i sits at output 4 - i.
    assert_eq!((items[4]["Lvl"].clone(), items[4]["Exp"].clone()), (json!(1), json!(0)));
    assert_eq!((items[3]["Lvl"].clone(), items[3]["Exp"].clone()), (json!(2), json!(2)));
    assert_eq!((items[2]["Lvl"].clone(), items[2]["Exp"].clone()), (json!(3), json!(5)));
    // Explicit exp wins over the threshold.
    assert_eq!((items[1]["Lvl"].clone(), items[1]["Exp"].clone()), (json!(2), json!(3)));
    // Level derived from exp when absent.
    assert_eq!((items[0]["Lvl"].clone(), items[0]["Exp"].clone()), (json!(3), json!(5)));
}

#[test]
fn test_perk_resolution_and_warning() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [
                { "n": "Bee", "eq": "Honey" },
                { "n": "Fish", "eq": { "name": "Cloak" } }
            ],
            "o": []
        }),
    );
    let items = user_items(&conversion);
    assert_eq!(items[4]["Perk"], json!(231));
    assert_eq!(items[3]["Perk"], json!(null));
    assert_eq!(conversion.warnings.missing_perk_map, vec!["Cloak"]);
}

#[test]
fn test_ability_entry_shape_and_triggers_consumed() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({ "p": [{ "n": "Bee", "level": 2, "TrCo": 2 }], "o": [] }),
    );
    let items = user_items(&conversion);
    let abil = &items[4]["Abil"][0];
    assert_eq!(abil["Enu"], json!(93));
    assert_eq!(abil["Lvl"], json!(2));
    assert_eq!(abil["Nat"], json!(true));
    assert_eq!(abil["TrCo"], json!(2));
    assert_eq!(abil["Dur"], json!(0));
    assert_eq!(abil["Char"], json!(null));
    assert_eq!(abil["Dis"], json!(false));
    assert_eq!(abil["AIML"], json!(false));
    assert_eq!(abil["IgRe"], json!(false));
    assert_eq!(abil["Grop"], json!(0));
    assert_eq!(abil["AcCo"], json!(0));
    assert_eq!(abil["DisT"], json!(false));
}

#[test]
fn test_times_hurt_power_and_spell_count() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({ "p": [{ "n": "Bee", "tH": 3, "spellsCast": 2 }], "o": [] }),
    );
    let items = user_items(&conversion);
    assert_eq!(items[4]["Pow"]["SabertoothTigerAbility"], json!(3));
    assert_eq!(items[4]["SpCT"], json!(2));

    let plain = convert_json(&maps, json!({ "p": [{ "n": "Bee" }], "o": [] }));
    let items = user_items(&plain);
    assert_eq!(items[4]["Pow"], json!(null));
    assert_eq!(items[4]["SpCT"], json!(0));
}

#[test]
fn test_single_swallow_memory() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [{ "n": "Beluga Whale", "bSP": { "n": "Fish", "a": 3, "h": 4 } }],
            "o": []
        }),
    );
    let items = user_items(&conversion);
    let lists = &items[4]["MiMs"]["Lsts"];

    // One key for the fixed ability name, one per mapped ability enum, each
    // holding an independent copy of the swallowed descriptor.
    let expected_entry = json!({ "Enu": 99, "At": 3, "Hp": 4 });
    assert_eq!(lists["WhiteWhaleAbility"], json!([expected_entry.clone()]));
    assert_eq!(lists["212"], json!([expected_entry]));
    assert_eq!(lists.as_object().unwrap().len(), 2);

    // The beluga keeps its own mapped ability list.
    assert_eq!(items[4]["Abil"][0]["Enu"], json!(212));
}

#[test]
fn test_single_swallow_without_swallowed_pet_has_no_memory() {
    let maps = test_maps();
    let conversion = convert_json(&maps, json!({ "p": [{ "n": "Beluga Whale" }], "o": [] }));
    let items = user_items(&conversion);
    assert_eq!(items[4]["MiMs"], json!(null));
}

#[test]
fn test_triple_swallow_memory_and_ability_inference() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [{
                "n": "Abomination",
                "aSP1": "Bee",
                "aSP2": { "n": "Fish", "a": 3, "h": 4 },
                "aSP2L": 2
            }],
            "o": []
        }),
    );
    let items = user_items(&conversion);
    let lists = &items[4]["MiMs"]["Lsts"];
    assert_eq!(lists["93"], json!([{ "Enu": 63 }]));
    assert_eq!(lists["129"], json!([{ "Enu": 99, "At": 3, "Hp": 4, "Lvl": 2 }]));

    // Ability list overridden by what was actually swallowed.
    let enums: Vec<i64> = items[4]["Abil"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["Enu"].as_i64().unwrap())
        .collect();
    assert_eq!(enums, vec![93, 129]);
    assert!(conversion.warnings.missing_ability_map.is_empty());
}

#[test]
fn test_triple_swallow_nested_single_swallow_chain() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [{
                "n": "Abomination",
                "aSP1": { "n": "Beluga Whale" },
                "aSP1B": "Fish"
            }],
            "o": []
        }),
    );
    let items = user_items(&conversion);
    let entry = &items[4]["MiMs"]["Lsts"]["212"][0];
    assert_eq!(entry["Enu"], json!(182));
    assert_eq!(entry["MiMs"]["Lsts"]["WhiteWhaleAbility"], json!([{ "Enu": 99 }]));
    assert_eq!(entry["MiMs"]["Lsts"]["212"], json!([{ "Enu": 99 }]));
}

#[test]
fn test_triple_swallow_legacy_array_form() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({
            "p": [{ "n": "Abomination", "abominationSwallowedPets": ["Bee", "Fish"] }],
            "o": []
        }),
    );
    let items = user_items(&conversion);
    let lists = &items[4]["MiMs"]["Lsts"];
    assert_eq!(lists["93"], json!([{ "Enu": 63 }]));
    assert_eq!(lists["129"], json!([{ "Enu": 99 }]));
}

#[test]
fn test_toy_relic_slot_and_heuristics() {
    let maps = test_maps();
    let conversion = convert_json(
        &maps,
        json!({ "p": [], "o": [], "pT": "Crystal Ball", "pTL": 1 }),
    );
    let battle = serde_json::to_value(&conversion.battle).unwrap();
    let relics = battle["UserBoard"]["Rel"]["Items"].as_array().unwrap();
    assert_eq!(relics.len(), 2);
    assert!(relics[0].is_null());

    let toy = &relics[1];
    assert_eq!(toy["Enu"], json!(580));
    assert_eq!(toy["Loc"], json!(4));
    assert_eq!(toy["Lvl"], json!(1));
    // Observed-payload heuristics: ability enum +32, uses L1=2, health L1=3.
    assert_eq!(toy["Abil"][0]["Enu"], json!(612));
    assert_eq!(toy["Cou"], json!(2));
    assert_eq!(toy["Hp"]["Perm"], json!(3));
    assert_eq!(toy["At"], json!({ "Perm": 1000, "Temp": 0, "Max": 1000 }));
    assert_eq!(toy["Id"]["Uni"], json!(900));
}

#[test]
fn test_unknown_toy_drops_slot_with_warning() {
    let maps = test_maps();
    let conversion = convert_json(&maps, json!({ "p": [], "o": [], "pT": "Mystery Box" }));
    let battle = serde_json::to_value(&conversion.battle).unwrap();
    let relics = battle["UserBoard"]["Rel"]["Items"].as_array().unwrap();
    assert!(relics.iter().all(Value::is_null));
    assert_eq!(conversion.warnings.unknown_toys, vec!["Mystery Box"]);
}

#[test]
fn test_pack_resolution_and_default() {
    let maps = test_maps();
    let conversion = convert_json(&maps, json!({ "p": [], "o": [], "pP": "Puppy" }));
    let battle = serde_json::to_value(&conversion.battle).unwrap();
    assert_eq!(battle["UserBoard"]["Pack"], json!(1));
    // Opponent pack absent: default pack name resolves without warning.
    assert_eq!(battle["OpponentBoard"]["Pack"], json!(0));
    assert!(conversion.warnings.missing_pack_map.is_empty());

    let unmapped = convert_json(&maps, json!({ "p": [], "o": [], "pP": "Custom Pack" }));
    let battle = serde_json::to_value(&unmapped.battle).unwrap();
    assert_eq!(battle["UserBoard"]["Pack"], json!(0));
    assert_eq!(unmapped.warnings.missing_pack_map, vec!["Custom Pack"]);
}

#[test]
fn test_economy_defaults_and_overrides() {
    let maps = test_maps();
    let conversion = convert_json(&maps, json!({ "p": [], "o": [] }));
    let battle = serde_json::to_value(&conversion.battle).unwrap();
    assert_eq!(battle["UserBoard"]["Tur"], json!(12));
    assert_eq!(battle["UserBoard"]["GoSp"], json!(10));
    assert_eq!(battle["UserBoard"]["Rold"], json!(1));
    assert_eq!(battle["UserBoard"]["MiSu"], json!(0));

    let explicit = convert_json(
        &maps,
        json!({ "p": [], "o": [], "t": 5, "pGS": 7, "pRA": 3, "pSA": 2, "pL3": 1, "pTA": 4 }),
    );
    let battle = serde_json::to_value(&explicit.battle).unwrap();
    assert_eq!(battle["UserBoard"]["Tur"], json!(5));
    assert_eq!(battle["UserBoard"]["GoSp"], json!(7));
    assert_eq!(battle["UserBoard"]["Rold"], json!(3));
    assert_eq!(battle["UserBoard"]["MiSu"], json!(2));
    assert_eq!(battle["UserBoard"]["MSFL"], json!(1));
    assert_eq!(battle["UserBoard"]["TrTT"], json!(4));
}

#[test]
fn test_battle_identity_fields_are_fresh_per_call() {
    let maps = test_maps();
    let export = json!({ "p": [{ "n": "Ant" }], "o": [] }).to_string();
    let first = convert(&maps, &export).unwrap();
    let second = convert(&maps, &export).unwrap();
    assert_ne!(first.battle.id, second.battle.id);
    assert_ne!(first.battle.user.id, second.battle.user.id);
    assert_eq!(first.battle.outcome, 1);
    assert!(first.battle.end_result >= 0);
}

#[test]
fn test_display_names_default_and_explicit() {
    let maps = test_maps();
    let conversion = convert_json(&maps, json!({ "p": [], "o": [], "playerName": "Lefty" }));
    assert_eq!(conversion.battle.user.display_name, "Lefty");
    assert_eq!(conversion.battle.opponent.display_name, "Calculator Opponent");
}

/// Strip the per-call random identity fields so deterministic content can be
/// compared across encodings.
fn normalized(conversion: &Conversion) -> Value {
    let mut battle = serde_json::to_value(&conversion.battle).unwrap();
    for key in ["Id", "Seed", "ResolvedOn", "WatchedOn", "EndResult"] {
        battle[key] = Value::Null;
    }
    battle["User"]["Id"] = Value::Null;
    battle["Opponent"]["Id"] = Value::Null;
    for board_key in ["UserBoard", "OpponentBoard"] {
        battle[board_key]["Id"] = Value::Null;
        battle[board_key]["Hash"] = Value::Null;
        for grid in ["Mins", "Rel"] {
            if let Some(items) = battle[board_key][grid]["Items"].as_array_mut() {
                for item in items {
                    if !item.is_null() {
                        item["Id"]["BoId"] = Value::Null;
                    }
                }
            }
        }
    }
    battle
}

#[test]
fn test_all_encodings_of_same_export_agree() {
    let maps = test_maps();
    let export = json!({
        "p": [{ "n": "Bee", "a": 2, "h": 3, "eq": "Honey" }],
        "o": [{ "n": "Fish" }],
        "t": 6,
        "pT": "Crystal Ball",
        "pP": "Turtle"
    })
    .to_string();

    let bare = convert(&maps, &export).unwrap();
    let b64 = convert(&maps, &general_purpose::STANDARD.encode(&export)).unwrap();
    let b64url = convert(&maps, &general_purpose::URL_SAFE_NO_PAD.encode(&export)).unwrap();
    let envelope = convert(
        &maps,
        &format!("SAPC1:{}", general_purpose::URL_SAFE_NO_PAD.encode(&export)),
    )
    .unwrap();
    let url = convert(
        &maps,
        &format!(
            "https://sap-calculator.com/?c={}",
            general_purpose::URL_SAFE_NO_PAD.encode(&export)
        ),
    )
    .unwrap();

    let reference = normalized(&bare);
    for (label, other) in [
        ("base64", &b64),
        ("base64url", &b64url),
        ("envelope", &envelope),
        ("url", &url),
    ] {
        assert_eq!(reference, normalized(other), "{label} encoding differs");
    }
}
