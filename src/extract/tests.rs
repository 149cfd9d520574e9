use super::*;
use serde_json::json;

#[test]
fn test_extract_from_top_level() {
    let tree = json!({
        "playerPets": [{ "name": "Ant" }],
        "opponentPets": [],
        "turn": 9,
        "playerPack": "Turtle",
        "playerGoldSpent": 11,
        "playerToy": "Balloon",
        "playerToyLevel": 2,
        "playerName": "Left",
        "opponentName": "Right"
    });

    let state = extract_state(&tree).unwrap();
    assert_eq!(state.player.pets.len(), 1);
    assert!(state.opponent.pets.is_empty());
    assert_eq!(state.turn, Some(9.0));
    assert_eq!(state.player.pack.as_deref(), Some("Turtle"));
    assert_eq!(state.player.gold_spent, Some(11.0));
    assert_eq!(state.player.toy, Some(json!("Balloon")));
    assert_eq!(state.player.toy_level, Some(2.0));
    assert_eq!(state.player.display_name.as_deref(), Some("Left"));
    assert_eq!(state.opponent.display_name.as_deref(), Some("Right"));
}

#[test]
fn test_extract_from_nested_candidates() {
    for key in ["state", "calculatorState", "calculator", "payload", "data", "formGroup"] {
        let tree = json!({ key: { "opponentPets": [{ "name": "Bee" }] } });
        let state = extract_state(&tree).unwrap();
        assert_eq!(state.opponent.pets.len(), 1, "candidate key {key}");
    }
}

#[test]
fn test_extract_prefers_top_level_over_nested() {
    let tree = json!({
        "playerPets": [{ "name": "Outer" }],
        "state": { "playerPets": [{ "name": "Inner" }] }
    });
    let state = extract_state(&tree).unwrap();
    assert_eq!(state.player.pets[0]["name"], json!("Outer"));
}

#[test]
fn test_extract_candidate_priority_order() {
    // `state` is listed before `payload`, so it wins even when both match.
    let tree = json!({
        "payload": { "playerPets": [{ "name": "FromPayload" }] },
        "state": { "playerPets": [{ "name": "FromState" }] }
    });
    let state = extract_state(&tree).unwrap();
    assert_eq!(state.player.pets[0]["name"], json!("FromState"));
}

#[test]
fn test_extract_fails_without_team_arrays() {
    let err = extract_state(&json!({ "other": 1 })).unwrap_err();
    assert!(matches!(err, crate::error::ConvertError::MissingTeams));

    // `playerPets` must actually be an array.
    let err = extract_state(&json!({ "playerPets": "Ant" })).unwrap_err();
    assert!(matches!(err, crate::error::ConvertError::MissingTeams));
}

#[test]
fn test_blank_scalars_treated_as_absent() {
    let tree = json!({
        "playerPets": [],
        "playerPack": "  ",
        "playerGoldSpent": "not a number",
        "playerToy": null
    });
    let state = extract_state(&tree).unwrap();
    assert_eq!(state.player.pack, None);
    assert_eq!(state.player.gold_spent, None);
    assert_eq!(state.player.toy, None);
}
