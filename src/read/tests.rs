use super::*;
use serde_json::json;

#[test]
fn test_as_finite_accepts_numbers_and_numeric_strings() {
    assert_eq!(as_finite(&json!(3)), Some(3.0));
    assert_eq!(as_finite(&json!(2.5)), Some(2.5));
    assert_eq!(as_finite(&json!("7")), Some(7.0));
    assert_eq!(as_finite(&json!(" 12 ")), Some(12.0));
}

#[test]
fn test_as_finite_rejects_blanks_and_non_numerics() {
    assert_eq!(as_finite(&json!("")), None);
    assert_eq!(as_finite(&json!("   ")), None);
    assert_eq!(as_finite(&json!("abc")), None);
    assert_eq!(as_finite(&json!(null)), None);
    assert_eq!(as_finite(&json!(true)), None);
    assert_eq!(as_finite(&json!([1])), None);
}

#[test]
fn test_first_finite_takes_first_matching_alias() {
    let pet = json!({ "attack": "bad", "At": 4, "at": 9 });
    assert_eq!(first_finite(&pet, &["attack", "At", "at"]), Some(4.0));
    assert_eq!(first_finite(&pet, &["missing"]), None);
    assert_eq!(first_finite_or(&pet, &["missing"], 1.0), 1.0);
}

#[test]
fn test_first_finite_on_non_object_is_none() {
    assert_eq!(first_finite(&json!("Ant"), &["attack"]), None);
    assert_eq!(first_finite(&json!(null), &["attack"]), None);
}

#[test]
fn test_clamp_int_rounds_and_clamps() {
    assert_eq!(clamp_int(2.4, 1, 3), 2);
    assert_eq!(clamp_int(9.0, 1, 3), 3);
    assert_eq!(clamp_int(-5.0, 1, 3), 1);
    assert_eq!(round_at_least(-2.0, 0), 0);
    assert_eq!(round_at_least(4.6, 0), 5);
}

#[test]
fn test_normalize_lookup_key() {
    assert_eq!(normalize_lookup_key("  Bowling Ball "), "bowlingball");
    assert_eq!(normalize_lookup_key("T-Rex!"), "trex");
    assert_eq!(normalize_lookup_key("???"), "");
}

#[test]
fn test_unique_preserves_first_seen_order() {
    assert_eq!(unique_ints([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    assert_eq!(
        unique_strings(["Ant", " ", "Bee", "Ant"]),
        vec!["Ant".to_string(), "Bee".to_string()]
    );
}
