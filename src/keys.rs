//! Short-key expansion for calculator exports.
//!
//! Share codes abbreviate every object key to one or two letters to keep the
//! payload small. This module holds the fixed short-to-long dictionary and a
//! recursive rewriter. Unmapped keys pass through unchanged, which also makes
//! expansion idempotent on already-expanded trees.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::HashMap;


/// Base (non-templated) abbreviations.
const BASE_KEY_MAP: &[(&str, &str)] = &[
    ("pP", "playerPack"),
    ("oP", "opponentPack"),
    ("pT", "playerToy"),
    ("pTL", "playerToyLevel"),
    ("oT", "opponentToy"),
    ("oTL", "opponentToyLevel"),
    ("t", "turn"),
    ("pGS", "playerGoldSpent"),
    ("oGS", "opponentGoldSpent"),
    ("pRA", "playerRollAmount"),
    ("oRA", "opponentRollAmount"),
    ("pSA", "playerSummonedAmount"),
    ("oSA", "opponentSummonedAmount"),
    ("pL3", "playerLevel3Sold"),
    ("oL3", "opponentLevel3Sold"),
    ("pTA", "playerTransformationAmount"),
    ("oTA", "opponentTransformationAmount"),
    ("p", "playerPets"),
    ("o", "opponentPets"),
    ("an", "angler"),
    ("ap", "allPets"),
    ("lf", "logFilter"),
    ("fs", "fontSize"),
    ("cp", "customPacks"),
    ("os", "oldStork"),
    ("tp", "tokenPets"),
    ("ks", "komodoShuffle"),
    ("m", "mana"),
    ("sa", "showAdvanced"),
    ("ae", "ailmentEquipment"),
    ("n", "name"),
    ("a", "attack"),
    ("h", "health"),
    ("e", "exp"),
    ("eq", "equipment"),
    ("bSP", "belugaSwallowedPet"),
    ("tH", "timesHurt"),
    ("aSP1", "abominationSwallowedPet1"),
    ("aSP2", "abominationSwallowedPet2"),
    ("aSP3", "abominationSwallowedPet3"),
    ("aSP1L", "abominationSwallowedPet1Level"),
    ("aSP2L", "abominationSwallowedPet2Level"),
    ("aSP3L", "abominationSwallowedPet3Level"),
    ("aSP1B", "abominationSwallowedPet1BelugaSwallowedPet"),
    ("aSP2B", "abominationSwallowedPet2BelugaSwallowedPet"),
    ("aSP3B", "abominationSwallowedPet3BelugaSwallowedPet"),
    ("aSP1SFS", "abominationSwallowedPet1SarcasticFringeheadSwallowedPet"),
    ("aSP2SFS", "abominationSwallowedPet2SarcasticFringeheadSwallowedPet"),
    ("aSP3SFS", "abominationSwallowedPet3SarcasticFringeheadSwallowedPet"),
    ("aSP1T", "abominationSwallowedPet1TimesHurt"),
    ("aSP2T", "abominationSwallowedPet2TimesHurt"),
    ("aSP3T", "abominationSwallowedPet3TimesHurt"),
    ("pCP", "parrotCopyPet"),
    ("pCPB", "parrotCopyPetBelugaSwallowedPet"),
    ("aSP1PCP", "abominationSwallowedPet1ParrotCopyPet"),
    ("aSP2PCP", "abominationSwallowedPet2ParrotCopyPet"),
    ("aSP3PCP", "abominationSwallowedPet3ParrotCopyPet"),
    ("aSP1PCPB", "abominationSwallowedPet1ParrotCopyPetBelugaSwallowedPet"),
    ("aSP2PCPB", "abominationSwallowedPet2ParrotCopyPetBelugaSwallowedPet"),
    ("aSP3PCPB", "abominationSwallowedPet3ParrotCopyPetBelugaSwallowedPet"),
];

/// Templated keys for a parrot copying an abomination: up to three swallowed
/// slots, each with level/times-hurt/beluga-chain variants, plus one nested
/// copy level (parrot -> abomination -> parrot -> abomination).
fn insert_parrot_copy_abomination_keys(map: &mut HashMap<String, String>) {
    for outer in 1..=3 {
        let base = format!("parrotCopyPetAbominationSwallowedPet{outer}");
        let prefix = format!("pCPAS{outer}");
        map.insert(prefix.clone(), base.clone());
        map.insert(format!("{prefix}B"), format!("{base}BelugaSwallowedPet"));
        map.insert(format!("{prefix}L"), format!("{base}Level"));
        map.insert(format!("{prefix}T"), format!("{base}TimesHurt"));
        map.insert(format!("{prefix}PCP"), format!("{base}ParrotCopyPet"));
        map.insert(
            format!("{prefix}PCPB"),
            format!("{base}ParrotCopyPetBelugaSwallowedPet"),
        );

        for inner in 1..=3 {
            let inner_base = format!("{base}ParrotCopyPetAbominationSwallowedPet{inner}");
            let inner_prefix = format!("{prefix}PCPAS{inner}");
            map.insert(inner_prefix.clone(), inner_base.clone());
            map.insert(
                format!("{inner_prefix}B"),
                format!("{inner_base}BelugaSwallowedPet"),
            );
            map.insert(format!("{inner_prefix}L"), format!("{inner_base}Level"));
            map.insert(format!("{inner_prefix}T"), format!("{inner_base}TimesHurt"));
        }
    }
}

/// Templated keys for the mirror nesting: an abomination whose swallowed pet
/// is a parrot that copied another abomination.
fn insert_abomination_parrot_copy_keys(map: &mut HashMap<String, String>) {
    for outer in 1..=3 {
        let outer_prefix = format!("aSP{outer}PCPAS");
        let outer_base =
            format!("abominationSwallowedPet{outer}ParrotCopyPetAbominationSwallowedPet");
        for inner in 1..=3 {
            let prefix = format!("{outer_prefix}{inner}");
            let base = format!("{outer_base}{inner}");
            map.insert(prefix.clone(), base.clone());
            map.insert(format!("{prefix}B"), format!("{base}BelugaSwallowedPet"));
            map.insert(format!("{prefix}L"), format!("{base}Level"));
            map.insert(format!("{prefix}T"), format!("{base}TimesHurt"));
        }
    }
}

static SHORT_TO_LONG: Lazy<HashMap<String, String>> = Lazy::new(|| {
    let mut map: HashMap<String, String> = BASE_KEY_MAP
        .iter()
        .map(|(short, long)| (short.to_string(), long.to_string()))
        .collect();
    insert_parrot_copy_abomination_keys(&mut map);
    insert_abomination_parrot_copy_keys(&mut map);
    map
});

/// Long form of a single key, or the key itself when unmapped.
pub fn expand_key(key: &str) -> &str {
    SHORT_TO_LONG.get(key).map(String::as_str).unwrap_or(key)
}

/// Recursively rewrite every object key through the dictionary.
///
/// Array element order is preserved, values other than objects/arrays are
/// returned unchanged.
pub fn expand(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(expand).collect()),
        Value::Object(entries) => {
            let mut out = Map::with_capacity(entries.len());
            for (key, nested) in entries {
                out.insert(expand_key(key).to_string(), expand(nested));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
