//! Soft per-entity warning accumulation.
//!
//! Unknown names never abort a conversion: the entity is built with the
//! unresolved field omitted and the name lands in one of these buckets,
//! returned alongside the successful result. Buckets are merged upward from
//! each builder and de-duplicated once at the top.

use serde::Serialize;

use crate::read;

/// Warning buckets keyed the way the extension surfaced them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Warnings {
    #[serde(rename = "unknownPets")]
    pub unknown_pets: Vec<String>,
    #[serde(rename = "missingAbilityMap")]
    pub missing_ability_map: Vec<String>,
    #[serde(rename = "missingPerkMap")]
    pub missing_perk_map: Vec<String>,
    #[serde(rename = "missingPackMap")]
    pub missing_pack_map: Vec<String>,
    #[serde(rename = "unknownToys")]
    pub unknown_toys: Vec<String>,
}

impl Warnings {
    pub fn merge(&mut self, other: Warnings) {
        self.unknown_pets.extend(other.unknown_pets);
        self.missing_ability_map.extend(other.missing_ability_map);
        self.missing_perk_map.extend(other.missing_perk_map);
        self.missing_pack_map.extend(other.missing_pack_map);
        self.unknown_toys.extend(other.unknown_toys);
    }

    /// De-duplicate every bucket, preserving first-seen order.
    pub fn deduplicated(self) -> Self {
        Self {
            unknown_pets: read::unique_strings(self.unknown_pets),
            missing_ability_map: read::unique_strings(self.missing_ability_map),
            missing_perk_map: read::unique_strings(self.missing_perk_map),
            missing_pack_map: read::unique_strings(self.missing_pack_map),
            unknown_toys: read::unique_strings(self.unknown_toys),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unknown_pets.is_empty()
            && self.missing_ability_map.is_empty()
            && self.missing_perk_map.is_empty()
            && self.missing_pack_map.is_empty()
            && self.unknown_toys.is_empty()
    }

    /// One-line human summary, truncated per bucket like the extension's
    /// status banner.
    pub fn summary(&self) -> String {
        fn part(label: &str, names: &[String]) -> Option<String> {
            if names.is_empty() {
                return None;
            }
            let shown = names.iter().take(4).cloned().collect::<Vec<_>>().join(", ");
            let ellipsis = if names.len() > 4 { "..." } else { "" };
            Some(format!("{label}: {shown}{ellipsis}"))
        }

        [
            part("Unknown pets skipped", &self.unknown_pets),
            part("Ability map missing", &self.missing_ability_map),
            part("Perk map missing", &self.missing_perk_map),
            part("Pack map missing", &self.missing_pack_map),
            part("Unknown toys skipped", &self.unknown_toys),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_and_dedup_preserve_order() {
        let mut a = Warnings {
            unknown_pets: names(&["Yeti", "Griffin"]),
            ..Warnings::default()
        };
        let b = Warnings {
            unknown_pets: names(&["Griffin", "Yeti", "Wyvern"]),
            missing_perk_map: names(&["Cloak"]),
            ..Warnings::default()
        };
        a.merge(b);
        let deduped = a.deduplicated();
        assert_eq!(deduped.unknown_pets, names(&["Yeti", "Griffin", "Wyvern"]));
        assert_eq!(deduped.missing_perk_map, names(&["Cloak"]));
    }

    #[test]
    fn test_summary_truncates_long_buckets() {
        let warnings = Warnings {
            unknown_pets: names(&["A", "B", "C", "D", "E"]),
            ..Warnings::default()
        };
        assert_eq!(warnings.summary(), "Unknown pets skipped: A, B, C, D...");
        assert!(Warnings::default().summary().is_empty());
        assert!(Warnings::default().is_empty());
        assert!(!warnings.is_empty());
    }
}
