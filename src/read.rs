//! Lenient field reading over loosely-structured export JSON.
//!
//! Calculator exports come from several tools that disagree on key casing,
//! numeric representation (numbers vs numeric strings) and which alias a
//! field is stored under. Every numeric read in the converter goes through
//! this module: given candidate keys and a fallback, take the first finite
//! value.

use serde_json::Value;

#[cfg(test)]
mod tests;

/// Interpret a JSON value as a finite number.
///
/// Accepts numbers and numeric strings. Empty strings, booleans and nulls
/// count as absent.
pub fn as_finite(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// First finite value among `keys` on `source`, which must be a JSON object.
pub fn first_finite(source: &Value, keys: &[&str]) -> Option<f64> {
    let obj = source.as_object()?;
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(as_finite)
}

/// First finite value among `keys`, or `fallback`.
pub fn first_finite_or(source: &Value, keys: &[&str], fallback: f64) -> f64 {
    first_finite(source, keys).unwrap_or(fallback)
}

/// Round to an integer, clamped to `[min, max]`.
pub fn clamp_int(value: f64, min: i64, max: i64) -> i64 {
    (value.round() as i64).clamp(min, max)
}

/// Round to an integer no smaller than `min`.
pub fn round_at_least(value: f64, min: i64) -> i64 {
    (value.round() as i64).max(min)
}

/// Non-empty trimmed string view of a JSON value.
pub fn as_trimmed_str(value: &Value) -> Option<&str> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Normalize a name for dictionary lookup: lowercase, alphanumeric only.
///
/// Makes resolution tolerant of spacing/punctuation/case variance across the
/// data sources the dictionaries are merged from.
pub fn normalize_lookup_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// De-duplicate integers preserving first-seen order.
pub fn unique_ints<I: IntoIterator<Item = i64>>(values: I) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v) {
            out.push(v);
        }
    }
    out
}

/// De-duplicate non-blank strings preserving first-seen order.
pub fn unique_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for v in values {
        let trimmed = v.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}
