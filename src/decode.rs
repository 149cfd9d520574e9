//! Multi-format decoding of calculator export text.
//!
//! Export codes circulate in several shapes: bare JSON, percent-encoded JSON,
//! standard or URL-safe base64 of JSON, a `SAPC1:`-prefixed base64 envelope,
//! and share URLs carrying any of those in a `c`/`code` query parameter.
//! [`parse_export`] tries each recognized shape in a fixed order and returns
//! the first JSON tree that parses.

use base64::{engine::general_purpose, Engine as _};
use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::error::{ConvertError, Result};

#[cfg(test)]
mod tests;

/// Literal prefix of the versioned share-code envelope.
pub const ENVELOPE_PREFIX: &str = "SAPC1";

/// Decode raw export text into an unexpanded JSON tree.
///
/// Attempts, first success wins:
/// 1. share URL -> recurse on its `c`/`code` query parameter
/// 2. `SAPC1:` envelope -> base64url (or standard base64) payload
/// 3. bare JSON, percent-decoded JSON, base64url JSON, standard-base64 JSON
pub fn parse_export(raw: &str) -> Result<Value> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    if starts_with_ignore_case(text, "http://") || starts_with_ignore_case(text, "https://") {
        let code =
            query_param(text, "c").or_else(|| query_param(text, "code"));
        return match code {
            Some(code) if !code.trim().is_empty() => parse_export(&code),
            _ => Err(ConvertError::UrlMissingCode),
        };
    }

    if let Some(payload) = strip_envelope_prefix(text) {
        let decoded = decode_base64url_text(payload).or_else(|| decode_base64_text(payload));
        return decoded
            .as_deref()
            .and_then(try_parse_json_candidate)
            .ok_or(ConvertError::EnvelopeDecode {
                prefix: ENVELOPE_PREFIX,
            });
    }

    if let Some(value) = try_parse_json_candidate(text) {
        return Ok(value);
    }

    let percent_decoded = safe_percent_decode(text);
    if percent_decoded != text {
        if let Some(value) = try_parse_json_candidate(&percent_decoded) {
            return Ok(value);
        }
    }

    if let Some(value) = decode_base64url_text(text)
        .as_deref()
        .and_then(try_parse_json_candidate)
    {
        return Ok(value);
    }

    if let Some(value) = decode_base64_text(text)
        .as_deref()
        .and_then(try_parse_json_candidate)
    {
        return Ok(value);
    }

    Err(ConvertError::UnrecognizedFormat)
}

/// Heuristic check whether free text is plausibly an export code.
///
/// Used by the CLI to warn before attempting a parse that is likely to fail
/// (the original extension used the same sniff to pick a candidate field off
/// the page).
pub fn looks_like_export(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    if strip_envelope_prefix(trimmed).is_some() {
        return true;
    }

    if starts_with_ignore_case(trimmed, "http://") || starts_with_ignore_case(trimmed, "https://") {
        return query_param(trimmed, "c").is_some() || query_param(trimmed, "code").is_some();
    }

    ["\"playerPets\"", "\"opponentPets\"", "\"p\"", "\"o\"", "\"pP\""]
        .iter()
        .any(|marker| trimmed.contains(marker))
}

// Byte comparison, not str slicing: a byte index into arbitrary user text
// can fall inside a multi-byte char.
fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// `SAPC1:` prefix match is case-insensitive; returns the trimmed payload.
fn strip_envelope_prefix(text: &str) -> Option<&str> {
    let with_colon_len = ENVELOPE_PREFIX.len() + 1;
    if text.len() <= with_colon_len {
        return None;
    }
    let head = &text.as_bytes()[..with_colon_len];
    if head[..ENVELOPE_PREFIX.len()].eq_ignore_ascii_case(ENVELOPE_PREFIX.as_bytes())
        && head[ENVELOPE_PREFIX.len()] == b':'
    {
        // A matched prefix is all ASCII, so the byte offset is a char boundary.
        Some(text[with_colon_len..].trim())
    } else {
        None
    }
}

/// Minimal query-string lookup; values are percent-decoded, `+` means space.
fn query_param(url: &str, name: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        if key == name {
            return Some(safe_percent_decode(&value.replace('+', " ")));
        }
    }
    None
}

/// Percent-decode, falling back to the input on invalid UTF-8.
fn safe_percent_decode(text: &str) -> String {
    match percent_decode_str(text).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}

fn decode_base64_text(text: &str) -> Option<String> {
    let bytes = general_purpose::STANDARD.decode(text.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// URL-safe alphabet, with padding restored before decoding.
fn decode_base64url_text(text: &str) -> Option<String> {
    let normalized = text.trim().replace('-', "+").replace('_', "/");
    if normalized.is_empty() {
        return None;
    }
    let padded = format!(
        "{}{}",
        normalized,
        "=".repeat((4 - normalized.len() % 4) % 4)
    );
    decode_base64_text(&padded)
}

/// Parse text as JSON, then (if that fails and it changes anything) its
/// percent-decoded form.
fn try_parse_json_candidate(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    let decoded = safe_percent_decode(trimmed);
    if decoded != trimmed {
        if let Ok(value) = serde_json::from_str::<Value>(&decoded) {
            return Some(value);
        }
    }

    None
}
