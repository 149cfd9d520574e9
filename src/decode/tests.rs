use super::*;
use crate::error::ConvertError;
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;

fn sample_json() -> String {
    json!({ "playerPets": [{ "name": "Ant" }], "opponentPets": [] }).to_string()
}

#[test]
fn test_parse_bare_json() {
    let parsed = parse_export(&sample_json()).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
}

#[test]
fn test_parse_percent_encoded_json() {
    let encoded = sample_json()
        .replace('"', "%22")
        .replace('{', "%7B")
        .replace('}', "%7D")
        .replace('[', "%5B")
        .replace(']', "%5D");
    let parsed = parse_export(&encoded).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
}

#[test]
fn test_parse_standard_base64() {
    let encoded = general_purpose::STANDARD.encode(sample_json());
    let parsed = parse_export(&encoded).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
}

#[test]
fn test_parse_unpadded_base64url() {
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(sample_json());
    let parsed = parse_export(&encoded).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
}

#[test]
fn test_parse_envelope_prefix_case_insensitive() {
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(sample_json());
    for prefix in ["SAPC1", "sapc1", "SapC1"] {
        let parsed = parse_export(&format!("{prefix}:{encoded}")).unwrap();
        assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
    }
}

#[test]
fn test_parse_envelope_with_standard_base64_payload() {
    let encoded = general_purpose::STANDARD.encode(sample_json());
    let parsed = parse_export(&format!("SAPC1:{encoded}")).unwrap();
    assert_eq!(parsed["opponentPets"], json!([]));
}

#[test]
fn test_parse_envelope_with_garbage_payload_fails() {
    let err = parse_export("SAPC1:!!!not-base64!!!").unwrap_err();
    assert!(matches!(err, ConvertError::EnvelopeDecode { .. }));
    assert!(err.to_string().contains("SAPC1"));
}

#[test]
fn test_parse_share_url_with_code_param() {
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(sample_json());
    let url = format!("https://sap-calculator.com/?c={encoded}");
    let parsed = parse_export(&url).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));

    let url = format!("HTTPS://sap-calculator.com/build?x=1&code={encoded}&y=2");
    let parsed = parse_export(&url).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
}

#[test]
fn test_parse_share_url_with_percent_encoded_json_param() {
    let encoded = sample_json().replace('"', "%22");
    let url = format!("https://sap-calculator.com/?c={encoded}");
    let parsed = parse_export(&url).unwrap();
    assert_eq!(parsed["playerPets"][0]["name"], json!("Ant"));
}

#[test]
fn test_parse_url_without_code_param_fails() {
    let err = parse_export("https://sap-calculator.com/?other=1").unwrap_err();
    assert!(matches!(err, ConvertError::UrlMissingCode));
}

#[test]
fn test_parse_empty_input_fails() {
    assert!(matches!(parse_export("   "), Err(ConvertError::EmptyInput)));
}

#[test]
fn test_parse_unrecognized_format_fails() {
    let err = parse_export("not json or base64").unwrap_err();
    assert!(matches!(err, ConvertError::UnrecognizedFormat));
    assert!(err.to_string().contains("not a recognized"));
}

#[test]
fn test_multibyte_text_near_prefixes_is_rejected_cleanly() {
    // Multi-byte chars straddling the prefix-length byte offsets must fall
    // through to the normal unrecognized-format error, not panic.
    for text in ["SAPC\u{e9}12", "SAPC1\u{e9}payload", "http:\u{e9}//x", "htt\u{e9}p://x"] {
        let err = parse_export(text).unwrap_err();
        assert!(matches!(err, ConvertError::UnrecognizedFormat), "{text}");
        assert!(!looks_like_export(text), "{text}");
    }
}

#[test]
fn test_looks_like_export() {
    assert!(looks_like_export("SAPC1:abcd"));
    assert!(looks_like_export("https://sap-calculator.com/?c=xyz"));
    assert!(looks_like_export(r#"{"playerPets":[]}"#));
    assert!(looks_like_export(r#"{"p":[],"o":[]}"#));
    assert!(!looks_like_export("https://example.com/"));
    assert!(!looks_like_export("plain text"));
    assert!(!looks_like_export(""));
}
