use std::io::Write as _;

use tempfile::NamedTempFile;

use crate::cli::InputArgs;

use super::convert::{board_defaults, ConvertParams};
use super::{load_maps, read_export};

fn inline_input(export: &str) -> InputArgs {
    InputArgs {
        export: Some(export.to_string()),
        input_file: None,
        maps: None,
    }
}

#[test]
fn test_read_export_prefers_inline_argument() {
    let text = read_export(&inline_input(r#"{"p":[]}"#)).unwrap();
    assert_eq!(text, r#"{"p":[]}"#);
}

#[test]
fn test_read_export_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"p":[],"o":[]}}"#).unwrap();

    let input = InputArgs {
        export: None,
        input_file: Some(file.path().to_path_buf()),
        maps: None,
    };
    let text = read_export(&input).unwrap();
    assert_eq!(text.trim(), r#"{"p":[],"o":[]}"#);
}

#[test]
fn test_load_maps_bundled_default() {
    let maps = load_maps(None).unwrap();
    assert_eq!(maps.pet_id_by_name("Ant"), Some(1));
}

#[test]
fn test_load_maps_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"petIdsByName":{{"ant":1}}}}"#).unwrap();

    let maps = load_maps(Some(&file.path().to_path_buf())).unwrap();
    assert_eq!(maps.pet_id_by_name("Ant"), Some(1));
    assert_eq!(maps.pet_id_by_name("Bee"), None);
}

#[test]
fn test_board_defaults_overrides() {
    let params = ConvertParams {
        input: inline_input(""),
        output: None,
        pretty: false,
        turn: Some(3),
        gold_spent: None,
        roll_amount: Some(-2),
        pack: Some("Puppy".to_string()),
    };
    let defaults = board_defaults(&params);
    assert_eq!(defaults.turn, 3);
    assert_eq!(defaults.gold_spent, 10);
    assert_eq!(defaults.roll_amount, 0);
    assert_eq!(defaults.pack_name, "Puppy");
}

#[test]
fn test_load_maps_missing_file_reports_path() {
    let error = load_maps(Some(&"/nonexistent/maps.json".into())).unwrap_err();
    assert!(error.to_string().contains("/nonexistent/maps.json"));
}
