//! File-level tests for splicing rules into karabiner.json.
//!
//! Each test works on a scratch copy in a temp directory.

use naga_karabiner::splice::read_document;
use naga_karabiner::{compile, splice_file, Action, ActionRecord, MappingTable, SpliceError, SpliceOutcome};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("karabiner.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn mapping(entries: &[(&str, &str)]) -> MappingTable {
    let mut table = MappingTable::new();
    for (button, combo) in entries {
        table
            .entry(button.to_string())
            .or_default()
            .push(ActionRecord::new(combo.parse::<Action>().unwrap()));
    }
    table
}

fn active_rules(doc: &Value) -> Vec<Value> {
    doc["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

const KARABINER_JSON: &str = r#"{
    "global": { "check_for_updates_on_startup": true },
    "profiles": [
        {
            "name": "Default profile",
            "selected": true,
            "complex_modifications": {
                "rules": [
                    {
                        "description": "Launch terminal",
                        "manipulators": [{
                            "type": "basic",
                            "from": { "key_code": "t", "modifiers": { "mandatory": ["fn"] } },
                            "to": [{ "shell_command": "open -a /Applications/Utilities/Terminal.app" }]
                        }]
                    },
                    { "description": "Naga Button 7", "manipulators": [] }
                ]
            },
            "virtual_hid_keyboard": { "keyboard_type_v2": "ansi" }
        }
    ]
}"#;

#[test]
fn writes_rules_and_preserves_foreign_content() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, KARABINER_JSON);
    let original = read_document(&path).unwrap();

    let rules = compile(&mapping(&[("1", "cmd+left"), ("2", "esc")]));
    let outcome = splice_file(&path, &rules).unwrap();
    assert_eq!(
        outcome,
        SpliceOutcome::Spliced {
            profile_index: 0,
            removed: 1,
            added: 2
        }
    );

    let doc = read_document(&path).unwrap();
    let rules = active_rules(&doc);
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0], active_rules(&original)[0]);
    assert_eq!(rules[1]["description"], "Naga Button 1");
    assert_eq!(rules[2]["description"], "Naga Button 2");
    assert_eq!(rules[1]["manipulators"][0]["to"][0]["key_code"], "left_arrow");
    assert_eq!(doc["global"], original["global"]);
    assert_eq!(
        doc["profiles"][0]["virtual_hid_keyboard"],
        json!({ "keyboard_type_v2": "ansi" })
    );

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("/Applications/Utilities/Terminal.app"));
    assert!(!text.contains("\\/"));
}

#[test]
fn repeated_saves_keep_rule_count() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, KARABINER_JSON);
    let rules = compile(&mapping(&[("3", "ctrl+a"), ("12", "fn")]));

    splice_file(&path, &rules).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    splice_file(&path, &rules).unwrap();
    splice_file(&path, &rules).unwrap();
    let third = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, third);
    assert_eq!(active_rules(&read_document(&path).unwrap()).len(), 3);
}

#[test]
fn foreign_rules_survive_any_number_of_splices() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, KARABINER_JSON);
    let foreign = active_rules(&read_document(&path).unwrap())[0].clone();

    for combo in ["a", "shift+b", "cmd+opt+c"] {
        splice_file(&path, &compile(&mapping(&[("5", combo)]))).unwrap();
        let rules = active_rules(&read_document(&path).unwrap());
        assert_eq!(rules[0], foreign);
        assert_eq!(rules.len(), 2);
    }

    // Clearing every mapping leaves only the foreign rule
    splice_file(&path, &[]).unwrap();
    assert_eq!(active_rules(&read_document(&path).unwrap()), vec![foreign]);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let err = splice_file(&path, &[]).unwrap_err();
    assert!(matches!(err, SpliceError::Read { .. }));
    assert!(!path.exists());
}

#[test]
fn corrupt_file_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{ \"profiles\": [ ");
    let err = splice_file(&path, &compile(&mapping(&[("1", "a")]))).unwrap_err();
    assert!(matches!(err, SpliceError::Parse { .. }));
    assert!(err.to_string().contains("Could not parse"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"profiles\": [ ");
}

#[test]
fn zero_profiles_performs_no_write() {
    let dir = TempDir::new().unwrap();
    // Compact on purpose: any rewrite would pretty-print it
    let content = r#"{"global":{},"profiles":[]}"#;
    let path = write_config(&dir, content);

    let outcome = splice_file(&path, &compile(&mapping(&[("1", "a")]))).unwrap();

    assert_eq!(outcome, SpliceOutcome::NoProfiles);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}
