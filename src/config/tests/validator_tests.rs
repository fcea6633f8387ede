use crate::config::validator::{
    validate_entry, validate_gesture, validate_id, validate_key, validate_name, ValidationError,
};
use crate::config::ShortcutEntry;
use crate::core::types::Chord;

fn entry(id: &str, key: &str, gesture: &str) -> ShortcutEntry {
    ShortcutEntry {
        id: id.to_string(),
        name: "Test".to_string(),
        chord: Some(Chord::meta(key)),
        gestures: vec![gesture.to_string()],
        line: 1,
    }
}

#[test]
fn test_valid_ids() {
    assert!(validate_id("archive").is_ok());
    assert!(validate_id("toggle-sidebar").is_ok());
    assert!(validate_id("new_thought_2").is_ok());
}

#[test]
fn test_invalid_ids() {
    assert!(validate_id("").is_err());
    assert!(validate_id("has space").is_err());
    assert!(validate_id(&"a".repeat(65)).is_err());
}

#[test]
fn test_names() {
    assert!(validate_name("Move thought up").is_ok());
    assert!(validate_name("  ").is_err());
    assert!(validate_name("Bad\tname").is_err());
}

#[test]
fn test_valid_keys() {
    assert!(validate_key("a").is_ok());
    assert!(validate_key("/").is_ok());
    assert!(validate_key("Enter").is_ok());
    assert!(validate_key("arrowup").is_ok());
    assert!(validate_key("F12").is_ok());
}

#[test]
fn test_invalid_keys() {
    assert_eq!(validate_key("Enterr"), Err(ValidationError::InvalidKey("Enterr".to_string())));
    assert!(validate_key("").is_err());
    assert!(validate_key(" ").is_err());
    assert!(validate_key("F13").is_err());
}

#[test]
fn test_gestures() {
    assert!(validate_gesture("rdlu").is_ok());
    assert!(validate_gesture("").is_err());
    assert!(validate_gesture("rdx").is_err());
    assert!(validate_gesture("RD").is_err());
}

#[test]
fn test_validate_entry_stops_at_first_failure() {
    assert!(validate_entry(&entry("archive", "a", "rd")).is_ok());
    assert_eq!(
        validate_entry(&entry("bad id", "Enterr", "x")),
        Err(ValidationError::InvalidId("bad id".to_string()))
    );
    assert_eq!(
        validate_entry(&entry("ok", "a", "x")),
        Err(ValidationError::InvalidGesture("x".to_string()))
    );
}
