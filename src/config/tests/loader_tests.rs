//! Manifest loading tests
//!
//! Tests for reading manifests from disk and turning them into shortcuts.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;

use crate::config::{ConfigError, Manifest, ManifestError};
use crate::core::types::{shared_action, ExecContext, InputEvent};
use crate::core::Registry;

/// Helper: Creates a manifest file with known content
fn create_test_manifest(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shortcuts.conf");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

#[test]
fn test_load_manifest() {
    let (_temp_dir, path) = create_test_manifest(
        "platform = mac\nshortcut = archive, Archive, META+A, -\nshortcut = outdent, Outdent, -, rdl\n",
    );

    let manifest = Manifest::load(path).unwrap();
    assert_eq!(manifest.entries.len(), 2);
    assert_eq!(manifest.entries[1].line, 3);
}

#[test]
fn test_load_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nonexistent.conf");

    match Manifest::load(path.clone()) {
        Err(ConfigError::NotFound(missing)) => assert_eq!(missing, path),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[test]
fn test_load_reports_parse_errors() {
    let (_temp_dir, path) = create_test_manifest("shortcut = x, X, META+A, rdq\n");

    assert!(matches!(
        Manifest::load(path),
        Err(ConfigError::Manifest(ManifestError::InvalidShortcut { line: 1, .. }))
    ));
}

#[test]
fn test_into_shortcuts_attaches_actions() {
    let (_temp_dir, path) = create_test_manifest(
        "shortcut = archive, Archive, META+A, -\nshortcut = outdent, Outdent, -, rdl | rdlu\n",
    );
    let manifest = Manifest::load(path).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let shortcuts = manifest.into_shortcuts(|entry| {
        let log = Rc::clone(&log);
        let id = entry.id.clone();
        shared_action(move |_, context| {
            log.borrow_mut().push((id.clone(), context));
        })
    });

    let registry = Registry::new(shortcuts);
    let outdent = registry.lookup_by_gesture("rdlu").unwrap();
    outdent.exec(&InputEvent::Gesture(&Default::default()), ExecContext::Gesture);

    assert!(registry.lookup_by_chord("meta_a").is_some());
    assert_eq!(*log.borrow(), vec![("outdent".to_string(), ExecContext::Gesture)]);
}
