use crate::core::codec::{hash_chord, hash_key_event};
use crate::core::types::{Chord, KeyEvent};

/// Every combination of modifiers over a few representative keys.
fn all_chords() -> Vec<Chord> {
    let keys = ["a", "Z", "Enter", "ArrowUp", "/", "F5"];
    let mut chords = Vec::new();

    for key in keys {
        for mask in 0..8u8 {
            chords.push(Chord {
                key: key.to_string(),
                meta: mask & 1 != 0,
                alt: mask & 2 != 0,
                shift: mask & 4 != 0,
            });
        }
    }

    chords
}

#[test]
fn test_synthetic_event_matches_every_definition() {
    for chord in all_chords() {
        let event = KeyEvent::from_chord(&chord);
        assert_eq!(hash_key_event(&event), hash_chord(&chord), "chord {}", chord);
    }
}

#[test]
fn test_ctrl_convention_matches_meta_definition() {
    for chord in all_chords().into_iter().filter(|c| c.meta) {
        let mut event = KeyEvent::from_chord(&chord);
        event.meta = false;
        event.ctrl = true;
        assert_eq!(hash_key_event(&event), hash_chord(&chord), "chord {}", chord);
    }
}

#[test]
fn test_distinct_chords_hash_distinctly() {
    let chords = all_chords();
    let mut hashes: Vec<String> = chords.iter().map(hash_chord).collect();
    hashes.sort();
    hashes.dedup();
    assert_eq!(hashes.len(), chords.len());
}

#[test]
fn test_missing_modifier_does_not_match() {
    let chord = Chord::meta("a").with_shift();
    let event = KeyEvent::new("a").with_meta();
    assert_ne!(hash_key_event(&event), hash_chord(&chord));
}

#[test]
fn test_shifted_event_key_case_is_ignored() {
    // A shifted letter arrives upper-cased from the event source
    let chord = Chord::meta("a").with_shift();
    let event = KeyEvent::new("A").with_meta().with_shift();
    assert_eq!(hash_key_event(&event), hash_chord(&chord));
}
