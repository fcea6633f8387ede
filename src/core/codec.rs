//! Canonical string keys for chords and gesture paths
//!
//! Definitions and live events are hashed with the same encoding so a
//! registry lookup is a single `HashMap::get`:
//!
//! `meta_` + `alt_` + `shift_` (each only when set, always in this order)
//! followed by the lower-cased key.
//!
//! | Input | Canonical key |
//! |-------|---------------|
//! | `{ key: "a", meta }` | `meta_a` |
//! | `{ key: "ArrowUp", alt, shift }` | `alt_shift_arrowup` |
//! | Ctrl+A keydown | `meta_a` |

use crate::core::types::{Chord, KeyEvent};

fn encode(meta: bool, alt: bool, shift: bool, key: &str) -> String {
    let key = key.trim().to_lowercase();
    let mut hash = String::with_capacity(key.len() + 16);

    if meta {
        hash.push_str("meta_");
    }
    if alt {
        hash.push_str("alt_");
    }
    if shift {
        hash.push_str("shift_");
    }
    hash.push_str(&key);

    hash
}

/// Hashes a shortcut's chord definition.
pub fn hash_chord(chord: &Chord) -> String {
    encode(chord.meta, chord.alt, chord.shift, &chord.key)
}

/// Hashes a live key-down event so that it matches `hash_chord`.
///
/// Control and meta both count as the definition's `meta` flag, so one
/// definition serves the Command and Ctrl conventions.
pub fn hash_key_event(event: &KeyEvent) -> String {
    encode(event.meta || event.ctrl, event.alt, event.shift, &event.key)
}

/// Canonical form of a gesture path: trimmed and lower-cased.
pub fn normalize_gesture(path: &str) -> String {
    path.trim().to_lowercase()
}
