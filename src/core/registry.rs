//! O(1) shortcut lookup by chord, id and gesture path
//!
//! The registry is built once from an ordered list of definitions and never
//! mutated afterwards. Three `HashMap` indices are kept:
//!
//! - canonical chord key → shortcut (only definitions with a chord)
//! - id → shortcut
//! - canonical gesture path → shortcut (every alias of a definition)
//!
//! # Collisions
//! When two definitions normalise to the same key the later one wins, as
//! in a plain insert. Every such shadowing is recorded as a `Collision` so
//! configuration mistakes surface at construction time instead of as a
//! silently unreachable shortcut.
//!
//! # Performance
//! - Build: O(n) in the number of definitions and aliases
//! - Lookup: O(1) average case

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::core::codec::{hash_chord, normalize_gesture};
use crate::core::types::Shortcut;

/// Which index a collision happened in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CollisionKind {
    Chord,
    Gesture,
    Id,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::Chord => write!(f, "chord"),
            CollisionKind::Gesture => write!(f, "gesture"),
            CollisionKind::Id => write!(f, "id"),
        }
    }
}

/// Two or more definitions sharing one canonical key.
#[derive(Clone, Debug, PartialEq)]
pub struct Collision {
    pub kind: CollisionKind,

    /// The canonical key all definitions normalised to
    pub key: String,

    /// Ids of the colliding definitions in registration order.
    /// The last one is the definition the index resolves to.
    pub shortcut_ids: Vec<String>,
}

impl Collision {
    /// Id of the definition that shadows the others.
    pub fn winner(&self) -> Option<&str> {
        self.shortcut_ids.last().map(String::as_str)
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' claimed by {}", self.kind, self.key, self.shortcut_ids.join(", "))
    }
}

/// Immutable shortcut indices.
#[derive(Debug, Default)]
pub struct Registry {
    shortcuts: Vec<Rc<Shortcut>>,
    by_chord: HashMap<String, Rc<Shortcut>>,
    by_id: HashMap<String, Rc<Shortcut>>,
    by_gesture: HashMap<String, Rc<Shortcut>>,
    collisions: Vec<Collision>,
}

impl Registry {
    /// Builds all indices from `shortcuts` in order.
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        let shortcuts: Vec<Rc<Shortcut>> = shortcuts.into_iter().map(Rc::new).collect();

        // Every definition claiming each key, in order, to report shadowing
        let mut claims: HashMap<(CollisionKind, String), Vec<usize>> = HashMap::new();
        let mut claim_order: Vec<(CollisionKind, String)> = Vec::new();
        let mut claim = |kind: CollisionKind, key: &str, index: usize| {
            let entry_key = (kind, key.to_string());
            let indices = claims.entry(entry_key.clone()).or_default();
            if indices.is_empty() {
                claim_order.push(entry_key);
            }
            // One definition listing the same alias twice is not a collision
            if indices.last() != Some(&index) {
                indices.push(index);
            }
        };

        let mut by_chord = HashMap::new();
        let mut by_id = HashMap::new();
        let mut by_gesture = HashMap::new();

        for (index, shortcut) in shortcuts.iter().enumerate() {
            if let Some(chord) = &shortcut.chord {
                let key = hash_chord(chord);
                claim(CollisionKind::Chord, &key, index);
                by_chord.insert(key, Rc::clone(shortcut));
            }

            if !shortcut.id.is_empty() {
                claim(CollisionKind::Id, &shortcut.id, index);
                by_id.insert(shortcut.id.clone(), Rc::clone(shortcut));
            }

            // Flatten aliases onto the same shortcut
            for gesture in &shortcut.gestures {
                let path = normalize_gesture(gesture);
                if path.is_empty() {
                    continue;
                }
                claim(CollisionKind::Gesture, &path, index);
                by_gesture.insert(path, Rc::clone(shortcut));
            }
        }

        let collisions: Vec<Collision> = claim_order
            .into_iter()
            .filter_map(|entry_key| {
                let indices = claims.remove(&entry_key)?;
                (indices.len() > 1).then(|| Collision {
                    kind: entry_key.0,
                    key: entry_key.1,
                    shortcut_ids: indices.iter().map(|&i| shortcuts[i].id.clone()).collect(),
                })
            })
            .collect();

        for collision in &collisions {
            warn!(
                kind = %collision.kind,
                key = %collision.key,
                winner = collision.winner().unwrap_or_default(),
                "shortcut definitions collide; last registered wins"
            );
        }

        Self {
            shortcuts,
            by_chord,
            by_id,
            by_gesture,
            collisions,
        }
    }

    /// Looks up a canonical chord key as produced by the codec.
    pub fn lookup_by_chord(&self, key: &str) -> Option<Rc<Shortcut>> {
        self.by_chord.get(key).cloned()
    }

    pub fn lookup_by_id(&self, id: &str) -> Option<Rc<Shortcut>> {
        self.by_id.get(id).cloned()
    }

    /// Looks up a gesture path. The path is normalised first.
    pub fn lookup_by_gesture(&self, path: &str) -> Option<Rc<Shortcut>> {
        self.by_gesture.get(&normalize_gesture(path)).cloned()
    }

    /// All shadowed definitions found while building.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Shortcut>> {
        self.shortcuts.iter()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}
