// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/types.rs
//!
//! Core type definitions for shortcut dispatch
//!
//! This module defines the fundamental types used throughout the engine:
//! - `Chord`: A primary key plus meta/alt/shift flags
//! - `Shortcut`: A named command reachable by chord, gesture or id
//! - `Action`: The external command a shortcut executes
//! - `KeyEvent` / `GestureEvent`: Raw input handed over by the event source
//! - `UiState` / `Modal`: Read-only snapshot of the guard conditions
//! - `Host`: The external collaborator receiving alerts and cursor refreshes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// A key plus the modifier flags that must be held with it.
///
/// Definitions are stored as written; normalisation happens in the codec
/// so that the original key name is still available for display.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Chord {
    /// Primary key name or character (e.g. "a", "Enter", "ArrowUp")
    pub key: String,

    /// Command on macOS, Control elsewhere
    #[serde(default)]
    pub meta: bool,

    /// Alt / Option
    #[serde(default)]
    pub alt: bool,

    /// Shift
    #[serde(default)]
    pub shift: bool,
}

impl Chord {
    /// A chord without modifiers (the bare key-string form).
    pub fn key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    /// Meta+key.
    pub fn meta(key: &str) -> Self {
        Self {
            key: key.to_string(),
            meta: true,
            ..Default::default()
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.meta {
            write!(f, "META+")?;
        }
        if self.alt {
            write!(f, "ALT+")?;
        }
        if self.shift {
            write!(f, "SHIFT+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Tags an execution with the input modality that triggered it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExecContext {
    /// Triggered by a key-down chord
    Keyboard,
    /// Triggered by a completed gesture
    Gesture,
}

impl fmt::Display for ExecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecContext::Keyboard => write!(f, "keyboard"),
            ExecContext::Gesture => write!(f, "gesture"),
        }
    }
}

/// A live key-down or key-up event.
///
/// `ctrl` is kept separate from `meta` so the codec can fold the two into
/// the single platform-generic meta marker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyEvent {
    /// Key identifier as reported by the event source ("a", "A", "Meta")
    pub key: String,
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    default_prevented: bool,
}

impl KeyEvent {
    /// An event for `key` with no modifiers pressed.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    /// Builds the event a user would produce by pressing `chord`.
    pub fn from_chord(chord: &Chord) -> Self {
        Self {
            key: chord.key.clone(),
            meta: chord.meta,
            alt: chord.alt,
            shift: chord.shift,
            ..Default::default()
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Marks the event as handled so the host skips its default behaviour.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The raw pointer event that produced a gesture segment or end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureEvent {
    pub x: f32,
    pub y: f32,
}

/// The event an action receives, whichever modality triggered it.
#[derive(Clone, Copy, Debug)]
pub enum InputEvent<'a> {
    Key(&'a KeyEvent),
    Gesture(&'a GestureEvent),
}

/// An externally supplied command.
///
/// Implemented for any `Fn(&InputEvent, ExecContext)` closure, which covers
/// shortcuts without an execution guard.
pub trait Action {
    /// Runs the command. The dispatcher neither awaits nor retries it.
    fn exec(&self, event: &InputEvent<'_>, context: ExecContext);

    /// Keyboard-only guard. Returning false lets the key through untouched.
    fn can_execute(&self, _event: &KeyEvent) -> bool {
        true
    }
}

impl<F> Action for F
where
    F: Fn(&InputEvent<'_>, ExecContext),
{
    fn exec(&self, event: &InputEvent<'_>, context: ExecContext) {
        self(event, context)
    }
}

/// Wraps a closure as a shareable action, e.g. for `Manifest::into_shortcuts`.
pub fn shared_action<F>(action: F) -> Rc<dyn Action>
where
    F: Fn(&InputEvent<'_>, ExecContext) + 'static,
{
    Rc::new(action)
}

/// A named application command with its triggers.
///
/// # Example
/// ```
/// use shortcut_dispatch::core::{Chord, Shortcut};
///
/// let archive = Shortcut::from_fn("archive", "Archive", |_, _| {})
///     .with_chord(Chord::meta("a"))
///     .with_gesture("rdl");
/// assert_eq!(archive.gestures, vec!["rdl".to_string()]);
/// ```
#[derive(Clone)]
pub struct Shortcut {
    /// Stable identifier, unique across the registry
    pub id: String,

    /// Display name used for gesture hints and listings
    pub name: String,

    /// Keyboard trigger, if any
    pub chord: Option<Chord>,

    /// Gesture path aliases; every alias triggers the same shortcut
    pub gestures: Vec<String>,

    action: Rc<dyn Action>,
}

impl Shortcut {
    pub fn new(id: &str, name: &str, action: impl Action + 'static) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            chord: None,
            gestures: Vec::new(),
            action: Rc::new(action),
        }
    }

    /// Builds a shortcut from a closure, which is the common case for
    /// actions without an execution guard.
    pub fn from_fn<F>(id: &str, name: &str, action: F) -> Self
    where
        F: Fn(&InputEvent<'_>, ExecContext) + 'static,
    {
        Self::new(id, name, action)
    }

    /// Builds a shortcut around an already shared action.
    pub fn with_shared_action(id: &str, name: &str, action: Rc<dyn Action>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            chord: None,
            gestures: Vec::new(),
            action,
        }
    }

    pub fn with_chord(mut self, chord: Chord) -> Self {
        self.chord = Some(chord);
        self
    }

    /// Adds a gesture alias. Call repeatedly for multiple aliases.
    pub fn with_gesture(mut self, path: &str) -> Self {
        self.gestures.push(path.to_string());
        self
    }

    pub fn exec(&self, event: &InputEvent<'_>, context: ExecContext) {
        self.action.exec(event, context);
    }

    pub fn can_execute(&self, event: &KeyEvent) -> bool {
        self.action.can_execute(event)
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("chord", &self.chord)
            .field("gestures", &self.gestures)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.name)?;

        if let Some(chord) = &self.chord {
            write!(f, " [{}]", chord)?;
        }
        if !self.gestures.is_empty() {
            write!(f, " <{}>", self.gestures.join("|"))?;
        }

        Ok(())
    }
}

/// The currently open modal, as reported by the application state.
///
/// Welcome, help and feedback block keyboard dispatch entirely; any modal
/// at all blocks gesture hinting and execution.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modal {
    Welcome,
    Help,
    Feedback,
    Other(String),
}

impl Modal {
    /// Parses a modal name, mapping unknown names to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "welcome" => Modal::Welcome,
            "help" => Modal::Help,
            "feedback" => Modal::Feedback,
            other => Modal::Other(other.to_string()),
        }
    }

    /// True for the modals that disable keyboard shortcuts.
    pub fn blocks_keyboard(&self) -> bool {
        matches!(self, Modal::Welcome | Modal::Help | Modal::Feedback)
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modal::Welcome => write!(f, "welcome"),
            Modal::Help => write!(f, "help"),
            Modal::Feedback => write!(f, "feedback"),
            Modal::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Snapshot of the external state the dispatcher consults for guards.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UiState {
    /// A toolbar overlay is displayed
    pub toolbar_overlay: bool,

    /// Scrolling takes priority over gestures
    pub scroll_prioritized: bool,

    /// The open modal, if any
    pub modal: Option<Modal>,

    /// A drag is in progress
    pub drag_in_progress: bool,

    /// The alert currently displayed, if any
    pub alert: Option<String>,
}

impl UiState {
    /// Overlay or scroll priority: disables keyboard dispatch and hinting.
    pub fn overlay_or_scroll(&self) -> bool {
        self.toolbar_overlay || self.scroll_prioritized
    }

    /// Any modal or drag: disables gesture hinting and gesture execution.
    pub fn modal_or_drag(&self) -> bool {
        self.modal.is_some() || self.drag_in_progress
    }
}

/// External collaborator: state queries plus the side effects the engine
/// emits.
pub trait Host {
    /// Current guard state. Called once per handled event.
    fn ui_state(&self) -> UiState;

    /// Displays `Some(message)` or clears the alert with `None`.
    fn set_alert(&mut self, message: Option<&str>);

    /// Asks the state container to re-derive cursor-dependent display.
    fn refresh_cursor(&mut self);
}

/// Payload broadcast to listeners whenever a keyboard chord matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ShortcutFired {
    pub id: String,
    pub name: String,
}
