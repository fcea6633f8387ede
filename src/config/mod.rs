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

//! Static configuration for the dispatch engine.
//!
//! This module provides:
//!
//! - **`Settings`**: The two timer delays and the platform flag
//! - **`Platform`**: Which modifier is "meta" and how it is labelled
//! - **`Manifest`**: Shortcut definitions plus settings loaded from a file
//!
//! # Example
//!
//! ```no_run
//! use shortcut_dispatch::config::Manifest;
//!
//! let manifest = Manifest::load("/home/user/.config/shortcuts.conf".into())?;
//! println!("{} shortcuts", manifest.entries.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod manifest;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tracing::warn;

use crate::core::types::{Action, Chord, Shortcut};

pub use error::ConfigError;
pub use manifest::{parse_manifest, ManifestError};

/// Default wait before the first gesture hint appears.
pub const DEFAULT_GESTURE_HINT_DELAY: Duration = Duration::from_millis(500);

/// Default time the modifier must be held before expansion is suppressed.
pub const DEFAULT_SUPPRESS_DELAY: Duration = Duration::from_millis(100);

/// Host platform, as far as shortcut handling is concerned.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Meta is the Command key
    Mac,
    /// Meta is the Control key
    #[default]
    Other,
}

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Key identifier of the modifier that suppresses expansion while held.
    pub fn expansion_modifier(&self) -> &'static str {
        match self {
            Platform::Mac => "Meta",
            Platform::Other => "Control",
        }
    }

    pub fn meta_label(&self) -> &'static str {
        match self {
            Platform::Mac => "Command",
            Platform::Other => "Ctrl",
        }
    }

    pub fn alt_label(&self) -> &'static str {
        match self {
            Platform::Mac => "Option",
            Platform::Other => "Alt",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Mac => write!(f, "mac"),
            Platform::Other => write!(f, "other"),
        }
    }
}

/// Delays and platform consumed by the dispatcher.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Settings {
    /// Wait before the first hint of a gesture is shown
    pub gesture_hint_delay: Duration,

    /// Hold time before the modifier suppresses expansion
    pub suppress_delay: Duration,

    pub platform: Platform,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gesture_hint_delay: DEFAULT_GESTURE_HINT_DELAY,
            suppress_delay: DEFAULT_SUPPRESS_DELAY,
            platform: Platform::default(),
        }
    }
}

/// One `shortcut = ...` line of a manifest, without its action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShortcutEntry {
    pub id: String,
    pub name: String,
    pub chord: Option<Chord>,
    pub gestures: Vec<String>,

    /// 1-based line the entry was declared on
    pub line: usize,
}

/// Parsed manifest: settings plus shortcut entries in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    pub settings: Settings,
    pub entries: Vec<ShortcutEntry>,
}

impl Manifest {
    /// Reads and parses a manifest file.
    ///
    /// A symlinked manifest is allowed but logged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Io` if it cannot be read and `ConfigError::Manifest`
    /// if any line fails to parse or validate.
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        if path.read_link().is_ok() {
            warn!(path = %path.display(), "manifest is a symlink");
        }

        let content = fs::read_to_string(&path)?;
        Ok(parse_manifest(&content)?)
    }

    /// Attaches an action to every entry, producing registry input.
    ///
    /// `make_action` is called once per entry in file order.
    pub fn into_shortcuts<F>(self, mut make_action: F) -> Vec<Shortcut>
    where
        F: FnMut(&ShortcutEntry) -> Rc<dyn Action>,
    {
        self.entries
            .iter()
            .map(|entry| {
                let mut shortcut =
                    Shortcut::with_shared_action(&entry.id, &entry.name, make_action(entry));
                shortcut.chord = entry.chord.clone();
                shortcut.gestures = entry.gestures.clone();
                shortcut
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
