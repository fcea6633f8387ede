// Copyright 2025 bakri (tidynest@proton.me)
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

//! Shortcut Dispatch
//!
//! Routes keyboard chords and mouse gestures to named application commands,
//! with delayed gesture hints and modifier-hold expansion suppression.
//!
//! # Features
//!
//! - **Unified Registry:** One shortcut reachable by chord, gesture aliases or id
//! - **Canonical Chord Keys:** Platform-generic meta marker, case-insensitive keys
//! - **Gesture Hints:** Delayed first hint, instant updates while visible
//! - **Expansion Suppression:** Holding the platform modifier past a delay
//! - **Guard Conditions:** Overlays, scroll priority, modals and drags
//! - **Deterministic Timers:** Explicit clock, fired only from `tick`
//!
//! # Architecture
//!
//! - **`core`:** Engine (types, codec, registry, timers, hint and
//!   suppression controllers, dispatcher façade, display formatting)
//! - **`config`:** Shortcut manifests (parsing, validation, settings)
//! - **`replay`:** Timed event scripts replayed against a dispatcher
//!
//! # Examples
//!
//! ## Loading a manifest
//!
//! ```no_run
//! use shortcut_dispatch::config::Manifest;
//! use shortcut_dispatch::core::{shared_action, Registry};
//! use std::path::PathBuf;
//!
//! let manifest = Manifest::load(PathBuf::from("/tmp/shortcuts.conf"))?;
//! let registry = Registry::new(manifest.into_shortcuts(|_| shared_action(|_, _| {})));
//! println!("Loaded {} shortcuts", registry.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Replaying a script
//!
//! ```
//! use shortcut_dispatch::config::parse_manifest;
//! use shortcut_dispatch::replay::{parse_script, Replay};
//!
//! let manifest = parse_manifest("shortcut = archive, Archive, META+A, -")?;
//! let events = parse_script("@0 keydown META+a")?;
//!
//! for record in Replay::new(manifest).run(&events) {
//!     println!("{}", record);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod replay;

// Re-export commonly used types for convenience
pub use core::{Chord, Dispatcher, Registry, Shortcut};
