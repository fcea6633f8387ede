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

//! src/core/mod.rs
//!
//! Core dispatch logic module
//!
//! This module contains the data structures and state machines that turn
//! raw input into shortcut executions:
//! - Type definitions for shortcuts, chords, events and guard state
//! - Canonical hashing of chords and gesture paths
//! - HashMap-based O(1) registry with collision diagnostics
//! - Gesture hint and modifier suppression controllers on a shared timer queue
//! - The dispatcher façade tying them together
//!
//! Nothing here touches a display server or a real clock, so every
//! transition can be unit tested with synthetic events and instants.

pub mod codec;
pub mod dispatcher;
pub mod format;
pub mod hint;
pub mod registry;
pub mod suppression;
pub mod timers;
pub mod types;

pub use codec::{hash_chord, hash_key_event, normalize_gesture};
pub use dispatcher::{Dispatcher, ListenerId};
pub use format::{format_display_chord, format_gesture};
pub use hint::{GestureHints, HintPhase, INVALID_GESTURE};
pub use registry::{Collision, CollisionKind, Registry};
pub use suppression::ModifierSuppression;
pub use timers::{Task, TimerId, TimerQueue};
pub use types::*;

#[cfg(test)]
mod tests;
