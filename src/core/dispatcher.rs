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

//! Façade invoked by the event source for every key and gesture event
//!
//! # Responsibilities
//!
//! - Track the expansion-suppression modifier on every key-down/key-up
//! - Enforce guard conditions (overlay, scroll priority, modals, drags)
//! - Resolve chords and gesture paths through the registry
//! - Execute matched shortcuts with a keyboard or gesture context
//! - Drive the gesture hint and suppression timers from `tick`
//! - Notify registered listeners whenever a keyboard shortcut matches
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Instant;
//! use shortcut_dispatch::config::Settings;
//! use shortcut_dispatch::core::{Chord, Dispatcher, Host, KeyEvent, Shortcut, UiState};
//!
//! struct NoopHost;
//! impl Host for NoopHost {
//!     fn ui_state(&self) -> UiState { UiState::default() }
//!     fn set_alert(&mut self, _: Option<&str>) {}
//!     fn refresh_cursor(&mut self) {}
//! }
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&runs);
//! let archive = Shortcut::from_fn("archive", "Archive", move |_, _| counter.set(counter.get() + 1))
//!     .with_chord(Chord::meta("a"));
//!
//! let mut dispatcher = Dispatcher::new(vec![archive], Settings::default());
//! let mut event = KeyEvent::new("a").with_meta();
//! dispatcher.handle_key_down(&mut event, &mut NoopHost, Instant::now());
//!
//! assert_eq!(runs.get(), 1);
//! assert!(event.is_default_prevented());
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Settings;
use crate::core::codec::hash_key_event;
use crate::core::hint::{GestureHints, HintPhase};
use crate::core::registry::Registry;
use crate::core::suppression::ModifierSuppression;
use crate::core::timers::{Task, TimerQueue};
use crate::core::types::{
    ExecContext, GestureEvent, Host, InputEvent, KeyEvent, Shortcut, ShortcutFired,
};

/// Handle returned by [`Dispatcher::add_listener`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ShortcutFired)>;

/// Routes input events to shortcuts.
///
/// Owns the registry, both timer controllers and the timer queue they
/// share. All methods run to completion; timers only fire from `tick`.
pub struct Dispatcher {
    registry: Registry,
    settings: Settings,
    timers: TimerQueue,
    hints: GestureHints,
    suppression: ModifierSuppression,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Dispatcher {
    /// Builds the registry from `shortcuts` and idle controllers from
    /// `settings`.
    pub fn new(shortcuts: Vec<Shortcut>, settings: Settings) -> Self {
        Self::with_registry(Registry::new(shortcuts), settings)
    }

    pub fn with_registry(registry: Registry, settings: Settings) -> Self {
        Self {
            registry,
            settings,
            timers: TimerQueue::new(),
            hints: GestureHints::new(settings.gesture_hint_delay),
            suppression: ModifierSuppression::new(settings.suppress_delay),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// True while the designated modifier has been held past the delay.
    pub fn suppress_expansion(&self) -> bool {
        self.suppression.is_suppressed()
    }

    pub fn hint_phase(&self) -> HintPhase {
        self.hints.phase()
    }

    /// Number of scheduled timers not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When `tick` next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Registers a listener called each time a keyboard chord matches a
    /// shortcut, before its execution guard is consulted.
    pub fn add_listener(&mut self, listener: impl FnMut(&ShortcutFired) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Global key-down handler.
    ///
    /// Suppression bookkeeping always runs; overlays, scroll priority and
    /// the welcome/help/feedback modals then block dispatch.
    pub fn handle_key_down(&mut self, event: &mut KeyEvent, host: &mut dyn Host, now: Instant) {
        if event.key == self.settings.platform.expansion_modifier() {
            self.suppression.on_modifier_down(&mut self.timers, now);
        } else {
            self.suppression.on_other_key_down(&mut self.timers);
        }

        let ui = host.ui_state();
        if ui.overlay_or_scroll() || ui.modal.as_ref().is_some_and(|modal| modal.blocks_keyboard()) {
            debug!(key = %event.key, "key dispatch blocked by guard state");
            return;
        }

        let hash = hash_key_event(event);
        let Some(shortcut) = self.registry.lookup_by_chord(&hash) else {
            return;
        };

        self.notify(&ShortcutFired {
            id: shortcut.id.clone(),
            name: shortcut.name.clone(),
        });

        // Default behaviour is suppressed unless the guard declines
        if shortcut.can_execute(event) {
            event.prevent_default();
            debug!(id = %shortcut.id, %hash, "executing keyboard shortcut");
            shortcut.exec(&InputEvent::Key(event), ExecContext::Keyboard);
        } else {
            debug!(id = %shortcut.id, "shortcut declined to execute");
        }
    }

    /// Global key-up handler. Runs regardless of guard state.
    pub fn handle_key_up(&mut self, event: &KeyEvent, host: &mut dyn Host) {
        if event.key == self.settings.platform.expansion_modifier() {
            self.suppression.on_modifier_up(&mut self.timers, host);
        }
    }

    /// Handles one incremental segment of a gesture.
    ///
    /// `path` is the cumulative path so far. Returns the delay of the hint
    /// that was scheduled, if any.
    pub fn handle_gesture_segment(
        &mut self,
        path: &str,
        _event: &GestureEvent,
        host: &mut dyn Host,
        now: Instant,
    ) -> Option<Duration> {
        let ui = host.ui_state();
        let matched = self.registry.lookup_by_gesture(path);
        self.hints
            .on_segment(path, matched.as_deref(), &ui, &mut self.timers, now)
    }

    /// Handles the end of a gesture.
    ///
    /// A `None` path (gesture abandoned) executes nothing. The hint is
    /// always reset, and cleared from the host on the next tick.
    pub fn handle_gesture_end(
        &mut self,
        path: Option<&str>,
        event: &GestureEvent,
        host: &mut dyn Host,
        now: Instant,
    ) {
        let ui = host.ui_state();

        if let Some(path) = path.filter(|_| !ui.modal_or_drag()) {
            if let Some(shortcut) = self.registry.lookup_by_gesture(path) {
                debug!(id = %shortcut.id, path, "executing gesture shortcut");
                shortcut.exec(&InputEvent::Gesture(event), ExecContext::Gesture);
            }
        }

        self.hints.on_end(&mut self.timers, now);
    }

    /// Fires every timer due at `now`.
    ///
    /// Tasks scheduled while these run wait for the next tick. Returns the
    /// number of tasks fired.
    pub fn tick(&mut self, host: &mut dyn Host, now: Instant) -> usize {
        let due = self.timers.drain_due(now);
        let fired = due.len();

        for (id, task) in due {
            match task {
                Task::ShowHint(message) => self.hints.fire(id, &message, host),
                Task::ClearHint => self.hints.clear(host),
                Task::SuppressExpansion => self.suppression.fire(id, host),
            }
        }

        fired
    }

    fn notify(&mut self, fired: &ShortcutFired) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(fired);
        }
    }
}
