//! Deterministic replay of timed input scripts
//!
//! Drives a [`Dispatcher`] built from a manifest with a scripted clock and
//! a recording host. Every observable side effect (executions, listener
//! notifications, alerts, cursor refreshes, suppression changes) ends up in
//! an ordered log stamped with its script time.

pub mod script;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Manifest;
use crate::core::dispatcher::Dispatcher;
use crate::core::types::{shared_action, ExecContext, GestureEvent, Host, KeyEvent, UiState};

pub use script::{parse_script, ScriptCommand, ScriptError, ScriptEvent, StateChange};

/// A side effect observed during replay.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    /// A shortcut's action ran
    Executed { id: String, context: ExecContext },
    /// A listener was told about a matched keyboard shortcut
    Notified { id: String },
    /// The key event had its default behaviour suppressed
    DefaultPrevented { key: String },
    /// A gesture segment scheduled a hint
    HintScheduled { path: String, delay: Duration },
    /// The host alert was set or cleared
    Alert(Option<String>),
    CursorRefresh,
    /// The expansion-suppression flag flipped
    Suppression(bool),
    /// Guard state changed by the script
    State(StateChange),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Executed { id, context } => write!(f, "exec {} ({})", id, context),
            Effect::Notified { id } => write!(f, "listener {}", id),
            Effect::DefaultPrevented { key } => write!(f, "prevent default on {}", key),
            Effect::HintScheduled { path, delay } => {
                write!(f, "hint for '{}' in {} ms", path, delay.as_millis())
            }
            Effect::Alert(Some(message)) => write!(f, "alert \"{}\"", message),
            Effect::Alert(None) => write!(f, "alert cleared"),
            Effect::CursorRefresh => write!(f, "cursor refresh"),
            Effect::Suppression(on) => write!(f, "suppress expansion = {}", on),
            Effect::State(change) => write!(f, "state {:?}", change),
        }
    }
}

/// An effect with the script time it happened at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub at_ms: u64,
    pub effect: Effect,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:<6} {}", self.at_ms, self.effect)
    }
}

/// Shared between the host, the actions and the listener.
#[derive(Clone, Default)]
struct Recorder {
    clock_ms: Rc<Cell<u64>>,
    records: Rc<RefCell<Vec<Record>>>,
}

impl Recorder {
    fn push(&self, effect: Effect) {
        self.records.borrow_mut().push(Record {
            at_ms: self.clock_ms.get(),
            effect,
        });
    }
}

/// Host with scripted guard state that records what the dispatcher asks of it.
struct ReplayHost {
    ui: UiState,
    recorder: Recorder,
}

impl Host for ReplayHost {
    fn ui_state(&self) -> UiState {
        self.ui.clone()
    }

    fn set_alert(&mut self, message: Option<&str>) {
        self.ui.alert = message.map(str::to_string);
        self.recorder.push(Effect::Alert(self.ui.alert.clone()));
    }

    fn refresh_cursor(&mut self) {
        self.recorder.push(Effect::CursorRefresh);
    }
}

/// Replays script events against the shortcuts of a manifest.
pub struct Replay {
    dispatcher: Dispatcher,
    host: ReplayHost,
    recorder: Recorder,
    start: Instant,
    suppressed: bool,
}

impl Replay {
    /// Every manifest entry gets an action that records its execution.
    pub fn new(manifest: Manifest) -> Self {
        let recorder = Recorder::default();
        let settings = manifest.settings;

        let shortcuts = manifest.into_shortcuts(|entry| {
            let recorder = recorder.clone();
            let id = entry.id.clone();
            shared_action(move |_, context| {
                recorder.push(Effect::Executed {
                    id: id.clone(),
                    context,
                });
            })
        });

        let mut dispatcher = Dispatcher::new(shortcuts, settings);
        let listener_recorder = recorder.clone();
        dispatcher.add_listener(move |fired| {
            listener_recorder.push(Effect::Notified {
                id: fired.id.clone(),
            });
        });

        Self {
            dispatcher,
            host: ReplayHost {
                ui: UiState::default(),
                recorder: recorder.clone(),
            },
            recorder,
            start: Instant::now(),
            suppressed: false,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Guard state as last set by the script, including the current alert.
    pub fn ui_state(&self) -> &UiState {
        &self.host.ui
    }

    /// Runs every event, then lets outstanding timers fire.
    pub fn run(&mut self, events: &[ScriptEvent]) -> Vec<Record> {
        for event in events {
            self.step(event);
        }
        self.finish();
        self.records()
    }

    /// Fires timers due up to the event's time, then applies the event.
    pub fn step(&mut self, event: &ScriptEvent) {
        self.advance_to(event.at_ms);
        let now = self.instant(event.at_ms);
        debug!(line = event.line, at_ms = event.at_ms, command = ?event.command, "replaying");

        match &event.command {
            ScriptCommand::KeyDown(chord) => {
                let mut key_event = KeyEvent::from_chord(chord);
                self.dispatcher
                    .handle_key_down(&mut key_event, &mut self.host, now);
                if key_event.is_default_prevented() {
                    self.recorder.push(Effect::DefaultPrevented {
                        key: chord.to_string(),
                    });
                }
            }
            ScriptCommand::KeyUp(key) => {
                self.dispatcher
                    .handle_key_up(&KeyEvent::new(key), &mut self.host);
            }
            ScriptCommand::Segment(path) => {
                let scheduled = self.dispatcher.handle_gesture_segment(
                    path,
                    &GestureEvent::default(),
                    &mut self.host,
                    now,
                );
                if let Some(delay) = scheduled {
                    self.recorder.push(Effect::HintScheduled {
                        path: path.clone(),
                        delay,
                    });
                }
            }
            ScriptCommand::End(path) => {
                self.dispatcher.handle_gesture_end(
                    path.as_deref(),
                    &GestureEvent::default(),
                    &mut self.host,
                    now,
                );
            }
            ScriptCommand::Tick => {}
            ScriptCommand::Set(change) => {
                self.apply(change);
                self.recorder.push(Effect::State(change.clone()));
            }
        }

        self.note_suppression();
    }

    /// Fires remaining timers in deadline order.
    pub fn finish(&mut self) {
        while let Some(deadline) = self.dispatcher.next_deadline() {
            self.fire_at(deadline);
        }
    }

    pub fn records(&self) -> Vec<Record> {
        self.recorder.records.borrow().clone()
    }

    fn advance_to(&mut self, at_ms: u64) {
        self.recorder.clock_ms.set(at_ms);
        let now = self.instant(at_ms);

        loop {
            match self.dispatcher.next_deadline() {
                Some(deadline) if deadline <= now => self.fire_at(deadline),
                _ => break,
            }
        }

        self.recorder.clock_ms.set(at_ms);
    }

    fn fire_at(&mut self, deadline: Instant) {
        let at_ms = deadline.saturating_duration_since(self.start).as_millis();
        self.recorder
            .clock_ms
            .set(u64::try_from(at_ms).unwrap_or(u64::MAX));
        self.dispatcher.tick(&mut self.host, deadline);
        self.note_suppression();
    }

    fn note_suppression(&mut self) {
        let suppressed = self.dispatcher.suppress_expansion();
        if suppressed != self.suppressed {
            self.suppressed = suppressed;
            self.recorder.push(Effect::Suppression(suppressed));
        }
    }

    fn apply(&mut self, change: &StateChange) {
        let ui = &mut self.host.ui;
        match change {
            StateChange::Overlay(on) => ui.toolbar_overlay = *on,
            StateChange::Scroll(on) => ui.scroll_prioritized = *on,
            StateChange::Drag(on) => ui.drag_in_progress = *on,
            StateChange::Modal(modal) => ui.modal = modal.clone(),
        }
    }

    fn instant(&self, at_ms: u64) -> Instant {
        self.start + Duration::from_millis(at_ms)
    }
}

#[cfg(test)]
mod tests;
