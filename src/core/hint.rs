//! Live feedback while a multi-segment gesture is in progress
//!
//! The controller owns a single hint timer and moves between three states:
//!
//! ```text
//!            segment (match)                 timer fires
//!   Idle ───────────────────▶ PendingHint ───────────────▶ HintShown
//!    ▲  ◀───────────────────       │  ▲                        │
//!    │   segment (no match,        │  └────────────────────────┘
//!    │   nothing visible)          │     segment (0 ms delay)
//!    └─────────────────────────────┴──── gesture end
//! ```
//!
//! Hints wait the full configured delay while nothing is visible so quick
//! gestures never flash feedback. Once a hint is visible every further
//! segment updates it immediately, including the invalid-gesture signal,
//! which is never shown on its own.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::timers::{Task, TimerId, TimerQueue};
use crate::core::types::{Host, Shortcut, UiState};

/// Hint text for a path that matches no shortcut.
pub const INVALID_GESTURE: &str = "✗ Invalid gesture";

/// Observable state of the hint controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HintPhase {
    Idle,
    PendingHint(TimerId),
    HintShown,
}

/// Single-timer gesture hint state machine.
#[derive(Debug)]
pub struct GestureHints {
    delay: Duration,
    pending: Option<TimerId>,
    shown: bool,
}

impl GestureHints {
    /// `delay` is how long a segment must stand before the first hint.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            shown: false,
        }
    }

    pub fn phase(&self) -> HintPhase {
        match (self.pending, self.shown) {
            (Some(id), _) => HintPhase::PendingHint(id),
            (None, true) => HintPhase::HintShown,
            (None, false) => HintPhase::Idle,
        }
    }

    /// Handles one incremental segment of an in-progress gesture.
    ///
    /// `matched` is the shortcut the path so far resolves to. Returns the
    /// delay of the newly scheduled hint, or `None` when nothing was
    /// scheduled.
    pub fn on_segment(
        &mut self,
        path: &str,
        matched: Option<&Shortcut>,
        ui: &UiState,
        timers: &mut TimerQueue,
        now: Instant,
    ) -> Option<Duration> {
        if ui.overlay_or_scroll() || ui.modal_or_drag() {
            debug!(path, "gesture hint suppressed by guard state");
            return None;
        }

        self.cancel_pending(timers);

        let visible = self.shown || ui.alert.is_some();
        let message = match matched {
            Some(shortcut) => shortcut.name.clone(),
            None if visible => INVALID_GESTURE.to_string(),
            None => return None,
        };

        let delay = if visible { Duration::ZERO } else { self.delay };
        debug!(path, %message, ?delay, "scheduling gesture hint");
        self.pending = Some(timers.schedule(now, delay, Task::ShowHint(message)));

        Some(delay)
    }

    /// Shows the hint carried by a fired timer.
    ///
    /// Stale ids (a timer that was superseded but already drained) are
    /// ignored.
    pub fn fire(&mut self, id: TimerId, message: &str, host: &mut dyn Host) {
        if self.pending != Some(id) {
            debug!(%id, "ignoring stale gesture hint");
            return;
        }

        self.pending = None;
        self.shown = true;
        host.set_alert(Some(message));
    }

    /// Resets to idle at the end of a gesture and defers the alert clear to
    /// the next tick.
    pub fn on_end(&mut self, timers: &mut TimerQueue, now: Instant) -> TimerId {
        self.cancel_pending(timers);
        self.shown = false;
        timers.defer(now, Task::ClearHint)
    }

    /// Runs the deferred clear scheduled by `on_end`.
    pub fn clear(&mut self, host: &mut dyn Host) {
        host.set_alert(None);
    }

    fn cancel_pending(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }
}
