//! Suppresses cursor expansion while the platform modifier is held
//!
//! Pressing the designated modifier (Meta on macOS, Control elsewhere)
//! starts a timer. If the key is still down when it fires, the suppression
//! flag goes up and the host re-derives cursor-dependent display. Releasing
//! the key, or pressing any other key, drops the flag at once.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::timers::{Task, TimerId, TimerQueue};
use crate::core::types::Host;

#[derive(Debug)]
pub struct ModifierSuppression {
    delay: Duration,
    pending: Option<TimerId>,
    suppressed: bool,
}

impl ModifierSuppression {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            suppressed: false,
        }
    }

    /// Whether expansion should currently be held off.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Designated modifier pressed (or auto-repeated): restart the timer.
    pub fn on_modifier_down(&mut self, timers: &mut TimerQueue, now: Instant) {
        self.cancel_pending(timers);
        self.pending = Some(timers.schedule(now, self.delay, Task::SuppressExpansion));
    }

    /// Designated modifier released.
    pub fn on_modifier_up(&mut self, timers: &mut TimerQueue, host: &mut dyn Host) {
        self.suppressed = false;
        self.cancel_pending(timers);
        host.refresh_cursor();
    }

    /// Any other key pressed.
    pub fn on_other_key_down(&mut self, timers: &mut TimerQueue) {
        self.cancel_pending(timers);
        self.suppressed = false;
    }

    /// Runs the suppression timer.
    pub fn fire(&mut self, id: TimerId, host: &mut dyn Host) {
        if self.pending != Some(id) {
            debug!(%id, "ignoring stale suppression timer");
            return;
        }

        self.pending = None;
        self.suppressed = true;
        debug!("modifier held, suppressing expansion");
        host.refresh_cursor();
    }

    fn cancel_pending(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }
}
