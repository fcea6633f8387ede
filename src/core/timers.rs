//! Deterministic timer queue for the single-threaded dispatch loop
//!
//! Nothing here sleeps or spawns. Controllers schedule tasks against an
//! explicit `Instant`, and the owner drains due tasks by calling
//! [`TimerQueue::drain_due`] from its tick. This keeps every transition
//! reproducible in tests: time only moves when the caller says so.
//!
//! # Ordering
//! - Due tasks are returned by deadline, ties in scheduling order.
//! - A task scheduled while a drain is being processed is never part of
//!   that drain, even with zero delay. This is what gives deferred tasks
//!   their "after the current handler" guarantee.

use std::fmt;
use std::time::{Duration, Instant};

/// Handle for a scheduled task. Ids are never reused.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work the dispatcher performs when a timer fires.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Task {
    /// Display a gesture hint (shortcut name or the invalid-gesture signal)
    ShowHint(String),
    /// Clear the gesture hint after a gesture ended
    ClearHint,
    /// The designated modifier has been held long enough
    SuppressExpansion,
}

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: Instant,
    task: T,
}

/// Pending tasks keyed by deadline.
///
/// The queue holds a handful of entries at most (one per controller plus
/// deferred clears), so a flat `Vec` beats a heap here.
#[derive(Debug)]
pub struct TimerQueue<T = Task> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedules `task` to run once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: now + delay,
            task,
        });
        id
    }

    /// Schedules `task` for the next tick.
    pub fn defer(&mut self, now: Instant, task: T) -> TimerId {
        self.schedule(now, Duration::ZERO, task)
    }

    /// Cancels a pending task. Returns false if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Delay after `now` the task was scheduled with, if still pending.
    pub fn remaining(&self, id: TimerId, now: Instant) -> Option<Duration> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.due.saturating_duration_since(now))
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns every task due at `now`, in firing order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        let mut index = 0;

        while index < self.entries.len() {
            if self.entries[index].due <= now {
                due.push(self.entries.swap_remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| (entry.id, entry.task)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
