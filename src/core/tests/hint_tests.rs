use std::time::{Duration, Instant};

use crate::core::hint::{GestureHints, HintPhase, INVALID_GESTURE};
use crate::core::timers::{Task, TimerQueue};
use crate::core::types::{Modal, UiState};

use super::support::{noop_shortcut, RecordingHost};

const DELAY: Duration = Duration::from_millis(500);

#[test]
fn test_first_hint_waits_full_delay() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let outdent = noop_shortcut("outdent");

    let delay = hints.on_segment("rd", Some(&outdent), &UiState::default(), &mut timers, now);

    assert_eq!(delay, Some(DELAY));
    let HintPhase::PendingHint(id) = hints.phase() else {
        panic!("expected a pending hint, got {:?}", hints.phase());
    };
    assert_eq!(timers.remaining(id, now), Some(DELAY));
}

#[test]
fn test_visible_hint_updates_instantly() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let outdent = noop_shortcut("outdent");
    let ui = UiState {
        alert: Some("Indent".to_string()),
        ..Default::default()
    };

    assert_eq!(hints.on_segment("rdl", Some(&outdent), &ui, &mut timers, now), Some(Duration::ZERO));
    assert_eq!(hints.on_segment("rdlr", None, &ui, &mut timers, now), Some(Duration::ZERO));

    let fired = timers.drain_due(now);
    assert_eq!(fired.len(), 1, "the first hint must have been cancelled");
    assert_eq!(fired[0].1, Task::ShowHint(INVALID_GESTURE.to_string()));
}

#[test]
fn test_shown_state_alone_counts_as_visible() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let mut host = RecordingHost::default();
    let outdent = noop_shortcut("outdent");

    hints.on_segment("rd", Some(&outdent), &UiState::default(), &mut timers, now);
    let later = now + DELAY;
    for (id, task) in timers.drain_due(later) {
        if let Task::ShowHint(message) = task {
            hints.fire(id, &message, &mut host);
        }
    }
    assert_eq!(hints.phase(), HintPhase::HintShown);

    // Host state is deliberately stale here
    let delay = hints.on_segment("rdx", None, &UiState::default(), &mut timers, later);
    assert_eq!(delay, Some(Duration::ZERO));
}

#[test]
fn test_no_invalid_hint_when_nothing_visible() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);

    let delay = hints.on_segment("x", None, &UiState::default(), &mut timers, now);

    assert_eq!(delay, None);
    assert_eq!(hints.phase(), HintPhase::Idle);
    assert!(timers.is_empty());
}

#[test]
fn test_unmatched_segment_cancels_pending_hint() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let outdent = noop_shortcut("outdent");

    hints.on_segment("rd", Some(&outdent), &UiState::default(), &mut timers, now);
    hints.on_segment("rdx", None, &UiState::default(), &mut timers, now);

    assert_eq!(hints.phase(), HintPhase::Idle);
    assert!(timers.is_empty());
}

#[test]
fn test_guards_leave_state_untouched() {
    let now = Instant::now();
    let outdent = noop_shortcut("outdent");
    let guarded = [
        UiState { toolbar_overlay: true, ..Default::default() },
        UiState { scroll_prioritized: true, ..Default::default() },
        UiState { modal: Some(Modal::Other("export".to_string())), ..Default::default() },
        UiState { drag_in_progress: true, ..Default::default() },
    ];

    for ui in guarded {
        let mut timers = TimerQueue::new();
        let mut hints = GestureHints::new(DELAY);

        for path in ["r", "rd", "rdl", "zz"] {
            assert_eq!(hints.on_segment(path, Some(&outdent), &ui, &mut timers, now), None);
            assert_eq!(hints.on_segment(path, None, &ui, &mut timers, now), None);
        }

        assert_eq!(hints.phase(), HintPhase::Idle);
        assert!(timers.is_empty(), "guard {:?} scheduled a timer", ui);
    }
}

#[test]
fn test_guard_keeps_existing_pending_hint() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let outdent = noop_shortcut("outdent");

    hints.on_segment("rd", Some(&outdent), &UiState::default(), &mut timers, now);
    let before = hints.phase();

    let overlay = UiState { toolbar_overlay: true, ..Default::default() };
    hints.on_segment("rdl", None, &overlay, &mut timers, now);

    assert_eq!(hints.phase(), before);
    assert_eq!(timers.len(), 1);
}

#[test]
fn test_end_resets_and_defers_clear() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let mut host = RecordingHost::default();
    let outdent = noop_shortcut("outdent");

    hints.on_segment("rd", Some(&outdent), &UiState::default(), &mut timers, now);
    hints.on_end(&mut timers, now);

    assert_eq!(hints.phase(), HintPhase::Idle);
    let fired = timers.drain_due(now);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].1, Task::ClearHint);

    hints.clear(&mut host);
    assert_eq!(host.alerts, vec![None]);
}

#[test]
fn test_stale_timer_is_ignored() {
    let now = Instant::now();
    let mut timers = TimerQueue::new();
    let mut hints = GestureHints::new(DELAY);
    let mut host = RecordingHost::default();
    let outdent = noop_shortcut("outdent");

    hints.on_segment("rd", Some(&outdent), &UiState::default(), &mut timers, now);
    let fired = timers.drain_due(now + DELAY);
    hints.on_end(&mut timers, now + DELAY);

    for (id, task) in fired {
        if let Task::ShowHint(message) = task {
            hints.fire(id, &message, &mut host);
        }
    }

    assert!(host.alerts.is_empty());
    assert_eq!(hints.phase(), HintPhase::Idle);
}
