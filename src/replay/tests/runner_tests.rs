use std::time::Duration;

use crate::config::parse_manifest;
use crate::core::types::{ExecContext, Modal};
use crate::core::INVALID_GESTURE;
use crate::replay::{parse_script, Effect, Record, Replay, StateChange};

const MANIFEST: &str = "
shortcut = archive, Archive, META+A, -
shortcut = outdent, Outdent, -, rdl | rdlu
";

fn replay(script: &str) -> Vec<Record> {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let events = parse_script(script).unwrap();
    Replay::new(manifest).run(&events)
}

fn record(at_ms: u64, effect: Effect) -> Record {
    Record { at_ms, effect }
}

fn executed(id: &str, context: ExecContext) -> Effect {
    Effect::Executed {
        id: id.to_string(),
        context,
    }
}

#[test]
fn test_keyboard_chord_executes_and_notifies() {
    let records = replay("@0 keydown META+a");

    assert_eq!(
        records,
        vec![
            record(0, Effect::Notified { id: "archive".to_string() }),
            record(0, executed("archive", ExecContext::Keyboard)),
            record(0, Effect::DefaultPrevented { key: "META+a".to_string() }),
        ]
    );
}

#[test]
fn test_gesture_hint_then_execution() {
    let records = replay(
        "
@0   segment r
@100 segment rdl
@700 end rdl
",
    );

    assert_eq!(
        records,
        vec![
            record(
                100,
                Effect::HintScheduled {
                    path: "rdl".to_string(),
                    delay: Duration::from_millis(500),
                }
            ),
            record(600, Effect::Alert(Some("Outdent".to_string()))),
            record(700, executed("outdent", ExecContext::Gesture)),
            record(700, Effect::Alert(None)),
        ]
    );
}

#[test]
fn test_invalid_gesture_replaces_visible_hint() {
    let records = replay(
        "
@0   segment rdl
@600 segment rdlx
@650 end -
",
    );

    let alerts: Vec<&Record> = records
        .iter()
        .filter(|r| matches!(r.effect, Effect::Alert(_)))
        .collect();
    assert_eq!(alerts.len(), 3);
    assert_eq!(*alerts[0], record(500, Effect::Alert(Some("Outdent".to_string()))));
    assert_eq!(*alerts[1], record(600, Effect::Alert(Some(INVALID_GESTURE.to_string()))));
    assert_eq!(*alerts[2], record(650, Effect::Alert(None)));

    // Abandoned gesture executes nothing
    assert!(!records.iter().any(|r| matches!(r.effect, Effect::Executed { .. })));
}

#[test]
fn test_held_modifier_toggles_suppression() {
    let records = replay(
        "
@0   keydown Control
@150 keyup Control
",
    );

    assert_eq!(
        records,
        vec![
            record(100, Effect::CursorRefresh),
            record(100, Effect::Suppression(true)),
            record(150, Effect::CursorRefresh),
            record(150, Effect::Suppression(false)),
        ]
    );
}

#[test]
fn test_blocking_modal_stops_keyboard_dispatch() {
    let records = replay(
        "
@0  set modal help
@10 keydown META+a
@20 set modal none
@30 keydown META+a
",
    );

    let executions: Vec<u64> = records
        .iter()
        .filter(|r| matches!(r.effect, Effect::Executed { .. }))
        .map(|r| r.at_ms)
        .collect();
    assert_eq!(executions, vec![30]);
    assert_eq!(
        records[0],
        record(0, Effect::State(StateChange::Modal(Some(Modal::Help))))
    );
}

#[test]
fn test_drag_blocks_gesture_execution_but_clears_hint() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let events = parse_script(
        "
@0  set drag on
@10 segment rdl
@20 end rdl
",
    )
    .unwrap();

    let mut replay = Replay::new(manifest);
    let records = replay.run(&events);

    assert!(!records.iter().any(|r| matches!(r.effect, Effect::Executed { .. })));
    assert!(!records.iter().any(|r| matches!(r.effect, Effect::HintScheduled { .. })));
    assert_eq!(records.last(), Some(&record(20, Effect::Alert(None))));
    assert!(replay.ui_state().drag_in_progress);
    assert_eq!(replay.dispatcher().pending_timers(), 0);
}

#[test]
fn test_record_display() {
    let line = record(42, executed("archive", ExecContext::Keyboard)).to_string();
    assert_eq!(line, "@42     exec archive (keyboard)");
}
