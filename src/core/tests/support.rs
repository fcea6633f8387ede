//! Shared fixtures: a host that records every effect and shortcuts that
//! record every execution.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::types::{ExecContext, Host, Shortcut, UiState};

/// Host that mirrors the alert into its own UI state, like a real store.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub ui: UiState,
    pub alerts: Vec<Option<String>>,
    pub cursor_refreshes: usize,
}

impl Host for RecordingHost {
    fn ui_state(&self) -> UiState {
        self.ui.clone()
    }

    fn set_alert(&mut self, message: Option<&str>) {
        self.ui.alert = message.map(str::to_string);
        self.alerts.push(self.ui.alert.clone());
    }

    fn refresh_cursor(&mut self) {
        self.cursor_refreshes += 1;
    }
}

pub type ExecLog = Rc<RefCell<Vec<(String, ExecContext)>>>;

/// Shortcut whose action appends `(id, context)` to `log`.
pub fn recording_shortcut(id: &str, name: &str, log: &ExecLog) -> Shortcut {
    let log = Rc::clone(log);
    let owner = id.to_string();
    Shortcut::from_fn(id, name, move |_, context| {
        log.borrow_mut().push((owner.clone(), context));
    })
}

/// Shortcut with a no-op action.
pub fn noop_shortcut(id: &str) -> Shortcut {
    Shortcut::from_fn(id, id, |_, _| {})
}
