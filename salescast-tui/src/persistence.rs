//! Dashboard state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppState, ControlFocus, Overlay, Panel};

/// Serializable subset of the controls that persists across restarts.
///
/// Only inputs are kept. Views are rebuilt by running the action again.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub selected_line: Option<String>,
    pub toggles: [bool; 3],
    pub active_panel: Panel,
    pub focus: ControlFocus,
    pub show_value_labels: bool,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selected_line: None,
            toggles: [false; 3],
            active_panel: Panel::Controls,
            focus: ControlFocus::Lines,
            show_value_labels: true,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selected_line: app.controls.current_line().map(|l| l.to_string()),
        toggles: app.controls.toggles,
        active_panel: app.active_panel,
        focus: app.controls.focus,
        show_value_labels: app.show_value_labels,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state. A saved line that is no longer configured is ignored.
pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(name) = &state.selected_line {
        if let Some(i) = app.controls.lines.iter().position(|l| l == name.as_str()) {
            app.controls.line_cursor = i;
        }
    }
    app.controls.toggles = state.toggles;
    app.controls.focus = state.focus;
    app.show_value_labels = state.show_value_labels;
    // The result panels are empty until an action runs.
    app.active_panel = match state.active_panel {
        Panel::Forecast | Panel::Details | Panel::Decomposition => Panel::Controls,
        other => other,
    };
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
