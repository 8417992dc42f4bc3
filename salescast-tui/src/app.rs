//! Application state — single-owner, main-thread only.
//!
//! The dashboard is synchronous: a forecast action builds its view on the
//! spot from the shared, read-only dataset.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use salescast_core::domain::{ForecastMethod, ModelLine, ModelLineSelection};
use salescast_core::DashboardError;
use salescast_runner::{build_view, save_artifacts, DashboardConfig, DashboardView, LoadedData, ViewError};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Controls,
    Forecast,
    Details,
    Decomposition,
    Help,
}

impl Panel {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            Panel::Controls => 0,
            Panel::Forecast => 1,
            Panel::Details => 2,
            Panel::Decomposition => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Controls),
            1 => Some(Panel::Forecast),
            2 => Some(Panel::Details),
            3 => Some(Panel::Decomposition),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Controls => "Controls",
            Panel::Forecast => "Forecast",
            Panel::Details => "Details",
            Panel::Decomposition => "Decomposition",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Controls)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Controls)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Selection,
    Data,
    Integrity,
    Export,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Selection => "SEL",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Integrity => "INT",
            ErrorCategory::Export => "EXP",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn of(err: &ViewError) -> Self {
        match err {
            ViewError::Dashboard(DashboardError::NoMethodSelected) => ErrorCategory::Selection,
            ViewError::Dashboard(DashboardError::InsufficientData(_)) => ErrorCategory::Data,
            ViewError::Dashboard(DashboardError::UnknownModelLine { .. }) => ErrorCategory::Integrity,
            ViewError::Load(_) => ErrorCategory::Data,
            ViewError::Config(_) => ErrorCategory::Other,
        }
    }
}

/// Which control group has focus in the Controls panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlFocus {
    Lines,
    Methods,
}

/// Controls panel state: line selector and the three method toggles.
#[derive(Debug, Clone)]
pub struct ControlsState {
    pub lines: Vec<ModelLine>,
    pub line_cursor: usize,
    /// Indexed by `ForecastMethod::index()`.
    pub toggles: [bool; 3],
    pub method_cursor: usize,
    pub focus: ControlFocus,
}

impl ControlsState {
    pub fn new(lines: Vec<ModelLine>) -> Self {
        Self {
            lines,
            line_cursor: 0,
            toggles: [false; 3],
            method_cursor: 0,
            focus: ControlFocus::Lines,
        }
    }

    pub fn current_line(&self) -> Option<&ModelLine> {
        self.lines.get(self.line_cursor)
    }

    pub fn toggle(&mut self, method: ForecastMethod) {
        let slot = &mut self.toggles[method.index()];
        *slot = !*slot;
    }

    pub fn is_on(&self, method: ForecastMethod) -> bool {
        self.toggles[method.index()]
    }

    /// The immutable selection one action runs with.
    pub fn selection(&self) -> Option<ModelLineSelection> {
        let [prophet, arima, moving_average] = self.toggles;
        self.current_line()
            .map(|line| ModelLineSelection::from_toggles(line.clone(), prophet, arima, moving_average))
    }

    pub fn move_line(&mut self, delta: isize) {
        if self.lines.is_empty() {
            return;
        }
        let max = self.lines.len() - 1;
        self.line_cursor = self.line_cursor.saturating_add_signed(delta).min(max);
    }

    pub fn move_method(&mut self, delta: isize) {
        self.method_cursor = self.method_cursor.saturating_add_signed(delta).min(ForecastMethod::ALL.len() - 1);
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Inputs
    pub config: DashboardConfig,
    pub data: Option<LoadedData>,
    pub controls: ControlsState,

    // Output of the last successful action
    pub view: Option<DashboardView>,
    pub show_value_labels: bool,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    // Paths
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(config: DashboardConfig, data: Option<LoadedData>, export_dir: PathBuf) -> Self {
        let controls = ControlsState::new(config.model_lines());
        Self {
            active_panel: Panel::Controls,
            running: true,
            config,
            data,
            controls,
            view: None,
            show_value_labels: true,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            export_dir,
        }
    }

    /// Run one forecast action with the current controls.
    ///
    /// Any failure clears the previous view, so no stale chart is shown for a
    /// selection that could not be built.
    pub fn run_forecast(&mut self) {
        let Some(selection) = self.controls.selection() else {
            self.set_warning("No product lines configured");
            return;
        };
        let Some(data) = &self.data else {
            self.push_error(ErrorCategory::Data, "No dataset loaded".into(), selection.line.to_string());
            return;
        };

        match build_view(&selection, data, &self.config) {
            Ok(view) => {
                let msg = format!(
                    "{}: {} forecast rows, best model {}",
                    selection.line,
                    view.forecast_table.len(),
                    view.best_model
                );
                self.view = Some(view);
                self.active_panel = Panel::Forecast;
                self.set_status(msg);
            }
            Err(err) => {
                self.view = None;
                self.push_error(ErrorCategory::of(&err), err.to_string(), selection.line.to_string());
            }
        }
    }

    /// Save the current view's artifacts under the export directory.
    pub fn export_view(&mut self) {
        let Some(view) = &self.view else {
            self.set_warning("Nothing to export: run a forecast first");
            return;
        };
        match save_artifacts(view, &self.export_dir) {
            Ok(dir) => {
                info!(dir = %dir.display(), "artifacts saved");
                self.set_status(format!("Saved to {}", dir.display()));
            }
            Err(e) => {
                let context = view.selection.line.to_string();
                self.push_error(ErrorCategory::Export, format!("{e:#}"), context);
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
