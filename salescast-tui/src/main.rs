//! Salescast TUI — five-panel terminal dashboard for comparing sales forecasts.
//!
//! Panels:
//! 1. Controls — model line selector, algorithm toggles, forecast action
//! 2. Forecast — actual vs forecast chart, forecast table, best model
//! 3. Details — demand history and model diagnostics
//! 4. Decomposition — observed, trend, seasonal and residual components
//! 5. Help — keyboard shortcuts
//!
//! Usage: `salescast-tui [CONFIG.toml]`. Without an argument the config is
//! read from `salescast.toml` in the working directory, if present.

mod app;
mod input;
mod persistence;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use salescast_runner::{load_dataset, DashboardConfig, LoadOptions};

use crate::app::{AppState, ErrorCategory};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("salescast");
    let state_path = app_dir.join("state.json");
    let export_dir = PathBuf::from("exports");

    // The terminal is ours, so logs go to a file.
    let _log_guard = init_logging(&app_dir.join("logs"));

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref()).context("loading dashboard config")?;
    config.validate().context("validating dashboard config")?;

    let (data, load_error) = match load_dataset(&config, &LoadOptions { allow_sample: true }) {
        Ok(data) => {
            info!(source = ?data.source, fingerprint = %data.fingerprint, "dataset ready");
            (Some(data), None)
        }
        Err(e) => {
            warn!(error = %e, "dataset failed to load");
            (None, Some(e))
        }
    };
    let is_sample = data.as_ref().is_some_and(|d| d.is_sample());

    let mut app = AppState::new(config, data, export_dir);
    persistence::apply(&mut app, persistence::load(&state_path));

    if let Some(e) = load_error {
        let context = app.config.data_dir.display().to_string();
        app.push_error(ErrorCategory::Data, e.to_string(), context);
    } else if is_sample {
        app.set_warning(format!(
            "{} not found, showing generated sample data",
            app.config.data_dir.display()
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        warn!(error = %e, "could not save dashboard state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Daily-rolling file log, filtered by `RUST_LOG` (default `info`).
fn init_logging(dir: &std::path::Path) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }
    let appender = tracing_appender::rolling::daily(dir, "salescast-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
