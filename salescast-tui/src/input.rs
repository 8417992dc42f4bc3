//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use salescast_core::domain::ForecastMethod;

use crate::app::{AppState, ControlFocus, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Controls; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Forecast; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Details; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Decomposition; return; }
        KeyCode::Char('5') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('f') => {
            app.run_forecast();
            return;
        }
        KeyCode::Char('s') => {
            app.export_view();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Controls => handle_controls_key(app, key),
        Panel::Forecast => handle_forecast_key(app, key),
        Panel::Details | Panel::Decomposition | Panel::Help => {} // display only
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_controls_key(app: &mut AppState, key: KeyEvent) {
    let controls = &mut app.controls;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => match controls.focus {
            ControlFocus::Lines => controls.move_line(1),
            ControlFocus::Methods => controls.move_method(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match controls.focus {
            ControlFocus::Lines => controls.move_line(-1),
            ControlFocus::Methods => controls.move_method(-1),
        },
        KeyCode::Char('h') | KeyCode::Left => controls.focus = ControlFocus::Lines,
        KeyCode::Char('l') | KeyCode::Right => controls.focus = ControlFocus::Methods,
        KeyCode::Char(' ') => {
            if controls.focus == ControlFocus::Methods {
                if let Some(&method) = ForecastMethod::ALL.get(controls.method_cursor) {
                    controls.toggle(method);
                }
            }
        }
        KeyCode::Char('p') => controls.toggle(ForecastMethod::Prophet),
        KeyCode::Char('a') => controls.toggle(ForecastMethod::Arima),
        KeyCode::Char('m') => controls.toggle(ForecastMethod::MovingAverage),
        KeyCode::Enter => app.run_forecast(),
        _ => {}
    }
}

fn handle_forecast_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('v') = key.code {
        app.show_value_labels = !app.show_value_labels;
    }
}
