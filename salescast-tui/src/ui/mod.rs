//! Top-level UI layout — five-panel frame with status bar.

pub mod controls_panel;
pub mod decomposition_panel;
pub mod details_panel;
pub mod forecast_panel;
pub mod help_panel;
pub mod overlays;
pub mod plot;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(Block::default().style(theme::base()), f.area());

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Controls => controls_panel::render(f, inner, app),
        Panel::Forecast => forecast_panel::render(f, inner, app),
        Panel::Details => details_panel::render(f, inner, app),
        Panel::Decomposition => decomposition_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Placeholder shown by result panels before the first successful action.
pub(crate) fn render_no_view(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No forecast yet.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Pick a model line and at least one algorithm in Controls (press 1), then press Enter.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use salescast_core::domain::ForecastMethod;

    fn render_to_string(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn every_panel_renders_without_a_view() {
        let mut app = sample_app();
        for i in 0..Panel::COUNT {
            app.active_panel = Panel::from_index(i).unwrap();
            let screen = render_to_string(&app, 120, 40);
            assert!(screen.contains(app.active_panel.label()));
        }
    }

    #[test]
    fn every_panel_renders_with_a_view() {
        let mut app = sample_app();
        app.controls.toggles = [true, true, true];
        app.run_forecast();
        assert!(app.view.is_some());
        for i in 0..Panel::COUNT {
            app.active_panel = Panel::from_index(i).unwrap();
            render_to_string(&app, 120, 40);
        }
    }

    #[test]
    fn forecast_panel_shows_best_model_and_legend() {
        let mut app = sample_app();
        app.controls.toggle(ForecastMethod::MovingAverage);
        app.run_forecast();
        let screen = render_to_string(&app, 140, 45);
        assert!(screen.contains("Best Model"));
        assert!(screen.contains("Moving_Average"));
        assert!(screen.contains("Actual"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = sample_app();
        app.controls.toggles = [true, true, true];
        app.run_forecast();
        for i in 0..Panel::COUNT {
            app.active_panel = Panel::from_index(i).unwrap();
            render_to_string(&app, 12, 6);
        }
    }
}
