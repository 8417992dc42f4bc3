//! Panel 5 — Help: keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "f", "Run the forecast for the current controls");
    key(&mut lines, "s", "Save chart, table and manifest to the export directory");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Controls");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "h / l", "Focus model lines / algorithms");
    key(&mut lines, "Space", "Toggle algorithm under cursor");
    key(&mut lines, "p / a / m", "Toggle Prophet / ARIMA / Moving Average");
    key(&mut lines, "Enter", "Forecast");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Forecast");
    key(&mut lines, "v", "Toggle value labels on the chart");
    lines.push(Line::from(""));

    section(&mut lines, "Panels 3-4: Details, Decomposition");
    key(&mut lines, "", "Demand and diagnostics tables, seasonal decomposition");
    lines.push(Line::from(""));

    section(&mut lines, "Paths");
    key(&mut lines, "data", &app.config.data_dir.display().to_string());
    key(&mut lines, "exports", &app.export_dir.display().to_string());

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
