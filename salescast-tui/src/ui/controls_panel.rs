//! Panel 1 — Controls: model line selector and the three algorithm toggles.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use salescast_core::domain::ForecastMethod;
use salescast_runner::DataSource;

use crate::app::{AppState, ControlFocus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_lines(f, columns[0], app);
    render_methods(f, columns[1], app);
    render_footer(f, chunks[1], app);
}

fn render_lines(f: &mut Frame, area: Rect, app: &AppState) {
    let controls = &app.controls;
    let focused = controls.focus == ControlFocus::Lines;

    let lines: Vec<Line> = controls
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let selected = i == controls.line_cursor;
            let marker = if selected { "▶ " } else { "  " };
            let style = match (selected, focused) {
                (true, true) => theme::accent_bold(),
                (true, false) => theme::accent(),
                _ => theme::secondary(),
            };
            Line::from(Span::styled(format!("{marker}{line}"), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Select Model ")
        .title_style(theme::panel_title(focused));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_methods(f: &mut Frame, area: Rect, app: &AppState) {
    let controls = &app.controls;
    let focused = controls.focus == ControlFocus::Methods;

    let mut lines: Vec<Line> = ForecastMethod::ALL
        .iter()
        .enumerate()
        .map(|(i, &method)| {
            let check = if controls.is_on(method) { "[x]" } else { "[ ]" };
            let mut style = if controls.is_on(method) { theme::positive() } else { theme::secondary() };
            if focused && i == controls.method_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(format!("{check} "), style),
                Span::styled(method.caption(), style),
            ])
        })
        .collect();

    if controls.toggles.iter().all(|on| !on) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Select at least one algorithm.", theme::warning())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Select Algorithm ")
        .title_style(theme::panel_title(focused));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &AppState) {
    let data = match &app.data {
        Some(d) => {
            let source = match d.source {
                DataSource::Files => format!("files in {}", app.config.data_dir.display()),
                DataSource::Sample => "generated sample".to_string(),
            };
            let fp: String = d.fingerprint.chars().take(12).collect();
            Span::styled(format!("Data: {source} ({fp})"), theme::muted())
        }
        None => Span::styled("Data: not loaded (press e for details)", theme::negative()),
    };

    let lines = vec![
        Line::from(data),
        Line::from(vec![
            Span::styled("[j/k] ", theme::accent()),
            Span::styled("move  ", theme::muted()),
            Span::styled("[h/l] ", theme::accent()),
            Span::styled("switch column  ", theme::muted()),
            Span::styled("[Space/p/a/m] ", theme::accent()),
            Span::styled("toggle  ", theme::muted()),
            Span::styled("[Enter] ", theme::accent_bold()),
            Span::styled("Forecast", theme::accent_bold()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
