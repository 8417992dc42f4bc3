//! Panel 2 — Forecast: comparison chart, forecast-only table, best model.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use salescast_core::chart::value_label;
use salescast_runner::DashboardView;

use crate::app::AppState;
use crate::theme::{self, Theme};
use crate::ui::plot::{self, PlotOptions};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view {
        Some(view) => render_view(f, area, view, app.show_value_labels),
        None => super::render_no_view(f, area),
    }
}

fn render_view(f: &mut Frame, area: Rect, view: &DashboardView, show_labels: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(62), Constraint::Min(6)])
        .split(area);

    let chart = &view.comparison_chart;
    let title = chart.title.as_deref().unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {title}: {} ", view.selection.line))
        .title_style(theme::accent_bold());
    let chart_area = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    if let Some(panel) = chart.panels.first() {
        plot::render_panel(
            f,
            chart_area,
            panel,
            PlotOptions {
                show_labels,
                show_legend: chart.show_legend,
                x_range: None,
            },
        );
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_forecast_table(f, bottom[0], view);
    render_summary(f, bottom[1], view, show_labels);
}

fn render_forecast_table(f: &mut Frame, area: Rect, view: &DashboardView) {
    let theme = Theme::default();
    let header = Row::new(
        ["Model", "Forecast_Model", "Period", "Cars_Sold"]
            .into_iter()
            .map(|h| Cell::from(Span::styled(h, theme::accent_bold()))),
    );

    let rows: Vec<Row> = view
        .forecast_table
        .iter()
        .map(|r| {
            let color = theme.trace_color_by_name(&r.forecast_method);
            Row::new(vec![
                Cell::from(r.model_line.as_str()),
                Cell::from(Span::styled(r.forecast_method.as_str(), Style::default().fg(color))),
                Cell::from(r.period.as_str()),
                Cell::from(value_label(r.value)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(format!(" Forecast ({} rows) ", view.forecast_table.len()))
            .title_style(theme::accent()),
    );
    f.render_widget(table, area);
}

fn render_summary(f: &mut Frame, area: Rect, view: &DashboardView, show_labels: bool) {
    let methods: Vec<&str> = view.selection.methods.iter().map(|m| m.caption()).collect();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Best Model: ", theme::accent_bold()),
            Span::styled(view.best_model.as_str(), theme::positive()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Algorithms: ", theme::muted()),
            Span::styled(methods.join(", "), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Dataset:    ", theme::muted()),
            Span::styled(short_fingerprint(&view.fingerprint), theme::secondary()),
        ]),
    ];
    if view.sample_data {
        lines.push(Line::from(Span::styled(
            "Showing generated sample data.",
            theme::warning(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("[v] value labels {}   [s] save artifacts", if show_labels { "on" } else { "off" }),
        theme::muted(),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(" Summary ")
            .title_style(theme::accent()),
    );
    f.render_widget(para, area);
}

fn short_fingerprint(fp: &str) -> String {
    fp.chars().take(12).collect()
}
