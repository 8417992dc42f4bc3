//! Panel 4 — Decomposition: observed, trend, seasonal and residual, stacked.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use salescast_runner::DecompositionScope;

use crate::app::AppState;
use crate::theme;
use crate::ui::plot::{self, PlotOptions};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        super::render_no_view(f, area);
        return;
    };

    let chart = &view.decomposition_chart;
    let scope = match app.config.decomposition.scope {
        DecompositionScope::FullTable => "all history rows".to_string(),
        DecompositionScope::SelectedLine => view.selection.line.to_string(),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Seasonal decomposition ", theme::accent_bold()),
            Span::styled(
                format!("(period {}, {scope}, {} points)", view.decomposition.period, view.decomposition.len()),
                theme::muted(),
            ),
        ])),
        chunks[0],
    );

    if chart.panels.is_empty() {
        return;
    }
    let n = chart.panels.len() as u32;
    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints(chart.panels.iter().map(|_| Constraint::Ratio(1, n)))
        .split(chunks[1]);

    let shared = if chart.shared_x { plot::x_range(&chart.panels) } else { None };
    for (panel, cell) in chart.panels.iter().zip(stack.iter()) {
        plot::render_panel(
            f,
            *cell,
            panel,
            PlotOptions {
                show_labels: false,
                show_legend: chart.show_legend,
                x_range: shared,
            },
        );
    }
}
