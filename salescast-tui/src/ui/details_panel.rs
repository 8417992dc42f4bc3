//! Panel 3 — Details: demand history and model diagnostics, field per row.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use salescast_core::data::TransposedView;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        super::render_no_view(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_transposed(f, chunks[0], &view.demand);
    match &view.diagnostics {
        Some(diag) => render_transposed(f, chunks[1], diag),
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme::muted())
                .title(" Model_Info ");
            let para = Paragraph::new(Span::styled(
                "Select ARIMA to see its model diagnostics.",
                theme::muted(),
            ))
            .block(block);
            f.render_widget(para, chunks[1]);
        }
    }
}

fn render_transposed(f: &mut Frame, area: Rect, table: &TransposedView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", table.title))
        .title_style(theme::accent());

    if table.is_empty() {
        let para = Paragraph::new(Span::styled("No records for this line.", theme::muted())).block(block);
        f.render_widget(para, area);
        return;
    }

    let header = Row::new(
        std::iter::once("Field")
            .chain(table.headers.iter().map(String::as_str))
            .map(|h| Cell::from(Span::styled(h, theme::accent_bold()))),
    );
    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|r| {
            Row::new(
                std::iter::once(Cell::from(Span::styled(r.key.as_str(), theme::neutral())))
                    .chain(r.values.iter().map(|v| Cell::from(v.as_str()))),
            )
        })
        .collect();

    let key_width = table.rows.iter().map(|r| r.key.len()).max().unwrap_or(5).max(5) as u16 + 1;
    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(key_width))
        .chain(table.headers.iter().map(|_| Constraint::Min(8)))
        .collect();

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
