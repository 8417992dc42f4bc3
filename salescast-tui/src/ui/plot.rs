//! Draws one chart panel from a `ChartSpec` onto a braille canvas.
//!
//! Traces are split at undefined points, so a gap stays a gap instead of
//! being bridged by a straight line.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::Paragraph;

use salescast_core::chart::{Panel, Trace};
use salescast_core::domain::PeriodKey;

use crate::theme::{self, Theme};

/// How one panel is drawn.
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub show_labels: bool,
    pub show_legend: bool,
    /// X range shared with sibling panels; computed from the panel if `None`.
    pub x_range: Option<(PeriodKey, PeriodKey)>,
}

pub fn render_panel(f: &mut Frame, area: Rect, panel: &Panel, opts: PlotOptions) {
    let theme = Theme::default();

    let legend_height = u16::from(opts.show_legend);
    let x_title_height = u16::from(panel.x_title.is_some());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(legend_height),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(x_title_height),
        ])
        .split(area);

    if opts.show_legend {
        f.render_widget(Paragraph::new(legend(panel, &theme)), rows[0]);
    }

    let Some(range) = opts.x_range.or_else(|| x_range(std::slice::from_ref(panel))) else {
        f.render_widget(Paragraph::new(Span::styled("(no data)", theme::muted())), rows[1]);
        return;
    };
    let (y_lo, y_hi) = padded(panel.y_bounds().unwrap_or((0.0, 1.0)));
    let (x_lo, x_hi) = (range.0.ordinal(), range.1.ordinal().max(range.0.ordinal() + 1.0));

    let y_labels = [format!("{y_hi:.0}"), format!("{y_lo:.0}")];
    let y_width = y_labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(panel.y_title.len()))
        .max()
        .unwrap_or(0)
        .min(14) as u16
        + 1;

    let plot_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(y_width), Constraint::Min(1)])
        .split(rows[1]);

    f.render_widget(
        Paragraph::new(y_axis_lines(&panel.y_title, &y_labels, plot_row[0].height)),
        plot_row[0],
    );

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([x_lo, x_hi])
        .y_bounds([y_lo, y_hi])
        .paint(|ctx| {
            for trace in &panel.traces {
                let color = theme.trace_color_by_name(&trace.name);
                for run in runs(trace) {
                    if let [single] = run.as_slice() {
                        ctx.draw(&Points {
                            coords: &[*single],
                            color,
                        });
                    }
                    for w in run.windows(2) {
                        ctx.draw(&CanvasLine::new(w[0].0, w[0].1, w[1].0, w[1].1, color));
                    }
                }
            }
            if opts.show_labels {
                ctx.layer();
                for trace in &panel.traces {
                    let style = Style::default().fg(theme.trace_color_by_name(&trace.name));
                    for p in &trace.points {
                        if let (Some(y), Some(label)) = (p.y, &p.label) {
                            ctx.print(p.x.ordinal(), y, Line::styled(label.clone(), style));
                        }
                    }
                }
            }
        });
    f.render_widget(canvas, plot_row[1]);

    let x_axis = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(y_width), Constraint::Min(1)])
        .split(rows[2]);
    let first = range.0.to_string();
    let last = range.1.to_string();
    let pad = (x_axis[1].width as usize).saturating_sub(first.len() + last.len());
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(first, theme::muted()),
            Span::raw(" ".repeat(pad)),
            Span::styled(last, theme::muted()),
        ])),
        x_axis[1],
    );

    if let Some(title) = &panel.x_title {
        f.render_widget(
            Paragraph::new(Span::styled(title.as_str(), theme::muted())).alignment(Alignment::Center),
            rows[3],
        );
    }
}

/// First and last x keys over a set of panels.
pub fn x_range(panels: &[Panel]) -> Option<(PeriodKey, PeriodKey)> {
    let keys = panels
        .iter()
        .flat_map(|p| p.traces.iter())
        .flat_map(|t| t.points.iter().map(|p| p.x));
    keys.fold(None, |acc, k| match acc {
        None => Some((k, k)),
        Some((lo, hi)) => Some((lo.min(k), hi.max(k))),
    })
}

/// Contiguous runs of defined points.
pub fn runs(trace: &Trace) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for p in &trace.points {
        match p.y {
            Some(y) => current.push((p.x.ordinal(), y)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span.abs() < f64::EPSILON { lo.abs().max(1.0) * 0.1 } else { span * 0.08 };
    (lo - pad, hi + pad)
}

fn legend<'a>(panel: &'a Panel, theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();
    for trace in &panel.traces {
        spans.push(Span::styled("━━ ", Style::default().fg(theme.trace_color_by_name(&trace.name))));
        spans.push(Span::styled(trace.name.as_str(), theme::secondary()));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

fn y_axis_lines<'a>(title: &'a str, labels: &[String; 2], height: u16) -> Vec<Line<'a>> {
    let height = height as usize;
    let mut lines = vec![Line::from(""); height];
    if height == 0 {
        return lines;
    }
    lines[height / 2] = Line::from(Span::styled(title, theme::neutral()));
    lines[0] = Line::from(Span::styled(labels[0].clone(), theme::muted()));
    if height > 1 {
        lines[height - 1] = Line::from(Span::styled(labels[1].clone(), theme::muted()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use salescast_core::chart::ChartPoint;

    fn trace(ys: &[Option<f64>]) -> Trace {
        Trace {
            name: "Trend".into(),
            points: ys
                .iter()
                .enumerate()
                .map(|(i, y)| ChartPoint {
                    x: PeriodKey::Row(i),
                    y: *y,
                    label: None,
                })
                .collect(),
        }
    }

    #[test]
    fn runs_split_at_gaps() {
        let t = trace(&[None, Some(1.0), Some(2.0), None, Some(4.0), None]);
        assert_eq!(runs(&t), vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(4.0, 4.0)]]);
    }

    #[test]
    fn all_gap_trace_has_no_runs() {
        assert!(runs(&trace(&[None, None])).is_empty());
    }

    #[test]
    fn flat_series_gets_nonzero_range() {
        let (lo, hi) = padded((5.0, 5.0));
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn x_range_spans_all_panels() {
        let a = Panel {
            y_title: "Observed".into(),
            x_title: None,
            height: 150,
            traces: vec![trace(&[Some(1.0), Some(2.0)])],
        };
        let mut b = a.clone();
        b.traces = vec![trace(&[None, None, None, Some(3.0)])];
        assert_eq!(x_range(&[a, b]), Some((PeriodKey::Row(0), PeriodKey::Row(3))));
    }
}
