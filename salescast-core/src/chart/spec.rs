//! Chart specification types (serializable, no rendering).

use serde::{Deserialize, Serialize};

use crate::domain::PeriodKey;

/// One plotted point. `y == None` is a gap in the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: PeriodKey,
    pub y: Option<f64>,
    /// Text drawn at the point, if any.
    pub label: Option<String>,
}

/// A named line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl Trace {
    /// Defined `(x, y)` pairs in plotting coordinates.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.y.map(|y| (p.x.ordinal(), y)))
            .collect()
    }
}

/// One vertically stacked sub-plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub y_title: String,
    pub x_title: Option<String>,
    pub height: u32,
    pub traces: Vec<Trace>,
}

impl Panel {
    /// Min/max of the defined y values across traces.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.traces.iter().flat_map(|t| t.points.iter().filter_map(|p| p.y)))
    }

    /// Min/max of the x ordinals across traces.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.traces.iter().flat_map(|t| t.points.iter().map(|p| p.x.ordinal())))
    }
}

/// A complete chart: one or more panels over a common x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub height: u32,
    pub show_legend: bool,
    /// Whether all panels share one x-axis.
    pub shared_x: bool,
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    pub fn trace_names(&self) -> Vec<&str> {
        self.panels
            .iter()
            .flat_map(|p| p.traces.iter().map(|t| t.name.as_str()))
            .collect()
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(ys: &[Option<f64>]) -> Panel {
        Panel {
            y_title: "Trend".into(),
            x_title: None,
            height: 150,
            traces: vec![Trace {
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
            }],
        }
    }

    #[test]
    fn y_bounds_skip_gaps() {
        let p = panel(&[None, Some(3.0), Some(-1.0), None]);
        assert_eq!(p.y_bounds(), Some((-1.0, 3.0)));
        assert_eq!(p.x_bounds(), Some((0.0, 3.0)));
    }

    #[test]
    fn all_gaps_have_no_y_bounds() {
        assert_eq!(panel(&[None, None]).y_bounds(), None);
    }

    #[test]
    fn xy_drops_gaps() {
        let p = panel(&[None, Some(2.0)]);
        assert_eq!(p.traces[0].xy(), vec![(1.0, 2.0)]);
    }
}
