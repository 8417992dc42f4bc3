//! Four stacked panels over one shared x-axis.

use crate::analysis::{ComponentKind, DecompositionResult};
use crate::chart::spec::{ChartPoint, ChartSpec, Panel, Trace};

/// Total height of the decomposition chart.
pub const DECOMPOSITION_HEIGHT: u32 = 600;

/// Carried by the bottom panel only.
pub const X_AXIS_TITLE: &str = "Month";

pub fn layout(result: &DecompositionResult) -> ChartSpec {
    layout_with_height(result, DECOMPOSITION_HEIGHT)
}

/// Lay out observed, trend, seasonal and residual top to bottom with
/// uniform panel heights. Undefined values stay gaps.
pub fn layout_with_height(result: &DecompositionResult, height: u32) -> ChartSpec {
    let panel_height = height / ComponentKind::ALL.len() as u32;
    let last = ComponentKind::ALL.len() - 1;

    let panels = ComponentKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| Panel {
            y_title: kind.title().to_string(),
            x_title: (i == last).then(|| X_AXIS_TITLE.to_string()),
            height: panel_height,
            traces: vec![Trace {
                name: kind.title().to_string(),
                points: result
                    .index
                    .iter()
                    .zip(result.component(kind))
                    .map(|(&x, y)| ChartPoint { x, y, label: None })
                    .collect(),
            }],
        })
        .collect();

    ChartSpec {
        title: None,
        height,
        show_legend: false,
        shared_x: true,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::decompose_rows;

    fn result() -> DecompositionResult {
        let values: Vec<f64> = (0..24).map(|i| 50.0 + (i % 12) as f64 * 3.0 + i as f64).collect();
        decompose_rows(&values, 12).unwrap()
    }

    #[test]
    fn four_panels_in_fixed_order() {
        let chart = layout(&result());
        let titles: Vec<_> = chart.panels.iter().map(|p| p.y_title.as_str()).collect();
        assert_eq!(titles, vec!["Observed", "Trend", "Seasonal", "Residual"]);
        assert_eq!(chart.height, 600);
        assert!(!chart.show_legend);
        assert!(chart.shared_x);
    }

    #[test]
    fn only_bottom_panel_has_x_title() {
        let chart = layout(&result());
        let x_titles: Vec<_> = chart.panels.iter().map(|p| p.x_title.as_deref()).collect();
        assert_eq!(x_titles, vec![None, None, None, Some("Month")]);
    }

    #[test]
    fn panel_heights_are_uniform() {
        let chart = layout(&result());
        assert!(chart.panels.iter().all(|p| p.height == 150));
    }

    #[test]
    fn undefined_edges_become_gaps() {
        let r = result();
        let chart = layout(&r);
        let trend = &chart.panels[1].traces[0].points;
        assert_eq!(trend.len(), r.len());
        assert_eq!(trend[0].y, None);
        assert_eq!(trend[6].y, r.trend[6]);
    }

    #[test]
    fn layout_does_not_touch_result() {
        let r = result();
        let before = r.clone();
        let _ = layout(&r);
        assert_eq!(r, before);
    }
}
