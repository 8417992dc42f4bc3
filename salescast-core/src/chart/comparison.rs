//! Multi-line comparison chart: actuals against each selected forecast.

use crate::chart::spec::{ChartPoint, ChartSpec, Panel, Trace};
use crate::data::schema::VALUE_COL;
use crate::domain::PeriodKey;
use crate::merge::MergedSeries;

pub const DEFAULT_TITLE: &str = "Porsche Sales Forecasting";

/// Height of the single comparison panel.
pub const COMPARISON_HEIGHT: u32 = 450;

/// Point annotation: the value rounded to a whole unit, no decimals.
/// Ties round to even, so 2.5 is labelled "2".
pub fn value_label(value: f64) -> String {
    format!("{:.0}", value)
}

pub fn build_chart(merged: &MergedSeries) -> ChartSpec {
    build_chart_titled(merged, DEFAULT_TITLE)
}

/// One trace per distinct label, in first-appearance order. Points keep
/// their series order inside each trace.
pub fn build_chart_titled(merged: &MergedSeries, title: &str) -> ChartSpec {
    let traces = merged
        .labels()
        .into_iter()
        .map(|label| Trace {
            name: label.to_string(),
            points: merged
                .points_for(label)
                .map(|p| ChartPoint {
                    x: PeriodKey::Date(p.period),
                    y: Some(p.value),
                    label: Some(value_label(p.value)),
                })
                .collect(),
        })
        .collect();

    ChartSpec {
        title: Some(title.to_string()),
        height: COMPARISON_HEIGHT,
        show_legend: true,
        shared_x: true,
        panels: vec![Panel {
            y_title: VALUE_COL.to_string(),
            x_title: Some("Period".to_string()),
            height: COMPARISON_HEIGHT,
            traces,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastMethod;
    use crate::merge::{MergedPoint, SourceLabel};
    use chrono::NaiveDate;

    fn point(month: u32, value: f64, source: SourceLabel) -> MergedPoint {
        MergedPoint {
            period: NaiveDate::from_ymd_opt(2023, month, 1).unwrap(),
            value,
            source,
        }
    }

    fn merged() -> MergedSeries {
        let arima = SourceLabel::Forecast(ForecastMethod::Arima);
        MergedSeries {
            model_line: "Porsche_Cayenne".into(),
            points: vec![
                point(1, 1204.4, SourceLabel::Actual),
                point(2, 1190.6, SourceLabel::Actual),
                point(3, 1211.2, arima),
                point(4, 1230.8, arima),
            ],
        }
    }

    #[test]
    fn one_trace_per_label() {
        let chart = build_chart(&merged());
        assert_eq!(chart.panels.len(), 1);
        assert_eq!(chart.trace_names(), vec!["Actual", "ARIMA"]);
        assert!(chart.show_legend);
        assert_eq!(chart.title.as_deref(), Some(DEFAULT_TITLE));
    }

    #[test]
    fn points_carry_rounded_labels() {
        let chart = build_chart(&merged());
        let labels: Vec<_> = chart.panels[0].traces[0]
            .points
            .iter()
            .map(|p| p.label.clone().unwrap())
            .collect();
        assert_eq!(labels, vec!["1204", "1191"]);
    }

    #[test]
    fn builder_does_not_reorder() {
        let chart = build_chart(&merged());
        let ys: Vec<_> = chart.panels[0].traces[1].points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![Some(1211.2), Some(1230.8)]);
    }

    #[test]
    fn custom_title() {
        let chart = build_chart_titled(&merged(), "Cayenne outlook");
        assert_eq!(chart.title.as_deref(), Some("Cayenne outlook"));
    }

    #[test]
    fn value_label_has_no_decimals() {
        assert_eq!(value_label(99.6), "100");
        assert_eq!(value_label(12.0), "12");
        assert_eq!(value_label(1234.49), "1234");
    }

    #[test]
    fn value_label_rounds_ties_to_even() {
        assert_eq!(value_label(2.5), "2");
        assert_eq!(value_label(3.5), "4");
    }
}
