//! End-to-end scenarios for merging and charting one model line.

use chrono::{Months, NaiveDate};
use salescast_core::chart::build_chart;
use salescast_core::domain::{ForecastMethod, ForecastRecord, HistoryRow, ModelLineSelection};
use salescast_core::merge::{merge, SourceLabel};
use salescast_core::DashboardError;

fn month(i: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap() + Months::new(i)
}

/// 24 monthly Macan points valued 100..123 plus an unrelated Cayenne line.
fn history() -> Vec<HistoryRow> {
    let mut rows = Vec::new();
    for i in 0..24 {
        rows.push(HistoryRow {
            model_line: "Porsche_Macan".into(),
            period: month(i),
            value: 100.0 + i as f64,
        });
        rows.push(HistoryRow {
            model_line: "Porsche_Cayenne".into(),
            period: month(i),
            value: 500.0 + i as f64,
        });
    }
    rows
}

fn forecasts() -> Vec<ForecastRecord> {
    let mut recs = Vec::new();
    for method in ForecastMethod::ALL {
        for i in 24..27 {
            recs.push(ForecastRecord {
                model_line: "Porsche_Macan".into(),
                method,
                period: month(i),
                value: 124.0 + i as f64 + method.index() as f64,
            });
        }
    }
    recs
}

#[test]
fn macan_with_prophet_yields_27_points() {
    let selection = ModelLineSelection::from_toggles("Porsche_Macan", true, false, false);
    let out = merge(
        &history(),
        &forecasts(),
        &selection.line,
        selection.methods.iter().copied(),
    )
    .unwrap();

    assert_eq!(out.merged.len(), 27);

    let actual: Vec<f64> = out
        .merged
        .points
        .iter()
        .take_while(|p| p.source == SourceLabel::Actual)
        .map(|p| p.value)
        .collect();
    let expected: Vec<f64> = (100..124).map(f64::from).collect();
    assert_eq!(actual, expected);

    assert!(out.merged.points[24..]
        .iter()
        .all(|p| p.source == SourceLabel::Forecast(ForecastMethod::Prophet)));
    assert_eq!(out.forecast_only.len(), 3);
}

#[test]
fn no_methods_means_no_chart() {
    let selection = ModelLineSelection::from_toggles("Porsche_Macan", false, false, false);
    assert_eq!(selection.validate(), Err(DashboardError::NoMethodSelected));

    let result = merge(
        &history(),
        &forecasts(),
        &selection.line,
        selection.methods.iter().copied(),
    );
    assert_eq!(result.unwrap_err().to_string(), "Please Select an Algorithm!");
}

#[test]
fn chart_has_one_trace_per_selected_method() {
    let out = merge(
        &history(),
        &forecasts(),
        &"Porsche_Macan".into(),
        [ForecastMethod::MovingAverage, ForecastMethod::Arima],
    )
    .unwrap();
    let chart = build_chart(&out.merged);
    assert_eq!(chart.trace_names(), vec!["Actual", "ARIMA", "Moving_Average"]);

    let actual = &chart.panels[0].traces[0];
    assert_eq!(actual.points.len(), 24);
    assert_eq!(actual.points[0].label.as_deref(), Some("100"));
}
