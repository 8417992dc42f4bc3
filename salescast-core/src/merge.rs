//! Forecast selection and merging.
//!
//! Builds the comparison series for one model line: its actual history,
//! then each selected method's forecasts. Group order is fixed (actuals,
//! then methods in enumeration order) and each group is chronological, so
//! a renderer can draw one contiguous line per label without re-sorting.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use crate::data::HISTORY_TABLE;
use crate::domain::{ForecastMethod, ForecastRecord, HistoryRow, ModelLine};
use crate::error::{DashboardError, Result};

/// Label of the history group in a merged series.
pub const ACTUAL_LABEL: &str = "Actual";

/// Where a merged point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceLabel {
    Actual,
    Forecast(ForecastMethod),
}

impl SourceLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceLabel::Actual => ACTUAL_LABEL,
            SourceLabel::Forecast(m) => m.table_name(),
        }
    }

    pub fn is_actual(self) -> bool {
        matches!(self, SourceLabel::Actual)
    }
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SourceLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == ACTUAL_LABEL {
            return Ok(SourceLabel::Actual);
        }
        s.parse::<ForecastMethod>()
            .map(SourceLabel::Forecast)
            .map_err(serde::de::Error::custom)
    }
}

/// One labeled point of a merged series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedPoint {
    pub period: NaiveDate,
    pub value: f64,
    pub source: SourceLabel,
}

/// Label-tagged points for one model line, grouped by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSeries {
    pub model_line: ModelLine,
    pub points: Vec<MergedPoint>,
}

impl MergedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct labels in order of first appearance.
    pub fn labels(&self) -> Vec<SourceLabel> {
        let mut labels = Vec::new();
        for p in &self.points {
            if !labels.contains(&p.source) {
                labels.push(p.source);
            }
        }
        labels
    }

    /// Points carrying `label`, in series order.
    pub fn points_for(&self, label: SourceLabel) -> impl Iterator<Item = &MergedPoint> {
        self.points.iter().filter(move |p| p.source == label)
    }
}

/// The two outputs of a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOutput {
    /// Actual history followed by every selected method's forecasts.
    pub merged: MergedSeries,
    /// The same forecast points without the actuals.
    pub forecast_only: MergedSeries,
}

/// Merge a line's history with the selected methods' forecasts.
///
/// `methods` may arrive in any order; they are always appended in
/// enumeration order. An empty set fails with `NoMethodSelected`, and a
/// line with no history fails with `UnknownModelLine`.
pub fn merge(
    history: &[HistoryRow],
    forecasts: &[ForecastRecord],
    model_line: &ModelLine,
    methods: impl IntoIterator<Item = ForecastMethod>,
) -> Result<MergeOutput> {
    let methods: BTreeSet<ForecastMethod> = methods.into_iter().collect();
    if methods.is_empty() {
        return Err(DashboardError::NoMethodSelected);
    }

    let mut actual: Vec<MergedPoint> = history
        .iter()
        .filter(|r| &r.model_line == model_line)
        .map(|r| MergedPoint {
            period: r.period,
            value: r.value,
            source: SourceLabel::Actual,
        })
        .collect();
    if actual.is_empty() {
        return Err(DashboardError::UnknownModelLine {
            line: model_line.to_string(),
            table: HISTORY_TABLE,
        });
    }
    actual.sort_by_key(|p| p.period);

    let mut forecast_points = Vec::new();
    for method in methods {
        let mut group: Vec<MergedPoint> = forecasts
            .iter()
            .filter(|r| &r.model_line == model_line && r.method == method)
            .map(|r| MergedPoint {
                period: r.period,
                value: r.value,
                source: SourceLabel::Forecast(method),
            })
            .collect();
        group.sort_by_key(|p| p.period);
        forecast_points.extend(group);
    }

    let mut merged = actual;
    merged.extend_from_slice(&forecast_points);

    Ok(MergeOutput {
        merged: MergedSeries {
            model_line: model_line.clone(),
            points: merged,
        },
        forecast_only: MergedSeries {
            model_line: model_line.clone(),
            points: forecast_points,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;

    fn month(i: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Months::new(i)
    }

    fn history() -> Vec<HistoryRow> {
        let mut rows = Vec::new();
        for i in 0..4 {
            rows.push(HistoryRow {
                model_line: "Porsche_Macan".into(),
                period: month(i),
                value: 100.0 + i as f64,
            });
            rows.push(HistoryRow {
                model_line: "All_Models".into(),
                period: month(i),
                value: 900.0 + i as f64,
            });
        }
        rows
    }

    fn forecasts() -> Vec<ForecastRecord> {
        let mut recs = Vec::new();
        for method in [ForecastMethod::MovingAverage, ForecastMethod::Arima, ForecastMethod::Prophet] {
            // Stored newest first to exercise the per-group sort.
            for i in (4..6).rev() {
                recs.push(ForecastRecord {
                    model_line: "Porsche_Macan".into(),
                    method,
                    period: month(i),
                    value: 200.0 + method.index() as f64 * 10.0 + i as f64,
                });
            }
        }
        recs
    }

    #[test]
    fn groups_follow_enumeration_order() {
        let out = merge(
            &history(),
            &forecasts(),
            &"Porsche_Macan".into(),
            [ForecastMethod::MovingAverage, ForecastMethod::Prophet],
        )
        .unwrap();

        assert_eq!(
            out.merged.labels(),
            vec![
                SourceLabel::Actual,
                SourceLabel::Forecast(ForecastMethod::Prophet),
                SourceLabel::Forecast(ForecastMethod::MovingAverage),
            ]
        );
        assert_eq!(out.merged.len(), 4 + 2 + 2);
    }

    #[test]
    fn each_group_is_chronological() {
        let out = merge(&history(), &forecasts(), &"Porsche_Macan".into(), ForecastMethod::ALL).unwrap();
        for label in out.merged.labels() {
            let periods: Vec<_> = out.merged.points_for(label).map(|p| p.period).collect();
            let mut sorted = periods.clone();
            sorted.sort();
            assert_eq!(periods, sorted, "{label} not chronological");
        }
    }

    #[test]
    fn forecast_only_drops_actuals() {
        let out = merge(&history(), &forecasts(), &"Porsche_Macan".into(), [ForecastMethod::Arima]).unwrap();
        assert_eq!(out.forecast_only.len(), 2);
        assert!(out.forecast_only.points.iter().all(|p| !p.source.is_actual()));
        assert_eq!(&out.merged.points[4..], out.forecast_only.points.as_slice());
    }

    #[test]
    fn other_lines_are_excluded() {
        let out = merge(&history(), &forecasts(), &"Porsche_Macan".into(), [ForecastMethod::Arima]).unwrap();
        assert!(out.merged.points.iter().all(|p| p.value < 900.0));
    }

    #[test]
    fn empty_method_set_is_rejected() {
        let err = merge(&history(), &forecasts(), &"Porsche_Macan".into(), Vec::new()).unwrap_err();
        assert_eq!(err, DashboardError::NoMethodSelected);
    }

    #[test]
    fn line_without_history_is_unknown() {
        let err = merge(&history(), &forecasts(), &"Porsche_914".into(), [ForecastMethod::Arima]).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownModelLine { .. }));
    }

    #[test]
    fn source_label_serializes_as_name() {
        let json = serde_json::to_string(&SourceLabel::Forecast(ForecastMethod::Prophet)).unwrap();
        assert_eq!(json, "\"FaceBook_Prophet\"");
        let back: SourceLabel = serde_json::from_str("\"Actual\"").unwrap();
        assert_eq!(back, SourceLabel::Actual);
    }
}
