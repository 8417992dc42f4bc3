//! Time series points, history rows, and the period index shared by charts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ModelLine;

/// A single observation: one value for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(period: NaiveDate, value: f64) -> Self {
        Self { period, value }
    }
}

/// One row of the `Sales_History` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub model_line: ModelLine,
    pub period: NaiveDate,
    pub value: f64,
}

/// The chronological history of a single model line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub model_line: ModelLine,
    pub points: Vec<TimeSeriesPoint>,
}

impl HistorySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// X-axis key of a charted or decomposed series.
///
/// Dated series use `Date`. Series indexed by observation number (the
/// full history table, whose periods repeat across lines) use `Row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodKey {
    Date(NaiveDate),
    Row(usize),
}

impl PeriodKey {
    /// Numeric position for plotting: days since the Unix epoch, or the row number.
    pub fn ordinal(&self) -> f64 {
        match self {
            PeriodKey::Date(d) => {
                let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
                (*d - epoch).num_days() as f64
            }
            PeriodKey::Row(i) => *i as f64,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PeriodKey::Row(i) => write!(f, "{i}"),
        }
    }
}

impl From<NaiveDate> for PeriodKey {
    fn from(d: NaiveDate) -> Self {
        PeriodKey::Date(d)
    }
}
