//! Loaded table snapshots. Read-only once built.

use serde::{Deserialize, Serialize};

use crate::data::aux_table::AuxTable;
use crate::domain::{
    ForecastMethod, ForecastRecord, HistoryRow, HistorySeries, ModelLine, TimeSeriesPoint,
};

/// The `Sales_History` table, in stored row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryTable {
    rows: Vec<HistoryRow>,
}

impl HistoryTable {
    pub fn new(rows: Vec<HistoryRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct lines in order of first appearance.
    pub fn lines(&self) -> Vec<ModelLine> {
        let mut seen: Vec<ModelLine> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.model_line) {
                seen.push(row.model_line.clone());
            }
        }
        seen
    }

    pub fn contains_line(&self, line: &ModelLine) -> bool {
        self.rows.iter().any(|r| &r.model_line == line)
    }

    /// The chronological history of one line.
    pub fn series_for(&self, line: &ModelLine) -> HistorySeries {
        let mut points: Vec<TimeSeriesPoint> = self
            .rows
            .iter()
            .filter(|r| &r.model_line == line)
            .map(|r| TimeSeriesPoint::new(r.period, r.value))
            .collect();
        points.sort_by_key(|p| p.period);
        HistorySeries {
            model_line: line.clone(),
            points,
        }
    }

    /// Every value of the table, in stored order, regardless of line.
    pub fn all_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }
}

/// The `Sales_Forecast` table, in stored row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    records: Vec<ForecastRecord>,
}

impl ForecastTable {
    pub fn new(records: Vec<ForecastRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_line(&self, line: &ModelLine) -> bool {
        self.records.iter().any(|r| &r.model_line == line)
    }

    /// Methods that have at least one record for `line`, in enumeration order.
    pub fn methods_for(&self, line: &ModelLine) -> Vec<ForecastMethod> {
        ForecastMethod::ALL
            .into_iter()
            .filter(|m| {
                self.records
                    .iter()
                    .any(|r| &r.model_line == line && r.method == *m)
            })
            .collect()
    }
}

/// All four dashboard tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTables {
    pub history: HistoryTable,
    pub forecasts: ForecastTable,
    pub demand: AuxTable,
    pub model_info: AuxTable,
}

impl SalesTables {
    /// Deterministic BLAKE3 fingerprint over all four tables.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(b"history");
        for row in self.history.rows() {
            hasher.update(row.model_line.as_str().as_bytes());
            hasher.update(row.period.to_string().as_bytes());
            hasher.update(&row.value.to_le_bytes());
        }

        hasher.update(b"forecast");
        for rec in self.forecasts.records() {
            hasher.update(rec.model_line.as_str().as_bytes());
            hasher.update(rec.method.table_name().as_bytes());
            hasher.update(rec.period.to_string().as_bytes());
            hasher.update(&rec.value.to_le_bytes());
        }

        for table in [&self.demand, &self.model_info] {
            hasher.update(table.name.as_bytes());
            for cell in table.columns.iter().chain(table.rows.iter().flatten()) {
                hasher.update(cell.as_bytes());
                hasher.update(&[0]);
            }
        }

        hasher.finalize().to_hex().to_string()
    }
}
