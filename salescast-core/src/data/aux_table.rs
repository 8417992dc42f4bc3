//! Auxiliary metadata tables (`Demand_History`, `Model_Info`).
//!
//! These are pass-through: the dashboard never interprets their fields, it
//! only filters them by model line and shows them transposed (one row per
//! field, one column per matching record).

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::data::ingest::{text_column, DataError};
use crate::domain::ModelLine;

/// A text-valued table keyed by a model-line column.
///
/// Deserializing goes through [`AuxTable::new`], so a loaded table is
/// validated the same way as one read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuxTableRepr", into = "AuxTableRepr")]
pub struct AuxTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    key_index: usize,
}

/// Serialized form: the key is stored by column name.
#[derive(Serialize, Deserialize)]
struct AuxTableRepr {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    key_column: String,
}

impl TryFrom<AuxTableRepr> for AuxTable {
    type Error = DataError;

    fn try_from(repr: AuxTableRepr) -> Result<Self, DataError> {
        Self::new(repr.name, repr.columns, repr.rows, &repr.key_column)
    }
}

impl From<AuxTable> for AuxTableRepr {
    fn from(table: AuxTable) -> Self {
        let key_column = table.columns.get(table.key_index).cloned().unwrap_or_default();
        Self {
            name: table.name,
            columns: table.columns,
            rows: table.rows,
            key_column,
        }
    }
}

impl AuxTable {
    /// Build a table, locating `key_column` in `columns`.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        key_column: &str,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let key_index = columns
            .iter()
            .position(|c| c == key_column)
            .ok_or_else(|| {
                DataError::ValidationFailed(format!("{name}: missing key column {key_column}"))
            })?;
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(DataError::ValidationFailed(format!(
                "{name}: row {i} has {} cells, expected {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            name,
            columns,
            rows,
            key_index,
        })
    }

    /// Read a CSV table with a header row.
    pub fn from_csv_reader<R: Read>(name: &str, reader: R, key_column: &str) -> Result<Self, DataError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let columns: Vec<String> = rdr
            .headers()
            .map_err(|e| DataError::IngestFailed(format!("{name}: {e}")))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| DataError::IngestFailed(format!("{name}: {e}")))?;
            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        Self::new(name, columns, rows, key_column)
    }

    /// Convert a DataFrame, casting every column to text. Nulls become empty cells.
    pub fn from_frame(name: &str, df: &DataFrame, key_column: &str) -> Result<Self, DataError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();

        let mut rows = vec![Vec::with_capacity(columns.len()); df.height()];
        for column in &columns {
            for (row, cell) in rows.iter_mut().zip(text_column(df, column)?) {
                row.push(cell.unwrap_or_default());
            }
        }

        Self::new(name, columns, rows, key_column)
    }

    pub fn contains_line(&self, line: &ModelLine) -> bool {
        self.rows_for(line).next().is_some()
    }

    /// Rows for `line`, paired with their position in the table.
    pub fn rows_for<'a>(&'a self, line: &'a ModelLine) -> impl Iterator<Item = (usize, &'a [String])> + 'a {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.get(self.key_index).is_some_and(|k| k == line.as_str()))
            .map(|(i, r)| (i, r.as_slice()))
    }

    /// Transposed view of the rows for `line`: one output row per field.
    pub fn transpose_for(&self, line: &ModelLine) -> TransposedView {
        let matching: Vec<(usize, &[String])> = self.rows_for(line).collect();
        let headers = matching.iter().map(|(i, _)| i.to_string()).collect();
        let rows = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, key)| KeyValueRow {
                key: key.clone(),
                values: matching.iter().map(|(_, r)| r[c].clone()).collect(),
            })
            .collect();

        TransposedView {
            title: self.name.clone(),
            headers,
            rows,
        }
    }
}

/// A table shown field-per-row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransposedView {
    pub title: String,
    /// Source row numbers of the records, one per value column.
    pub headers: Vec<String>,
    pub rows: Vec<KeyValueRow>,
}

impl TransposedView {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueRow {
    pub key: String,
    pub values: Vec<String>,
}
