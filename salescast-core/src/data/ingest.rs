use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::data::aux_table::AuxTable;
use crate::data::period::parse_period;
use crate::data::schema::{SalesSchema, SchemaError, METHOD_COL, MODEL_COL, PERIOD_COL, VALUE_COL};
use crate::data::tables::{ForecastTable, HistoryTable};
use crate::domain::{ForecastMethod, ForecastRecord, HistoryRow, MethodParseError, ModelLine};

/// On-disk format of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(TableFormat::Csv),
            "parquet" | "pq" => Some(TableFormat::Parquet),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}

/// Data ingestor for CSV and Parquet table files
pub struct DataIngestor {
    history_schema: Schema,
    forecast_schema: Schema,
}

impl DataIngestor {
    pub fn new() -> Self {
        Self {
            history_schema: SalesSchema::history(),
            forecast_schema: SalesSchema::forecast(),
        }
    }

    /// Ingest a `Sales_History` file.
    pub fn ingest_history(&self, path: &Path) -> Result<HistoryTable, DataError> {
        let df = self.read_frame(path, Some(&self.history_schema))?;
        SalesSchema::validate(&df, &self.history_schema)?;
        let table = history_from_frame(&df)?;
        debug!(path = %path.display(), rows = table.len(), "ingested history");
        Ok(table)
    }

    /// Ingest a `Sales_Forecast` file.
    pub fn ingest_forecast(&self, path: &Path) -> Result<ForecastTable, DataError> {
        let df = self.read_frame(path, Some(&self.forecast_schema))?;
        SalesSchema::validate(&df, &self.forecast_schema)?;
        let table = forecast_from_frame(&df)?;
        debug!(path = %path.display(), rows = table.len(), "ingested forecasts");
        Ok(table)
    }

    /// Ingest an auxiliary table (`Demand_History`, `Model_Info`), keeping every cell as text.
    pub fn ingest_aux(&self, path: &Path, name: &str) -> Result<AuxTable, DataError> {
        match self.format_of(path)? {
            TableFormat::Csv => {
                let file = std::fs::File::open(path)
                    .map_err(|e| DataError::IngestFailed(format!("{}: {e}", path.display())))?;
                AuxTable::from_csv_reader(name, file, MODEL_COL)
            }
            TableFormat::Parquet => {
                let df = self.read_frame(path, None)?;
                AuxTable::from_frame(name, &df, MODEL_COL)
            }
        }
    }

    fn format_of(&self, path: &Path) -> Result<TableFormat, DataError> {
        TableFormat::from_path(path)
            .ok_or_else(|| DataError::IngestFailed(format!("unsupported file type: {}", path.display())))
    }

    fn read_frame(&self, path: &Path, dtypes: Option<&Schema>) -> Result<DataFrame, DataError> {
        let lazy = match self.format_of(path)? {
            TableFormat::Csv => self.ingest_csv(path, dtypes)?,
            TableFormat::Parquet => self.ingest_parquet(path)?,
        };
        lazy.collect()
            .map_err(|e| DataError::IngestFailed(format!("{}: {e}", path.display())))
    }

    /// Ingest CSV file
    pub fn ingest_csv(&self, path: &Path, dtypes: Option<&Schema>) -> Result<LazyFrame, DataError> {
        LazyCsvReader::new(path)
            .with_dtype_overwrite(dtypes.map(|s| Arc::new(s.clone())))
            .with_has_header(true)
            .finish()
            .map_err(|e| DataError::IngestFailed(e.to_string()))
    }

    /// Ingest Parquet file
    pub fn ingest_parquet(&self, path: &Path) -> Result<LazyFrame, DataError> {
        LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| DataError::IngestFailed(e.to_string()))
    }
}

impl Default for DataIngestor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a validated history frame into rows, keeping table order.
pub fn history_from_frame(df: &DataFrame) -> Result<HistoryTable, DataError> {
    let lines = text_column(df, MODEL_COL)?;
    let periods = text_column(df, PERIOD_COL)?;
    let values = float_column(df, VALUE_COL)?;

    let mut rows = Vec::with_capacity(df.height());
    for (i, ((line, period), value)) in lines.into_iter().zip(periods).zip(values).enumerate() {
        rows.push(HistoryRow {
            model_line: ModelLine::new(require(line, i, MODEL_COL)?),
            period: parse_period(&require(period, i, PERIOD_COL)?)?,
            value: require(value, i, VALUE_COL)?,
        });
    }
    Ok(HistoryTable::new(rows))
}

/// Convert a validated forecast frame into records, keeping table order.
pub fn forecast_from_frame(df: &DataFrame) -> Result<ForecastTable, DataError> {
    let lines = text_column(df, MODEL_COL)?;
    let methods = text_column(df, METHOD_COL)?;
    let periods = text_column(df, PERIOD_COL)?;
    let values = float_column(df, VALUE_COL)?;

    let mut records = Vec::with_capacity(df.height());
    let cells = lines.into_iter().zip(methods).zip(periods).zip(values);
    for (i, (((line, method), period), value)) in cells.enumerate() {
        let method: ForecastMethod = require(method, i, METHOD_COL)?.parse()?;
        records.push(ForecastRecord {
            model_line: ModelLine::new(require(line, i, MODEL_COL)?),
            method,
            period: parse_period(&require(period, i, PERIOD_COL)?)?,
            value: require(value, i, VALUE_COL)?,
        });
    }
    Ok(ForecastTable::new(records))
}

fn require<T>(cell: Option<T>, row: usize, column: &str) -> Result<T, DataError> {
    cell.ok_or_else(|| DataError::ValidationFailed(format!("row {row}: missing value in column {column}")))
}

pub(crate) fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DataError> {
    let column = df
        .column(name)
        .map_err(|_| DataError::Schema(SchemaError::MissingColumn(name.to_string())))?
        .cast(&DataType::String)
        .map_err(|e| DataError::ValidationFailed(format!("column {name}: {e}")))?;
    let ca = column
        .str()
        .map_err(|e| DataError::ValidationFailed(format!("column {name}: {e}")))?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DataError> {
    let column = df
        .column(name)
        .map_err(|_| DataError::Schema(SchemaError::MissingColumn(name.to_string())))?
        .cast(&DataType::Float64)
        .map_err(|e| DataError::ValidationFailed(format!("column {name}: {e}")))?;
    let ca = column
        .f64()
        .map_err(|e| DataError::ValidationFailed(format!("column {name}: {e}")))?;
    Ok(ca.into_iter().collect())
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Ingest failed: {0}")]
    IngestFailed(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Unparseable period: '{0}'")]
    BadPeriod(String),

    #[error(transparent)]
    UnknownMethod(#[from] MethodParseError),
}
