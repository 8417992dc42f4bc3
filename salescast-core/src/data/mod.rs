//! Table ingestion: the four dashboard tables from CSV or Parquet files.

pub mod aux_table;
pub mod ingest;
pub mod period;
pub mod schema;
pub mod tables;

pub use aux_table::{AuxTable, KeyValueRow, TransposedView};
pub use ingest::{DataError, DataIngestor, TableFormat};
pub use period::{format_period, parse_period};
pub use schema::{
    SalesSchema, SchemaError, DEMAND_TABLE, FORECAST_TABLE, HISTORY_TABLE, METHOD_COL,
    MODEL_COL, MODEL_INFO_TABLE, PERIOD_COL, VALUE_COL,
};
pub use tables::{ForecastTable, HistoryTable, SalesTables};
