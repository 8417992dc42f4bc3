//! Dataset loading for the dashboard.
//!
//! Resolves the four table files in a data directory and implements the
//! fallback policy:
//! 1. If the directory exists → load every table from it (CSV preferred over Parquet)
//! 2. If it is missing and sample data is allowed → generate the sample dataset (flagged)
//! 3. Otherwise → fail with a clear error
//!
//! A directory that exists but lacks a table is always an error; the sample
//! fallback never papers over a half-populated directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use salescast_core::data::{
    DataError, DataIngestor, SalesTables, TableFormat, DEMAND_TABLE, FORECAST_TABLE,
    HISTORY_TABLE, MODEL_INFO_TABLE,
};

use crate::config::DashboardConfig;
use crate::sample::generate_sample;

/// File stems of the four tables, paired with their table names.
pub const TABLE_FILES: [(&str, &str); 4] = [
    ("sales_history", HISTORY_TABLE),
    ("sales_forecast", FORECAST_TABLE),
    ("demand_history", DEMAND_TABLE),
    ("model_info", MODEL_INFO_TABLE),
];

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data directory '{0}' does not exist (use --sample for synthetic data)")]
    MissingDirectory(PathBuf),

    #[error("no {table} table in '{dir}' (expected {stem}.csv or {stem}.parquet)")]
    MissingTable {
        table: &'static str,
        stem: &'static str,
        dir: PathBuf,
    },

    #[error("failed to load {table}: {source}")]
    Table {
        table: &'static str,
        #[source]
        source: DataError,
    },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Options controlling how the dataset is loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// If true, generate the sample dataset when the data directory is missing.
    pub allow_sample: bool,
}

/// Where a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Files,
    Sample,
}

/// A loaded dataset with provenance. Tables are shared read-only.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub tables: Arc<SalesTables>,
    pub source: DataSource,
    /// BLAKE3 fingerprint over all four tables.
    pub fingerprint: String,
}

impl LoadedData {
    pub fn new(tables: SalesTables, source: DataSource) -> Self {
        let fingerprint = tables.fingerprint();
        Self {
            tables: Arc::new(tables),
            source,
            fingerprint,
        }
    }

    pub fn is_sample(&self) -> bool {
        self.source == DataSource::Sample
    }
}

/// Find `<stem>.csv` or `<stem>.parquet` in `dir`. CSV wins when both exist.
pub fn resolve_table_path(dir: &Path, stem: &str) -> Option<PathBuf> {
    [TableFormat::Csv, TableFormat::Parquet]
        .into_iter()
        .map(|f| dir.join(format!("{stem}.{}", f.extension())))
        .find(|p| p.is_file())
}

/// Load the dataset for `config`, falling back to sample data when allowed.
pub fn load_dataset(config: &DashboardConfig, opts: &LoadOptions) -> Result<LoadedData, LoadError> {
    let dir = &config.data_dir;
    if dir.is_dir() {
        return load_dir(dir);
    }

    if opts.allow_sample {
        warn!(dir = %dir.display(), "data directory missing; using generated sample data");
        let tables = generate_sample(&config.model_lines(), &config.aggregate())?;
        return Ok(LoadedData::new(tables, DataSource::Sample));
    }

    Err(LoadError::MissingDirectory(dir.clone()))
}

/// Load all four tables from `dir`.
pub fn load_dir(dir: &Path) -> Result<LoadedData, LoadError> {
    let ingestor = DataIngestor::new();
    let path_of = |stem: &'static str, table: &'static str| {
        resolve_table_path(dir, stem).ok_or_else(|| LoadError::MissingTable {
            table,
            stem,
            dir: dir.to_path_buf(),
        })
    };
    let wrap = |table: &'static str| move |source: DataError| LoadError::Table { table, source };

    let [history_file, forecast_file, demand_file, info_file] = TABLE_FILES;

    let history = ingestor
        .ingest_history(&path_of(history_file.0, history_file.1)?)
        .map_err(wrap(HISTORY_TABLE))?;
    info!(table = HISTORY_TABLE, rows = history.len(), lines = history.lines().len(), "loaded");

    let forecasts = ingestor
        .ingest_forecast(&path_of(forecast_file.0, forecast_file.1)?)
        .map_err(wrap(FORECAST_TABLE))?;
    info!(table = FORECAST_TABLE, rows = forecasts.len(), "loaded");

    let demand = ingestor
        .ingest_aux(&path_of(demand_file.0, demand_file.1)?, DEMAND_TABLE)
        .map_err(wrap(DEMAND_TABLE))?;
    info!(table = DEMAND_TABLE, rows = demand.rows.len(), "loaded");

    let model_info = ingestor
        .ingest_aux(&path_of(info_file.0, info_file.1)?, MODEL_INFO_TABLE)
        .map_err(wrap(MODEL_INFO_TABLE))?;
    info!(table = MODEL_INFO_TABLE, rows = model_info.rows.len(), "loaded");

    Ok(LoadedData::new(
        SalesTables {
            history,
            forecasts,
            demand,
            model_info,
        },
        DataSource::Files,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::write_csv_dataset;

    fn config_for(dir: &Path) -> DashboardConfig {
        DashboardConfig {
            data_dir: dir.to_path_buf(),
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn csv_preferred_over_parquet() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sales_history.parquet"), b"").unwrap();
        std::fs::write(dir.path().join("sales_history.csv"), b"").unwrap();
        let path = resolve_table_path(dir.path(), "sales_history").unwrap();
        assert_eq!(path.extension().unwrap(), "csv");
    }

    #[test]
    fn parquet_used_when_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model_info.parquet"), b"").unwrap();
        let path = resolve_table_path(dir.path(), "model_info").unwrap();
        assert_eq!(path.extension().unwrap(), "parquet");
        assert!(resolve_table_path(dir.path(), "demand_history").is_none());
    }

    #[test]
    fn missing_dir_without_sample_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("absent"));
        let err = load_dataset(&config, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingDirectory(_)));
    }

    #[test]
    fn missing_dir_with_sample_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("absent"));
        let data = load_dataset(&config, &LoadOptions { allow_sample: true }).unwrap();
        assert!(data.is_sample());
        assert_eq!(data.tables.history.lines().len(), 6);
    }

    #[test]
    fn half_populated_dir_names_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let sample = load_dataset(&config_for(&dir.path().join("x")), &LoadOptions { allow_sample: true }).unwrap();
        write_csv_dataset(&sample.tables, dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("model_info.csv")).unwrap();

        let err = load_dataset(&config_for(dir.path()), &LoadOptions { allow_sample: true }).unwrap_err();
        match err {
            LoadError::MissingTable { table, .. } => assert_eq!(table, MODEL_INFO_TABLE),
            other => panic!("expected MissingTable, got {other:?}"),
        }
    }

    #[test]
    fn written_sample_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let sample = load_dataset(&config_for(&dir.path().join("x")), &LoadOptions { allow_sample: true }).unwrap();
        write_csv_dataset(&sample.tables, dir.path()).unwrap();

        let loaded = load_dataset(&config_for(dir.path()), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.source, DataSource::Files);
        assert_eq!(loaded.tables.history.len(), sample.tables.history.len());
        assert_eq!(loaded.tables.forecasts.len(), sample.tables.forecasts.len());
        assert_eq!(loaded.fingerprint, sample.fingerprint);
    }
}
