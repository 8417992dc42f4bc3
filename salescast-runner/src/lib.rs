//! Salescast Runner — configuration, dataset loading, view orchestration, export.
//!
//! This crate builds on `salescast-core` to provide:
//! - TOML dashboard configuration with defaults for every field
//! - Dataset loading from CSV/Parquet files with a sample-data fallback
//! - The presentation orchestrator that turns a selection into a full view
//! - CSV/JSON/Markdown export and artifact bundles

pub mod config;
pub mod data_loader;
pub mod export;
pub mod orchestrator;
pub mod sample;

pub use config::{
    BestModelLabels, ChartConfig, ConfigError, DashboardConfig, DecompositionConfig,
    DecompositionScope,
};
pub use data_loader::{load_dataset, load_dir, DataSource, LoadError, LoadOptions, LoadedData};
pub use export::{generate_report, save_artifacts, RunManifest, SCHEMA_VERSION};
pub use orchestrator::{build_view, decomposition_for, run_forecast, DashboardView, ForecastRow, ViewError};
pub use sample::{generate_sample, write_csv_dataset};
