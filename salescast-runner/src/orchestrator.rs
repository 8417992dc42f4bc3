//! Presentation orchestrator — wires one selection through the pipeline.
//!
//! Validation happens up front, before any chart is built:
//! 1. no method selected → `NoMethodSelected`
//! 2. line missing from a table it needs → `UnknownModelLine`
//! 3. decomposition preconditions → `InsufficientData`
//!
//! A failed action leaves nothing behind; the caller shows the message and
//! stays ready for the next selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use salescast_core::analysis::{decompose, decompose_rows, DecompositionResult};
use salescast_core::chart::{build_chart_titled, layout_with_height, ChartSpec};
use salescast_core::data::{
    format_period, SalesTables, TransposedView, DEMAND_TABLE, FORECAST_TABLE, HISTORY_TABLE,
    MODEL_INFO_TABLE,
};
use salescast_core::domain::{ForecastMethod, ModelLine, ModelLineSelection};
use salescast_core::merge::{merge, MergedSeries};
use salescast_core::DashboardError;

use crate::config::{ConfigError, DashboardConfig, DecompositionScope};
use crate::data_loader::{load_dataset, LoadError, LoadOptions, LoadedData};

/// Errors from building a view.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl ViewError {
    /// True for user-input problems the dashboard reports inline.
    pub fn is_validation(&self) -> bool {
        matches!(self, ViewError::Dashboard(DashboardError::NoMethodSelected))
    }
}

/// One row of the forecast-only table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub model_line: String,
    pub forecast_method: String,
    /// Timezone-naive `YYYY-MM-DD`.
    pub period: String,
    pub value: f64,
}

/// Everything the display surface shows for one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub selection: ModelLineSelection,
    pub comparison_chart: ChartSpec,
    pub decomposition_chart: ChartSpec,
    pub decomposition: DecompositionResult,
    pub forecast_table: Vec<ForecastRow>,
    pub best_model: String,
    pub demand: TransposedView,
    /// Present only when ARIMA is selected.
    pub diagnostics: Option<TransposedView>,
    pub fingerprint: String,
    pub sample_data: bool,
}

/// Build the full view for `selection` over already-loaded data.
pub fn build_view(
    selection: &ModelLineSelection,
    data: &LoadedData,
    config: &DashboardConfig,
) -> Result<DashboardView, ViewError> {
    let methods: Vec<&str> = selection.methods.iter().map(|m| m.table_name()).collect();
    debug!(line = %selection.line, ?methods, "forecast requested");

    let result = compose(selection, &data.tables, config);
    match &result {
        Ok(view) => info!(
            line = %selection.line,
            traces = view.comparison_chart.trace_names().len(),
            forecast_rows = view.forecast_table.len(),
            best_model = %view.best_model,
            "view built"
        ),
        Err(e) => warn!(line = %selection.line, kind = e.kind(), "{e}"),
    }

    Ok(DashboardView {
        fingerprint: data.fingerprint.clone(),
        sample_data: data.is_sample(),
        ..result?
    })
}

/// Load the dataset for `config` and build one view. Used by one-shot callers.
pub fn run_forecast(
    selection: &ModelLineSelection,
    config: &DashboardConfig,
    opts: &LoadOptions,
) -> Result<DashboardView, ViewError> {
    config.validate()?;
    let data = load_dataset(config, opts)?;
    build_view(selection, &data, config)
}

fn compose(
    selection: &ModelLineSelection,
    tables: &SalesTables,
    config: &DashboardConfig,
) -> Result<DashboardView, DashboardError> {
    selection.validate()?;
    check_line(selection, tables)?;

    let decomposition = decomposition_for(
        tables,
        config.decomposition.scope,
        &selection.line,
        config.decomposition.period,
    )?;

    let out = merge(
        tables.history.rows(),
        tables.forecasts.records(),
        &selection.line,
        selection.methods.iter().copied(),
    )?;

    Ok(DashboardView {
        selection: selection.clone(),
        comparison_chart: build_chart_titled(&out.merged, &config.chart.title),
        decomposition_chart: layout_with_height(&decomposition, config.chart.decomposition_height),
        decomposition,
        forecast_table: forecast_rows(&out.forecast_only),
        best_model: config.best_model_for(&selection.line).to_string(),
        demand: tables.demand.transpose_for(&selection.line),
        diagnostics: selection
            .includes(ForecastMethod::Arima)
            .then(|| tables.model_info.transpose_for(&selection.line)),
        fingerprint: String::new(),
        sample_data: false,
    })
}

/// The line must be present in every table the view reads.
fn check_line(selection: &ModelLineSelection, tables: &SalesTables) -> Result<(), DashboardError> {
    let line = &selection.line;
    let missing = |table: &'static str| DashboardError::UnknownModelLine {
        line: line.to_string(),
        table,
    };

    if !tables.history.contains_line(line) {
        return Err(missing(HISTORY_TABLE));
    }
    if !tables.forecasts.contains_line(line) {
        return Err(missing(FORECAST_TABLE));
    }
    if !tables.demand.contains_line(line) {
        return Err(missing(DEMAND_TABLE));
    }
    if selection.includes(ForecastMethod::Arima) && !tables.model_info.contains_line(line) {
        return Err(missing(MODEL_INFO_TABLE));
    }
    Ok(())
}

/// Decompose the history the given scope selects.
///
/// `FullTable` walks every history row in stored order, indexed by row
/// number, whatever line is selected. `SelectedLine` uses the line's dated
/// history.
pub fn decomposition_for(
    tables: &SalesTables,
    scope: DecompositionScope,
    line: &ModelLine,
    period: usize,
) -> Result<DecompositionResult, DashboardError> {
    match scope {
        DecompositionScope::FullTable => decompose_rows(&tables.history.all_values(), period),
        DecompositionScope::SelectedLine => {
            if !tables.history.contains_line(line) {
                return Err(DashboardError::UnknownModelLine {
                    line: line.to_string(),
                    table: HISTORY_TABLE,
                });
            }
            decompose(&tables.history.series_for(line).points, period)
        }
    }
}

fn forecast_rows(series: &MergedSeries) -> Vec<ForecastRow> {
    series
        .points
        .iter()
        .map(|p| ForecastRow {
            model_line: series.model_line.to_string(),
            forecast_method: p.source.to_string(),
            period: format_period(p.period),
            value: p.value,
        })
        .collect()
}
