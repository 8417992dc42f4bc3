//! Reporting and export — CSV, JSON and Markdown artifacts for one view.
//!
//! All persisted manifests include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use salescast_core::chart::ChartSpec;
use salescast_core::data::{TransposedView, METHOD_COL, MODEL_COL, PERIOD_COL, VALUE_COL};

use crate::orchestrator::{DashboardView, ForecastRow};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Summary written next to the exported tables and charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub created_at: String,
    pub model_line: String,
    pub methods: Vec<String>,
    pub best_model: String,
    pub fingerprint: String,
    pub sample_data: bool,
    pub forecast_rows: usize,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl RunManifest {
    pub fn from_view(view: &DashboardView) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: chrono::Local::now().to_rfc3339(),
            model_line: view.selection.line.to_string(),
            methods: view.selection.methods.iter().map(|m| m.table_name().to_string()).collect(),
            best_model: view.best_model.clone(),
            fingerprint: view.fingerprint.clone(),
            sample_data: view.sample_data,
            forecast_rows: view.forecast_table.len(),
        }
    }
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the forecast-only table with the source column names.
pub fn export_forecast_csv(rows: &[ForecastRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([MODEL_COL, METHOD_COL, PERIOD_COL, VALUE_COL])?;
    for r in rows {
        wtr.write_record([
            r.model_line.as_str(),
            r.forecast_method.as_str(),
            r.period.as_str(),
            format!("{:.2}", r.value).as_str(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_chart_json(chart: &ChartSpec) -> Result<String> {
    serde_json::to_string_pretty(chart).context("failed to serialize chart to JSON")
}

/// Serialize a whole view (the CLI's `--json` output).
pub fn export_view_json(view: &DashboardView) -> Result<String> {
    serde_json::to_string_pretty(view).context("failed to serialize view to JSON")
}

/// Deserialize a manifest, rejecting unknown schema versions.
pub fn import_manifest(json: &str) -> Result<RunManifest> {
    let manifest: RunManifest =
        serde_json::from_str(json).context("failed to deserialize manifest from JSON")?;
    if manifest.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            manifest.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(manifest)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set for one view.
///
/// Creates a directory named `{line}_{timestamp}/` under `output_dir`
/// containing:
/// - `forecast.csv` — forecast-only table
/// - `comparison_chart.json` — comparison chart spec
/// - `decomposition_chart.json` — decomposition chart spec
/// - `manifest.json` — selection, best model, fingerprint, schema version
///
/// Returns the path to the created directory.
pub fn save_artifacts(view: &DashboardView, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        view.selection.line,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("forecast.csv"), export_forecast_csv(&view.forecast_table)?)?;
    std::fs::write(
        run_dir.join("comparison_chart.json"),
        export_chart_json(&view.comparison_chart)?,
    )?;
    std::fs::write(
        run_dir.join("decomposition_chart.json"),
        export_chart_json(&view.decomposition_chart)?,
    )?;

    let manifest = serde_json::to_string_pretty(&RunManifest::from_view(view))
        .context("failed to serialize manifest")?;
    std::fs::write(run_dir.join("manifest.json"), manifest)?;

    Ok(run_dir)
}

/// Load the manifest from an artifact directory.
pub fn load_manifest(dir: &Path) -> Result<RunManifest> {
    let path = dir.join("manifest.json");
    let json =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    import_manifest(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Human-readable summary of one view.
pub fn generate_report(view: &DashboardView) -> String {
    let mut md = String::new();
    let title = view.comparison_chart.title.as_deref().unwrap_or("Forecast");

    let _ = writeln!(md, "# {title}: {}", view.selection.line);
    let _ = writeln!(md);
    if view.sample_data {
        let _ = writeln!(md, "> Built from generated sample data.");
        let _ = writeln!(md);
    }
    let _ = writeln!(md, "**Best Model:** {}", view.best_model);
    let _ = writeln!(md);

    let _ = writeln!(md, "## Forecast");
    let _ = writeln!(md);
    let _ = writeln!(md, "| {MODEL_COL} | {METHOD_COL} | {PERIOD_COL} | {VALUE_COL} |");
    let _ = writeln!(md, "|---|---|---|---:|");
    for r in &view.forecast_table {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {:.0} |",
            r.model_line, r.forecast_method, r.period, r.value
        );
    }
    let _ = writeln!(md);

    write_transposed(&mut md, &view.demand);
    if let Some(diag) = &view.diagnostics {
        write_transposed(&mut md, diag);
    }

    let _ = writeln!(md, "Dataset: `{}`", view.fingerprint);
    md
}

fn write_transposed(md: &mut String, view: &TransposedView) {
    let _ = writeln!(md, "## {}", view.title.replace('_', " "));
    let _ = writeln!(md);
    if view.is_empty() {
        let _ = writeln!(md, "_No records._");
        let _ = writeln!(md);
        return;
    }
    let _ = writeln!(md, "| | {} |", view.headers.join(" | "));
    let _ = writeln!(md, "|---|{}", "---|".repeat(view.headers.len()));
    for row in &view.rows {
        let _ = writeln!(md, "| {} | {} |", row.key, row.values.join(" | "));
    }
    let _ = writeln!(md);
}
