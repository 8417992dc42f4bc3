//! Integration tests for the runner: config file → data dir → view → artifacts.

use std::path::Path;

use proptest::prelude::*;
use salescast_core::domain::{ForecastMethod, ModelLineSelection};
use salescast_runner::config::{DashboardConfig, DecompositionScope};
use salescast_runner::data_loader::{load_dataset, LoadOptions};
use salescast_runner::export::{load_manifest, save_artifacts};
use salescast_runner::orchestrator::{build_view, run_forecast, ViewError};
use salescast_runner::sample::{generate_sample, write_csv_dataset};

fn write_dataset(dir: &Path) {
    let config = DashboardConfig::default();
    let tables = generate_sample(&config.model_lines(), &config.aggregate()).unwrap();
    write_csv_dataset(&tables, dir).unwrap();
}

fn config_file(root: &Path, body: &str) -> DashboardConfig {
    let path = root.join("salescast.toml");
    std::fs::write(&path, body).unwrap();
    DashboardConfig::load(Some(&path)).unwrap()
}

#[test]
fn config_file_to_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    write_dataset(&data_dir);

    let config = config_file(
        root.path(),
        &format!("data_dir = {:?}\n\n[chart]\ntitle = \"Macan outlook\"\n", data_dir),
    );
    let selection = ModelLineSelection::from_toggles("Porsche_Macan", true, true, false);
    let view = run_forecast(&selection, &config, &LoadOptions::default()).unwrap();

    assert!(!view.sample_data);
    assert_eq!(view.comparison_chart.title.as_deref(), Some("Macan outlook"));
    assert_eq!(view.comparison_chart.trace_names(), vec!["Actual", "FaceBook_Prophet", "ARIMA"]);
    assert_eq!(view.forecast_table.len(), 6);
    assert!(view.diagnostics.is_some());

    let out = root.path().join("runs");
    let run_dir = save_artifacts(&view, &out).unwrap();
    assert!(run_dir.file_name().unwrap().to_string_lossy().starts_with("Porsche_Macan_"));
    assert_eq!(load_manifest(&run_dir).unwrap().fingerprint, view.fingerprint);
}

#[test]
fn missing_data_dir_is_a_load_error() {
    let root = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        data_dir: root.path().join("nowhere"),
        ..DashboardConfig::default()
    };
    let selection = ModelLineSelection::from_toggles("Porsche_Macan", true, false, false);
    let err = run_forecast(&selection, &config, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ViewError::Load(_)));
}

#[test]
fn invalid_config_is_rejected_before_loading() {
    let mut config = DashboardConfig::default();
    config.decomposition.period = 0;
    let selection = ModelLineSelection::from_toggles("Porsche_Macan", true, false, false);
    let err = run_forecast(&selection, &config, &LoadOptions { allow_sample: true }).unwrap_err();
    assert!(matches!(err, ViewError::Config(_)));
}

#[test]
fn selected_line_scope_from_config_file() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    write_dataset(&data_dir);
    let config = config_file(
        root.path(),
        &format!("data_dir = {:?}\n\n[decomposition]\nscope = \"selected_line\"\n", data_dir),
    );
    assert_eq!(config.decomposition.scope, DecompositionScope::SelectedLine);

    let selection = ModelLineSelection::from_toggles("Porsche_Taycan", false, false, true);
    let view = run_forecast(&selection, &config, &LoadOptions::default()).unwrap();
    assert_eq!(view.decomposition.len(), 48);
}

fn arb_line() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "All_Models",
        "Porsche_Panamera",
        "Porsche_Cayenne",
        "Porsche_Boxster",
        "Porsche_Macan",
        "Porsche_Taycan",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any non-empty toggle combination yields one forecast group per method
    /// and a best-model label that only depends on the line.
    #[test]
    fn view_shape_follows_toggles(
        line in arb_line(),
        toggles in (any::<bool>(), any::<bool>(), any::<bool>())
            .prop_filter("at least one method", |(a, b, c)| *a || *b || *c),
    ) {
        let config = DashboardConfig::default();
        let data = load_dataset(
            &DashboardConfig { data_dir: "/nonexistent/salescast".into(), ..config.clone() },
            &LoadOptions { allow_sample: true },
        ).unwrap();

        let selection = ModelLineSelection::from_toggles(line, toggles.0, toggles.1, toggles.2);
        let view = build_view(&selection, &data, &config).unwrap();

        prop_assert_eq!(view.forecast_table.len(), 3 * selection.methods.len());
        prop_assert_eq!(view.comparison_chart.trace_names().len(), 1 + selection.methods.len());
        prop_assert_eq!(view.diagnostics.is_some(), selection.includes(ForecastMethod::Arima));
        let expected = if line == "All_Models" { "ARIMA (0, 0, 2)" } else { "ARIMA (1, 0, 0)" };
        prop_assert_eq!(view.best_model.as_str(), expected);
    }
}
