//! Salescast CLI — forecast comparison, decomposition and sample data commands.
//!
//! Commands:
//! - `lines` — list configured model lines and whether the dataset has them
//! - `forecast` — compare a line's history with the selected algorithms
//! - `decompose` — print the seasonal decomposition table
//! - `sample` — write the generated sample dataset as CSV files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use salescast_core::chart::value_label;
use salescast_core::domain::{ModelLine, ModelLineSelection};
use salescast_runner::export::export_view_json;
use salescast_runner::{
    build_view, decomposition_for, generate_report, generate_sample, load_dataset, save_artifacts,
    write_csv_dataset, DashboardConfig, DashboardView, DecompositionScope, LoadOptions, LoadedData,
};

#[derive(Parser)]
#[command(
    name = "salescast",
    about = "Salescast CLI — compare sales forecasts against actual history"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./salescast.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overriding the config.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fall back to generated sample data when the data directory is missing.
    #[arg(long, global = true, default_value_t = false)]
    sample: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured model lines and whether the dataset contains them.
    Lines,
    /// Compare a model line's history with one or more forecast algorithms.
    Forecast {
        /// Model line, e.g. Porsche_Macan.
        #[arg(long)]
        line: String,

        /// Include Facebook Prophet forecasts.
        #[arg(long, default_value_t = false)]
        prophet: bool,

        /// Include ARIMA forecasts.
        #[arg(long, default_value_t = false)]
        arima: bool,

        /// Include 3-month moving average forecasts.
        #[arg(long, default_value_t = false)]
        moving_average: bool,

        /// Print the whole view as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Print a Markdown report instead of a table.
        #[arg(long, default_value_t = false, conflicts_with = "json")]
        report: bool,

        /// Save chart, table and manifest artifacts under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the seasonal decomposition used by the dashboard.
    Decompose {
        /// Model line; only used with `--scope selected_line`.
        #[arg(long)]
        line: Option<String>,

        /// Seasonal period, overriding the config.
        #[arg(long)]
        period: Option<usize>,

        /// full_table or selected_line, overriding the config.
        #[arg(long)]
        scope: Option<String>,
    },
    /// Write the generated sample dataset as CSV files.
    Sample {
        /// Output directory. Defaults to the configured data directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = DashboardConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    config.validate().context("validating config")?;
    let opts = LoadOptions { allow_sample: cli.sample };

    match cli.command {
        Commands::Lines => run_lines(&config, &opts),
        Commands::Forecast {
            line,
            prophet,
            arima,
            moving_average,
            json,
            report,
            output_dir,
        } => {
            let selection = ModelLineSelection::from_toggles(line, prophet, arima, moving_average);
            let output = if json {
                Output::Json
            } else if report {
                Output::Report
            } else {
                Output::Table
            };
            run_forecast_cmd(&config, &opts, &selection, output, output_dir)
        }
        Commands::Decompose { line, period, scope } => {
            if let Some(period) = period {
                config.decomposition.period = period;
            }
            if let Some(scope) = scope {
                config.decomposition.scope = parse_scope(&scope)?;
            }
            run_decompose(&config, &opts, line)
        }
        Commands::Sample { out_dir } => run_sample(&config, out_dir.unwrap_or_else(|| config.data_dir.clone())),
    }
}

/// Log to stderr so stdout stays clean for tables and JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Clone, Copy)]
enum Output {
    Table,
    Json,
    Report,
}

fn load(config: &DashboardConfig, opts: &LoadOptions) -> Result<LoadedData> {
    let data = load_dataset(config, opts)
        .with_context(|| format!("loading dataset from {}", config.data_dir.display()))?;
    if data.is_sample() {
        eprintln!(
            "Note: {} not found, using generated sample data.",
            config.data_dir.display()
        );
    }
    Ok(data)
}

fn run_lines(config: &DashboardConfig, opts: &LoadOptions) -> Result<()> {
    let data = load(config, opts)?;
    let present = data.tables.history.lines();

    println!("{:<20} {:>8} {:>10}  Forecasts", "Model", "History", "Aggregate");
    for line in config.model_lines() {
        let rows = data.tables.history.series_for(&line).len();
        let methods: Vec<String> = data
            .tables
            .forecasts
            .methods_for(&line)
            .into_iter()
            .map(|m| m.to_string())
            .collect();
        let aggregate = if line == config.aggregate() { "yes" } else { "" };
        let methods = if methods.is_empty() { "-".to_string() } else { methods.join(", ") };
        println!("{:<20} {:>8} {:>10}  {methods}", line.as_str(), rows, aggregate);
    }

    let configured = config.model_lines();
    let extra: Vec<&ModelLine> = present.iter().filter(|l| !configured.contains(l)).collect();
    if !extra.is_empty() {
        let names: Vec<&str> = extra.iter().map(|l| l.as_str()).collect();
        println!("\nIn the data but not configured: {}", names.join(", "));
    }
    Ok(())
}

fn run_forecast_cmd(
    config: &DashboardConfig,
    opts: &LoadOptions,
    selection: &ModelLineSelection,
    output: Output,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    // Fail fast on an empty selection before touching the data.
    selection.validate()?;
    let data = load(config, opts)?;
    let view = build_view(selection, &data, config)?;
    debug!(rows = view.forecast_table.len(), "view built");

    match output {
        Output::Table => print_view(&view),
        Output::Json => println!("{}", export_view_json(&view)?),
        Output::Report => print!("{}", generate_report(&view)),
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&view, &dir)?;
        eprintln!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn print_view(view: &DashboardView) {
    let title = view.comparison_chart.title.as_deref().unwrap_or_default();
    println!("=== {title}: {} ===", view.selection.line);
    println!("Best Model: {}", view.best_model);
    println!();
    println!("{:<20} {:<18} {:<12} {:>10}", "Model", "Forecast_Model", "Period", "Cars_Sold");
    for row in &view.forecast_table {
        println!(
            "{:<20} {:<18} {:<12} {:>10}",
            row.model_line,
            row.forecast_method,
            row.period,
            value_label(row.value)
        );
    }
    if view.sample_data {
        println!("\n(generated sample data)");
    }
}

fn run_decompose(config: &DashboardConfig, opts: &LoadOptions, line: Option<String>) -> Result<()> {
    let scope = config.decomposition.scope;
    let line = match (scope, line) {
        (DecompositionScope::SelectedLine, None) => bail!("--line is required with --scope selected_line"),
        (_, Some(l)) => ModelLine::new(l),
        (DecompositionScope::FullTable, None) => config.aggregate(),
    };

    let data = load(config, opts)?;
    let result = decomposition_for(&data.tables, scope, &line, config.decomposition.period)?;

    let cell = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12}",
        "Index", "Observed", "Trend", "Seasonal", "Residual"
    );
    for i in 0..result.len() {
        println!(
            "{:<12} {:>12.2} {:>12} {:>12} {:>12}",
            result.index[i].to_string(),
            result.observed[i],
            cell(result.trend[i]),
            cell(result.seasonal[i]),
            cell(result.residual[i]),
        );
    }
    Ok(())
}

fn parse_scope(s: &str) -> Result<DecompositionScope> {
    match s {
        "full_table" => Ok(DecompositionScope::FullTable),
        "selected_line" => Ok(DecompositionScope::SelectedLine),
        _ => bail!("unknown scope '{s}'. Valid: full_table, selected_line"),
    }
}

fn run_sample(config: &DashboardConfig, out_dir: PathBuf) -> Result<()> {
    let tables = generate_sample(&config.model_lines(), &config.aggregate())?;
    write_csv_dataset(&tables, &out_dir)?;
    println!(
        "Wrote {} history rows and {} forecast rows to {}",
        tables.history.len(),
        tables.forecasts.len(),
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn forecast_flags_parse() {
        let cli = Cli::try_parse_from([
            "salescast",
            "--sample",
            "forecast",
            "--line",
            "Porsche_Macan",
            "--arima",
            "--moving-average",
        ])
        .unwrap();
        assert!(cli.sample);
        match cli.command {
            Commands::Forecast { line, prophet, arima, moving_average, .. } => {
                assert_eq!(line, "Porsche_Macan");
                assert!(!prophet && arima && moving_average);
            }
            _ => panic!("expected forecast"),
        }
    }

    #[test]
    fn json_and_report_conflict() {
        let err = Cli::try_parse_from([
            "salescast", "forecast", "--line", "All_Models", "--arima", "--json", "--report",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn scope_names() {
        assert_eq!(parse_scope("full_table").unwrap(), DecompositionScope::FullTable);
        assert_eq!(parse_scope("selected_line").unwrap(), DecompositionScope::SelectedLine);
        assert!(parse_scope("whole").is_err());
    }
}
