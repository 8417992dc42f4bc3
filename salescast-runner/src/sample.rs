//! Synthetic sample dataset for demos and development.
//!
//! Deterministic: every line draws from its own RNG seeded from the line
//! name, so the same lines always produce the same tables. Views built on
//! sample data are flagged as such.

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use anyhow::{Context, Result};
use salescast_core::data::{
    format_period, AuxTable, DataError, ForecastTable, HistoryTable, SalesTables, DEMAND_TABLE,
    METHOD_COL, MODEL_COL, MODEL_INFO_TABLE, PERIOD_COL, VALUE_COL,
};
use salescast_core::domain::{ForecastMethod, ForecastRecord, HistoryRow, ModelLine};

/// Months of history per line.
pub const HISTORY_MONTHS: u32 = 48;
/// Forecast months per method.
pub const FORECAST_HORIZON: u32 = 3;

const DEMAND_COLUMNS: [&str; 5] = [MODEL_COL, "Year", "Orders", "Deliveries", "Backlog"];
const MODEL_INFO_COLUMNS: [&str; 6] = [MODEL_COL, "Order", "AIC", "BIC", "Log_Likelihood", "Observations"];

fn start_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default()
}

fn month(i: u32) -> NaiveDate {
    start_month() + Months::new(i)
}

fn rng_for(line: &str) -> StdRng {
    let seed: [u8; 32] = *blake3::hash(line.as_bytes()).as_bytes();
    StdRng::from_seed(seed)
}

/// Monthly volume of one line: linear growth, yearly seasonality, noise.
fn line_history(line: &str, base: f64) -> Vec<f64> {
    let mut rng = rng_for(line);
    let growth = rng.gen_range(0.002..0.012);
    let amplitude = rng.gen_range(0.08..0.2);
    (0..HISTORY_MONTHS)
        .map(|i| {
            let season = (2.0 * std::f64::consts::PI * f64::from(i % 12) / 12.0).sin();
            let noise = rng.gen_range(-0.04..0.04);
            (base * (1.0 + growth * f64::from(i)) * (1.0 + amplitude * season + noise)).round()
        })
        .collect()
}

/// Forecasts for the months after `history`, one group per method.
fn line_forecasts(line: &str, history: &[f64]) -> Vec<(ForecastMethod, u32, f64)> {
    let mut rng = rng_for(&format!("{line}/forecast"));
    let n = history.len();
    let last = history[n - 1];
    let mean = history.iter().sum::<f64>() / n as f64;
    let mut out = Vec::new();

    // Seasonal naive with drift, like a fitted additive trend+season model.
    for h in 0..FORECAST_HORIZON {
        let same_month_last_year = history[n - 12 + h as usize];
        let drift = (history[n - 1] - history[n - 13]) / 12.0;
        let value = same_month_last_year + drift * f64::from(h + 1) + rng.gen_range(-10.0..10.0);
        out.push((ForecastMethod::Prophet, h, value));
    }

    // AR(1) pulling back toward the mean.
    let mut level = last;
    for h in 0..FORECAST_HORIZON {
        level = mean + 0.6 * (level - mean);
        out.push((ForecastMethod::Arima, h, level));
    }

    // Rolling three-month average, fed its own output.
    let mut window: Vec<f64> = history[n - 3..].to_vec();
    for h in 0..FORECAST_HORIZON {
        let value = window.iter().sum::<f64>() / 3.0;
        window.remove(0);
        window.push(value);
        out.push((ForecastMethod::MovingAverage, h, value));
    }

    out
}

/// Build the sample dataset for `lines`, treating `aggregate` as the sum of
/// every other line.
pub fn generate_sample(lines: &[ModelLine], aggregate: &ModelLine) -> Result<SalesTables, DataError> {
    let mut per_line: Vec<(ModelLine, Vec<f64>)> = Vec::new();
    for (i, line) in lines.iter().filter(|l| *l != aggregate).enumerate() {
        let base = 400.0 + 250.0 * i as f64;
        per_line.push((line.clone(), line_history(line.as_str(), base)));
    }
    if lines.contains(aggregate) {
        let total: Vec<f64> = (0..HISTORY_MONTHS as usize)
            .map(|m| per_line.iter().map(|(_, v)| v[m]).sum())
            .collect();
        per_line.insert(0, (aggregate.clone(), total));
    }

    let mut history = Vec::new();
    let mut forecasts = Vec::new();
    let mut demand_rows = Vec::new();
    let mut info_rows = Vec::new();

    for (line, values) in &per_line {
        for (i, &value) in values.iter().enumerate() {
            history.push(HistoryRow {
                model_line: line.clone(),
                period: month(i as u32),
                value,
            });
        }
        for (method, h, value) in line_forecasts(line.as_str(), values) {
            forecasts.push(ForecastRecord {
                model_line: line.clone(),
                method,
                period: month(HISTORY_MONTHS + h),
                value: value.round(),
            });
        }

        let mut rng = rng_for(&format!("{line}/meta"));
        let last_year = month(HISTORY_MONTHS - 1).year();
        let deliveries: f64 = values[values.len() - 12..].iter().sum();
        let orders = (deliveries * rng.gen_range(1.0..1.12)).round();
        demand_rows.push(vec![
            line.to_string(),
            last_year.to_string(),
            format!("{orders:.0}"),
            format!("{deliveries:.0}"),
            format!("{:.0}", orders - deliveries),
        ]);

        let order = if line == aggregate { "(0, 0, 2)" } else { "(1, 0, 0)" };
        let aic: f64 = rng.gen_range(300.0..700.0);
        info_rows.push(vec![
            line.to_string(),
            order.to_string(),
            format!("{aic:.2}"),
            format!("{:.2}", aic + rng.gen_range(5.0..15.0)),
            format!("{:.2}", -aic / 2.0 + 2.0),
            values.len().to_string(),
        ]);
    }

    Ok(SalesTables {
        history: HistoryTable::new(history),
        forecasts: ForecastTable::new(forecasts),
        demand: AuxTable::new(DEMAND_TABLE, to_strings(&DEMAND_COLUMNS), demand_rows, MODEL_COL)?,
        model_info: AuxTable::new(MODEL_INFO_TABLE, to_strings(&MODEL_INFO_COLUMNS), info_rows, MODEL_COL)?,
    })
}

fn to_strings(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

/// Write `tables` as the four CSV files a data directory expects.
pub fn write_csv_dataset(tables: &SalesTables, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut wtr = csv::Writer::from_path(dir.join("sales_history.csv"))?;
    wtr.write_record([MODEL_COL, PERIOD_COL, VALUE_COL])?;
    for r in tables.history.rows() {
        wtr.write_record([
            r.model_line.as_str(),
            format_period(r.period).as_str(),
            r.value.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;

    let mut wtr = csv::Writer::from_path(dir.join("sales_forecast.csv"))?;
    wtr.write_record([MODEL_COL, METHOD_COL, PERIOD_COL, VALUE_COL])?;
    for r in tables.forecasts.records() {
        wtr.write_record([
            r.model_line.as_str(),
            r.method.table_name(),
            format_period(r.period).as_str(),
            r.value.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;

    for (file, table) in [("demand_history.csv", &tables.demand), ("model_info.csv", &tables.model_info)] {
        let mut wtr = csv::Writer::from_path(dir.join(file))?;
        wtr.write_record(&table.columns)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }

    Ok(())
}
