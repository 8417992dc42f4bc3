//! Classical additive seasonal decomposition.
//!
//! `observed = trend + seasonal + residual`, where:
//! - trend is a centered moving average over one seasonal cycle
//!   (the 2×period filter for even periods), undefined at both edges;
//! - seasonal is the per-position mean of the detrended series, centered to
//!   sum to zero over a cycle and tiled across the index;
//! - residual is what remains, undefined wherever trend is.
//!
//! Undefined entries are `None`. They are never zero-filled.

use serde::{Deserialize, Serialize};

use crate::domain::{PeriodKey, TimeSeriesPoint};
use crate::error::{DashboardError, Result};

/// Seasonal cycle length for monthly data.
pub const DEFAULT_PERIOD: usize = 12;

/// One of the four aligned decomposition components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Observed,
    Trend,
    Seasonal,
    Residual,
}

impl ComponentKind {
    /// Stacking order, top to bottom.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Observed,
        ComponentKind::Trend,
        ComponentKind::Seasonal,
        ComponentKind::Residual,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ComponentKind::Observed => "Observed",
            ComponentKind::Trend => "Trend",
            ComponentKind::Seasonal => "Seasonal",
            ComponentKind::Residual => "Residual",
        }
    }
}

/// Trend, seasonal and residual for an index-free series.
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<Option<f64>>,
    pub residual: Vec<Option<f64>>,
}

/// Four aligned component sequences over one shared index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    pub period: usize,
    pub index: Vec<PeriodKey>,
    pub observed: Vec<f64>,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<Option<f64>>,
    pub residual: Vec<Option<f64>>,
}

impl DecompositionResult {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Values of one component; `observed` is always defined.
    pub fn component(&self, kind: ComponentKind) -> Vec<Option<f64>> {
        match kind {
            ComponentKind::Observed => self.observed.iter().copied().map(Some).collect(),
            ComponentKind::Trend => self.trend.clone(),
            ComponentKind::Seasonal => self.seasonal.clone(),
            ComponentKind::Residual => self.residual.clone(),
        }
    }

    /// The observed component as dated points. Row-indexed results have no dates.
    pub fn observed_points(&self) -> Option<Vec<TimeSeriesPoint>> {
        self.index
            .iter()
            .zip(&self.observed)
            .map(|(key, &value)| match key {
                PeriodKey::Date(d) => Some(TimeSeriesPoint::new(*d, value)),
                PeriodKey::Row(_) => None,
            })
            .collect()
    }

    fn assemble(index: Vec<PeriodKey>, observed: Vec<f64>, period: usize, c: Components) -> Self {
        Self {
            period,
            index,
            observed,
            trend: c.trend,
            seasonal: c.seasonal,
            residual: c.residual,
        }
    }
}

/// Decompose a dated series.
///
/// Periods must be strictly increasing (chronological, no duplicates).
pub fn decompose(series: &[TimeSeriesPoint], period: usize) -> Result<DecompositionResult> {
    if let Some(pair) = series.windows(2).find(|w| w[0].period >= w[1].period) {
        return Err(DashboardError::InsufficientData(format!(
            "periods must be strictly increasing, found {} followed by {}",
            pair[0].period, pair[1].period
        )));
    }

    let observed: Vec<f64> = series.iter().map(|p| p.value).collect();
    let components = decompose_values(&observed, period)?;
    let index = series.iter().map(|p| PeriodKey::Date(p.period)).collect();
    Ok(DecompositionResult::assemble(index, observed, period, components))
}

/// Decompose values indexed by observation number.
pub fn decompose_rows(values: &[f64], period: usize) -> Result<DecompositionResult> {
    let components = decompose_values(values, period)?;
    let index = (0..values.len()).map(PeriodKey::Row).collect();
    Ok(DecompositionResult::assemble(index, values.to_vec(), period, components))
}

/// The index-free kernel behind [`decompose`] and [`decompose_rows`].
pub fn decompose_values(values: &[f64], period: usize) -> Result<Components> {
    let n = values.len();
    if period < 2 {
        return Err(DashboardError::InsufficientData(format!(
            "period must be at least 2, got {period}"
        )));
    }
    if n < 2 * period {
        return Err(DashboardError::InsufficientData(format!(
            "need at least {} observations (two full cycles of {period}), got {n}",
            2 * period
        )));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(DashboardError::InsufficientData(format!(
            "observation {i} is not a finite number"
        )));
    }

    let trend = centered_moving_average(values, period);

    let detrended: Vec<Option<f64>> = values
        .iter()
        .zip(&trend)
        .map(|(x, t)| t.map(|t| x - t))
        .collect();

    let mut pattern = Vec::with_capacity(period);
    for pos in 0..period {
        let defined: Vec<f64> = detrended.iter().skip(pos).step_by(period).flatten().copied().collect();
        if defined.is_empty() {
            return Err(DashboardError::InsufficientData(format!(
                "no defined trend value for cycle position {pos}"
            )));
        }
        pattern.push(defined.iter().sum::<f64>() / defined.len() as f64);
    }
    let center = pattern.iter().sum::<f64>() / period as f64;
    for p in &mut pattern {
        *p -= center;
    }

    let seasonal: Vec<Option<f64>> = (0..n).map(|i| Some(pattern[i % period])).collect();

    let residual = detrended
        .iter()
        .zip(&seasonal)
        .map(|(d, s)| match (d, s) {
            (Some(d), Some(s)) => Some(d - s),
            _ => None,
        })
        .collect();

    Ok(Components {
        trend,
        seasonal,
        residual,
    })
}

/// Centered moving average over one cycle.
///
/// Odd periods use the plain `period`-point mean. Even periods use a
/// `period + 1` window with half weight on both ends so the average stays
/// centered. The first and last `period / 2` entries are undefined.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let half = period / 2;
    let mut out = vec![None; n];
    if n < 2 * half + 1 {
        return out;
    }

    let even = period % 2 == 0;
    for (i, slot) in out.iter_mut().enumerate().take(n - half).skip(half) {
        let window = &values[i - half..=i + half];
        let sum: f64 = if even {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            inner + 0.5 * (window[0] + window[window.len() - 1])
        } else {
            window.iter().sum()
        };
        *slot = Some(sum / period as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};

    fn monthly(values: &[f64]) -> Vec<TimeSeriesPoint> {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(start + Months::new(i as u32), v))
            .collect()
    }

    fn seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 2.0 * i as f64 + 10.0 * ((i % period) as f64 - (period as f64 - 1.0) / 2.0))
            .collect()
    }

    #[test]
    fn edges_are_undefined_not_zero() {
        let values = seasonal_series(36, 12);
        let result = decompose(&monthly(&values), 12).unwrap();

        for i in 0..6 {
            assert_eq!(result.trend[i], None);
            assert_eq!(result.residual[i], None);
            assert_eq!(result.trend[35 - i], None);
            assert_eq!(result.residual[35 - i], None);
        }
        assert!(result.trend[6].is_some());
        assert!(result.trend[29].is_some());
        assert!(result.seasonal.iter().all(Option::is_some));
    }

    #[test]
    fn odd_period_border_is_half_period() {
        let values = seasonal_series(21, 7);
        let c = decompose_values(&values, 7).unwrap();
        assert_eq!(c.trend.iter().take_while(|t| t.is_none()).count(), 3);
        assert_eq!(c.trend.iter().rev().take_while(|t| t.is_none()).count(), 3);
    }

    #[test]
    fn linear_trend_is_recovered_exactly() {
        // A pure linear trend plus a zero-mean seasonal pattern.
        let values = seasonal_series(48, 12);
        let result = decompose(&monthly(&values), 12).unwrap();
        for (i, t) in result.trend.iter().enumerate() {
            if let Some(t) = t {
                let expected = 100.0 + 2.0 * i as f64;
                assert!((t - expected).abs() < 1e-9, "trend[{i}] = {t}, expected {expected}");
            }
        }
        for r in result.residual.iter().flatten() {
            assert!(r.abs() < 1e-9);
        }
    }

    #[test]
    fn seasonal_pattern_is_centered_and_tiled() {
        let values = seasonal_series(36, 12);
        let result = decompose_rows(&values, 12).unwrap();
        let cycle: Vec<f64> = result.seasonal[..12].iter().flatten().copied().collect();
        assert!(cycle.iter().sum::<f64>().abs() < 1e-9);
        for i in 12..36 {
            assert_eq!(result.seasonal[i], result.seasonal[i - 12]);
        }
    }

    #[test]
    fn additive_identity_holds() {
        let values: Vec<f64> = (0..30).map(|i| ((i * 37) % 11) as f64 + i as f64).collect();
        let result = decompose_rows(&values, 6).unwrap();
        for i in 0..values.len() {
            if let (Some(t), Some(s), Some(r)) = (result.trend[i], result.seasonal[i], result.residual[i]) {
                assert!((values[i] - (t + s + r)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn observed_is_exact_copy() {
        let points = monthly(&seasonal_series(24, 12));
        let result = decompose(&points, 12).unwrap();
        assert_eq!(result.observed_points().unwrap(), points);
    }

    #[test]
    fn too_short_series_fails() {
        let points = monthly(&seasonal_series(23, 12));
        assert!(matches!(decompose(&points, 12), Err(DashboardError::InsufficientData(_))));
    }

    #[test]
    fn period_below_two_fails() {
        assert!(matches!(
            decompose_values(&[1.0, 2.0, 3.0, 4.0], 1),
            Err(DashboardError::InsufficientData(_))
        ));
    }

    #[test]
    fn duplicate_periods_fail() {
        let mut points = monthly(&seasonal_series(24, 12));
        points[5].period = points[4].period;
        assert!(matches!(decompose(&points, 12), Err(DashboardError::InsufficientData(_))));
    }

    #[test]
    fn non_finite_values_fail() {
        let mut values = seasonal_series(24, 12);
        values[3] = f64::NAN;
        assert!(matches!(decompose_rows(&values, 12), Err(DashboardError::InsufficientData(_))));
    }

    #[test]
    fn row_index_counts_observations() {
        let result = decompose_rows(&seasonal_series(24, 12), 12).unwrap();
        assert_eq!(result.index.first(), Some(&PeriodKey::Row(0)));
        assert_eq!(result.index.last(), Some(&PeriodKey::Row(23)));
        assert!(result.observed_points().is_none());
    }
}
