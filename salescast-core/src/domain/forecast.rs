//! Forecast methods and the precomputed forecast records they produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ModelLine;

/// The fixed set of forecasting techniques whose outputs are pre-supplied.
///
/// Declaration order is the enumeration order used everywhere a set of
/// methods is iterated (`Ord` is derived from it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    Prophet,
    Arima,
    MovingAverage,
}

impl ForecastMethod {
    /// All methods in enumeration order.
    pub const ALL: [ForecastMethod; 3] = [
        ForecastMethod::Prophet,
        ForecastMethod::Arima,
        ForecastMethod::MovingAverage,
    ];

    /// Value stored in the `Forecast_Model` column, also used as the series label.
    pub fn table_name(self) -> &'static str {
        match self {
            ForecastMethod::Prophet => "FaceBook_Prophet",
            ForecastMethod::Arima => "ARIMA",
            ForecastMethod::MovingAverage => "Moving_Average",
        }
    }

    /// Caption shown next to the selection toggle.
    pub fn caption(self) -> &'static str {
        match self {
            ForecastMethod::Prophet => "Facebook_Prophet",
            ForecastMethod::Arima => "ARIMA",
            ForecastMethod::MovingAverage => "Moving_Average(3 Months)",
        }
    }

    /// Short command-line alias.
    pub fn alias(self) -> &'static str {
        match self {
            ForecastMethod::Prophet => "prophet",
            ForecastMethod::Arima => "arima",
            ForecastMethod::MovingAverage => "moving-average",
        }
    }

    /// Position in the enumeration order.
    pub fn index(self) -> usize {
        match self {
            ForecastMethod::Prophet => 0,
            ForecastMethod::Arima => 1,
            ForecastMethod::MovingAverage => 2,
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown forecast method '{0}' (expected one of: FaceBook_Prophet, ARIMA, Moving_Average)")]
pub struct MethodParseError(pub String);

impl FromStr for ForecastMethod {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ForecastMethod::ALL
            .into_iter()
            .find(|m| {
                needle.eq_ignore_ascii_case(m.table_name())
                    || needle.eq_ignore_ascii_case(m.caption())
                    || needle.eq_ignore_ascii_case(m.alias())
            })
            .or_else(|| match needle.to_ascii_lowercase().as_str() {
                "ma" | "moving_average" => Some(ForecastMethod::MovingAverage),
                _ => None,
            })
            .ok_or_else(|| MethodParseError(s.to_string()))
    }
}

/// One precomputed forecast value for a line, method, and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub model_line: ModelLine,
    pub method: ForecastMethod,
    pub period: NaiveDate,
    pub value: f64,
}
