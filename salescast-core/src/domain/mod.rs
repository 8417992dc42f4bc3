//! Domain types for Salescast

pub mod forecast;
pub mod line;
pub mod selection;
pub mod series;

pub use forecast::{ForecastMethod, ForecastRecord, MethodParseError};
pub use line::ModelLine;
pub use selection::ModelLineSelection;
pub use series::{HistoryRow, HistorySeries, PeriodKey, TimeSeriesPoint};
