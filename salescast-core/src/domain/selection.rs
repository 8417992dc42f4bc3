//! The user's choice for one "Forecast" action.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{ForecastMethod, ModelLine};
use crate::error::DashboardError;

/// A product line plus the forecast methods to overlay on it.
///
/// Built once per action and passed by value through the pipeline. Methods
/// live in a `BTreeSet`, so iteration follows the enumeration order no
/// matter the order in which toggles were flipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLineSelection {
    pub line: ModelLine,
    pub methods: BTreeSet<ForecastMethod>,
}

impl ModelLineSelection {
    pub fn new(line: impl Into<ModelLine>, methods: impl IntoIterator<Item = ForecastMethod>) -> Self {
        Self {
            line: line.into(),
            methods: methods.into_iter().collect(),
        }
    }

    /// Build from the three independent method toggles.
    pub fn from_toggles(line: impl Into<ModelLine>, prophet: bool, arima: bool, moving_average: bool) -> Self {
        let flags = [prophet, arima, moving_average];
        let methods = ForecastMethod::ALL
            .into_iter()
            .zip(flags)
            .filter_map(|(m, on)| on.then_some(m));
        Self::new(line, methods)
    }

    pub fn includes(&self, method: ForecastMethod) -> bool {
        self.methods.contains(&method)
    }

    /// Reject an empty method set before any work begins.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.methods.is_empty() {
            return Err(DashboardError::NoMethodSelected);
        }
        Ok(())
    }
}
