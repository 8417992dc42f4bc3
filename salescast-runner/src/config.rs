//! Dashboard configuration (TOML).
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working dashboard over `./data`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use salescast_core::analysis::DEFAULT_PERIOD;
use salescast_core::chart::{DECOMPOSITION_HEIGHT, DEFAULT_TITLE};
use salescast_core::domain::ModelLine;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "salescast.toml";

/// The aggregate line of the bundled data.
pub const DEFAULT_AGGREGATE_LINE: &str = "All_Models";

/// Selector order of the bundled product lines.
pub const DEFAULT_LINES: [&str; 6] = [
    "All_Models",
    "Porsche_Panamera",
    "Porsche_Cayenne",
    "Porsche_Boxster",
    "Porsche_Macan",
    "Porsche_Taycan",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the four table files.
    pub data_dir: PathBuf,
    /// Product lines offered by the selector, in display order.
    pub lines: Vec<String>,
    /// The line that aggregates all others.
    pub aggregate_line: String,
    pub best_model: BestModelLabels,
    pub decomposition: DecompositionConfig,
    pub chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            lines: DEFAULT_LINES.iter().map(|s| s.to_string()).collect(),
            aggregate_line: DEFAULT_AGGREGATE_LINE.to_string(),
            best_model: BestModelLabels::default(),
            decomposition: DecompositionConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `explicit` if given, else `salescast.toml` in the working
    /// directory if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decomposition.period < 2 {
            return Err(ConfigError::Invalid(format!(
                "decomposition.period must be at least 2, got {}",
                self.decomposition.period
            )));
        }
        if self.aggregate_line.trim().is_empty() {
            return Err(ConfigError::Invalid("aggregate_line must not be empty".into()));
        }
        if self.lines.is_empty() {
            return Err(ConfigError::Invalid("lines must list at least one product line".into()));
        }
        if self.chart.decomposition_height == 0 {
            return Err(ConfigError::Invalid("chart.decomposition_height must be positive".into()));
        }
        Ok(())
    }

    pub fn model_lines(&self) -> Vec<ModelLine> {
        self.lines.iter().map(|l| ModelLine::new(l.as_str())).collect()
    }

    pub fn aggregate(&self) -> ModelLine {
        ModelLine::new(self.aggregate_line.as_str())
    }

    /// Best-model annotation for `line`.
    pub fn best_model_for(&self, line: &ModelLine) -> &str {
        self.best_model.label_for(line == &self.aggregate())
    }
}

/// The two-entry best-model mapping, keyed by "is the aggregate line".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestModelLabels {
    pub aggregate: String,
    pub default: String,
}

impl Default for BestModelLabels {
    fn default() -> Self {
        Self {
            aggregate: "ARIMA (0, 0, 2)".to_string(),
            default: "ARIMA (1, 0, 0)".to_string(),
        }
    }
}

impl BestModelLabels {
    pub fn label_for(&self, is_aggregate: bool) -> &str {
        if is_aggregate {
            &self.aggregate
        } else {
            &self.default
        }
    }
}

/// Which history the decomposition chart is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecompositionScope {
    /// Every history row in stored order, indexed by observation number.
    #[default]
    FullTable,
    /// The selected line's dated history.
    SelectedLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    pub period: usize,
    pub scope: DecompositionScope,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            scope: DecompositionScope::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub decomposition_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            decomposition_height: DECOMPOSITION_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.decomposition.period, 12);
        assert_eq!(config.decomposition.scope, DecompositionScope::FullTable);
        assert_eq!(config.lines.len(), 6);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
data_dir = "/srv/sales"

[decomposition]
scope = "selected_line"

[chart]
title = "Cayenne outlook"
"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/sales"));
        assert_eq!(config.decomposition.scope, DecompositionScope::SelectedLine);
        assert_eq!(config.decomposition.period, 12);
        assert_eq!(config.chart.title, "Cayenne outlook");
        assert_eq!(config.chart.decomposition_height, 600);
    }

    #[test]
    fn best_model_depends_only_on_aggregate() {
        let config = DashboardConfig::default();
        let aggregate = config.best_model_for(&"All_Models".into()).to_string();
        let macan = config.best_model_for(&"Porsche_Macan".into()).to_string();
        let taycan = config.best_model_for(&"Porsche_Taycan".into()).to_string();
        assert_eq!(aggregate, "ARIMA (0, 0, 2)");
        assert_eq!(macan, "ARIMA (1, 0, 0)");
        assert_eq!(macan, taycan);
    }

    #[test]
    fn period_below_two_is_invalid() {
        let err = DashboardConfig::from_toml("[decomposition]\nperiod = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_scope_is_a_parse_error() {
        let err = DashboardConfig::from_toml("[decomposition]\nscope = \"weekly\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/salescast.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
