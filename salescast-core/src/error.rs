//! Errors surfaced to the user by the dashboard pipeline.
//!
//! Every variant is recoverable: it produces a visible message and leaves
//! the dashboard ready for another selection.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The action was triggered with no forecast method chosen.
    #[error("Please Select an Algorithm!")]
    NoMethodSelected,

    /// The series is too short or malformed for the decomposition period.
    #[error("insufficient data for seasonal decomposition: {0}")]
    InsufficientData(String),

    /// The selected line is missing from one of the loaded tables.
    #[error("model line '{line}' not found in {table}")]
    UnknownModelLine { line: String, table: &'static str },
}

impl DashboardError {
    /// Short category tag for status bars and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::NoMethodSelected => "selection",
            DashboardError::InsufficientData(_) => "data",
            DashboardError::UnknownModelLine { .. } => "integrity",
        }
    }
}
