//! Salescast Core — domain types, table ingest, decomposition, merging and chart specs.
//!
//! This crate contains the forecast composition and presentation engine:
//! - Domain types (model lines, forecast methods, selections, series)
//! - Table ingest for the four dashboard tables (CSV and Parquet)
//! - Classical additive seasonal decomposition
//! - Forecast selection and merging into one comparison series
//! - Renderer-neutral chart specifications for both charts
//!
//! Everything here is pure and synchronous. Loaded tables are read-only
//! snapshots; every operation derives new values from them.

pub mod analysis;
pub mod chart;
pub mod data;
pub mod domain;
pub mod error;
pub mod merge;

pub use error::{DashboardError, Result};
