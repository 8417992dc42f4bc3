//! Renderer-neutral chart specifications.
//!
//! Builders here only arrange data that was already computed. They never
//! filter, reorder, or recompute what they are given.

pub mod comparison;
pub mod decomposition;
pub mod spec;

pub use comparison::{build_chart, build_chart_titled, value_label, DEFAULT_TITLE};
pub use decomposition::{layout, layout_with_height, DECOMPOSITION_HEIGHT, X_AXIS_TITLE};
pub use spec::{ChartPoint, ChartSpec, Panel, Trace};
