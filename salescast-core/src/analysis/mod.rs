//! Series analysis: seasonal decomposition.

pub mod decompose;

pub use decompose::{
    decompose, decompose_rows, decompose_values, ComponentKind, Components, DecompositionResult,
    DEFAULT_PERIOD,
};
