use polars::prelude::*;

pub const HISTORY_TABLE: &str = "Sales_History";
pub const FORECAST_TABLE: &str = "Sales_Forecast";
pub const DEMAND_TABLE: &str = "Demand_History";
pub const MODEL_INFO_TABLE: &str = "Model_Info";

/// Column holding the model line in every table.
pub const MODEL_COL: &str = "Model";
/// Column holding the period of a sales row.
pub const PERIOD_COL: &str = "Period";
/// Column holding the sold quantity (actual or forecast).
pub const VALUE_COL: &str = "Cars_Sold";
/// Column naming the forecast method in `Sales_Forecast`.
pub const METHOD_COL: &str = "Forecast_Model";

/// Expected schemas for the two sales tables.
///
/// Periods are read as text and parsed afterwards so that plain dates,
/// naive timestamps and offset-carrying timestamps all load the same way.
pub struct SalesSchema;

impl SalesSchema {
    /// Schema of `Sales_History`.
    pub fn history() -> Schema {
        Schema::from_iter(vec![
            Field::new(MODEL_COL.into(), DataType::String),
            Field::new(PERIOD_COL.into(), DataType::String),
            Field::new(VALUE_COL.into(), DataType::Float64),
        ])
    }

    /// Schema of `Sales_Forecast`.
    pub fn forecast() -> Schema {
        Schema::from_iter(vec![
            Field::new(MODEL_COL.into(), DataType::String),
            Field::new(METHOD_COL.into(), DataType::String),
            Field::new(PERIOD_COL.into(), DataType::String),
            Field::new(VALUE_COL.into(), DataType::Float64),
        ])
    }

    /// Validate a DataFrame against an expected schema.
    ///
    /// Every expected column must exist. The value column must be numeric;
    /// text columns accept any dtype since they are cast on extraction.
    pub fn validate(df: &DataFrame, expected: &Schema) -> Result<(), SchemaError> {
        let actual = df.schema();

        for field in expected.iter_fields() {
            let actual_dtype = actual
                .get(field.name())
                .ok_or_else(|| SchemaError::MissingColumn(field.name().to_string()))?;

            if field.dtype() == &DataType::Float64 && !is_numeric(actual_dtype) {
                return Err(SchemaError::TypeMismatch {
                    column: field.name().to_string(),
                    expected: field.dtype().clone(),
                    actual: actual_dtype.clone(),
                });
            }
        }

        Ok(())
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Type mismatch in column {column}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}
