use crate::climate_data::error::ClimateDataError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarCalcError {
    #[error(transparent)]
    ClimateData(#[from] ClimateDataError),

    #[error("Invalid site {field}: {value}")]
    InvalidSite { field: &'static str, value: f64 },

    #[error("Malformed climate record {index} ({date}): '{field}' is missing or not finite")]
    MalformedRecord {
        index: usize,
        date: NaiveDate,
        field: &'static str,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
