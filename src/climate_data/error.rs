use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateDataError {
    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to parse bundled demo dataset")]
    DemoDataset(#[source] PolarsError),

    #[error("Failed to create output file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' has unsupported type: {source}")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Cannot parse '{value}' in column '{column}' at row {row} as a date")]
    DateParse {
        column: String,
        row: usize,
        value: String,
    },

    // The core assumes one record per calendar day, in order.
    #[error("Climate series is not contiguous: {next} does not follow {previous}")]
    DateGap { previous: NaiveDate, next: NaiveDate },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
