// hourly_frame.rs

//! Contains the `HourlyRadiationFrame` structure for handling lazy operations on hourly radiation output.

use crate::climate_data::error::ClimateDataError;
use crate::frames::daily_frame::{float_values, get_column, string_values};
use crate::types::radiation::HourlyRadiationRecord;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

pub const DATETIME: &str = "datetime";
pub const SOLAR_RADIATION: &str = "solar_rad_W/m2";
pub const DELTA_T: &str = "deltat_degC";
pub const TAU: &str = "tau";

/// Text form of the `datetime` column in CSV files.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names of an hourly radiation table, in output order.
pub fn schema_column_names() -> Vec<&'static str> {
    vec![DATETIME, SOLAR_RADIATION, DELTA_T, TAU]
}

/// A wrapper around a Polars `LazyFrame` holding an hourly radiation series.
///
/// The `datetime` column is a timezone-naive `Datetime` in local standard
/// time of the site; the other columns are `Float64`. There are exactly 24
/// rows per input day.
#[derive(Clone)]
pub struct HourlyRadiationFrame {
    /// The underlying Polars LazyFrame containing the hourly data.
    pub frame: LazyFrame,
}

impl HourlyRadiationFrame {
    /// Creates a new `HourlyRadiationFrame` wrapping the given Polars `LazyFrame`.
    ///
    /// # Arguments
    ///
    /// * `frame` - A `LazyFrame` assumed to contain the hourly radiation columns.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds a frame from the output of [`crate::SolarCalc::compute`].
    ///
    /// # Arguments
    ///
    /// * `records` - Hourly records in the order they should appear in the table.
    ///
    /// # Returns
    ///
    /// A frame with one row per record and the columns of [`schema_column_names`].
    pub fn from_records(records: &[HourlyRadiationRecord]) -> Result<Self, ClimateDataError> {
        let df = DataFrame::new(vec![
            Column::new(
                DATETIME.into(),
                records
                    .iter()
                    .map(|r| r.datetime)
                    .collect::<Vec<NaiveDateTime>>(),
            ),
            Column::new(
                SOLAR_RADIATION.into(),
                records
                    .iter()
                    .map(|r| r.solar_radiation)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                DELTA_T.into(),
                records.iter().map(|r| r.delta_t).collect::<Vec<f64>>(),
            ),
            Column::new(
                TAU.into(),
                records.iter().map(|r| r.tau).collect::<Vec<f64>>(),
            ),
        ])?;
        Ok(Self::new(df.lazy()))
    }

    /// Filters the hourly data based on a Polars predicate expression.
    ///
    /// # Arguments
    ///
    /// * `predicate` - A Polars `Expr`, e.g. `col(SOLAR_RADIATION).gt(lit(0.0))`.
    ///
    /// # Returns
    ///
    /// A *new* `HourlyRadiationFrame` with the filter added to its plan; the
    /// original remains unchanged.
    pub fn filter(&self, predicate: Expr) -> HourlyRadiationFrame {
        HourlyRadiationFrame::new(self.frame.clone().filter(predicate))
    }

    /// Filters the hourly data to timestamps within `start..=end`.
    pub fn get_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> HourlyRadiationFrame {
        self.filter(
            col(DATETIME)
                .gt_eq(lit(start))
                .and(col(DATETIME).lt_eq(lit(end))),
        )
    }

    /// Filters the hourly data to the 24 hours of one calendar day.
    pub fn get_for_day(&self, date: NaiveDate) -> HourlyRadiationFrame {
        let start = date.and_time(NaiveTime::MIN);
        self.get_range(start, start + Duration::hours(23))
    }

    /// Executes the lazy plan.
    ///
    /// # Returns
    ///
    /// The materialized `DataFrame`, or [`ClimateDataError::DataFrameProcessing`]
    /// if Polars fails to evaluate the plan.
    pub fn collect(&self) -> Result<DataFrame, ClimateDataError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Collects the frame and converts every row into an [`HourlyRadiationRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimateDataError::ColumnNotFound`] if a column is missing,
    /// [`ClimateDataError::NullValue`] if any cell is empty and
    /// [`ClimateDataError::DateParse`] if a text timestamp cannot be read.
    pub fn collect_records(&self) -> Result<Vec<HourlyRadiationRecord>, ClimateDataError> {
        let df = self.collect()?;
        records_from_dataframe(&df)
    }
}

pub(crate) fn records_from_dataframe(
    df: &DataFrame,
) -> Result<Vec<HourlyRadiationRecord>, ClimateDataError> {
    let datetimes = datetime_values(df, DATETIME)?;
    let radiation = float_values(df, SOLAR_RADIATION)?;
    let delta_t = float_values(df, DELTA_T)?;
    let tau = float_values(df, TAU)?;

    Ok(datetimes
        .into_iter()
        .zip(radiation)
        .zip(delta_t)
        .zip(tau)
        .map(
            |(((datetime, solar_radiation), delta_t), tau)| HourlyRadiationRecord {
                datetime,
                solar_radiation,
                delta_t,
                tau,
            },
        )
        .collect())
}

fn datetime_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDateTime>, ClimateDataError> {
    if get_column(df, name)?.dtype() == &DataType::String {
        return string_values(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, text)| {
                NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).map_err(|_| {
                    ClimateDataError::DateParse {
                        column: name.to_string(),
                        row,
                        value: text.clone(),
                    }
                })
            })
            .collect();
    }

    let column_type_error = |source| ClimateDataError::ColumnType {
        column: name.to_string(),
        source,
    };
    let millis = get_column(df, name)?
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .and_then(|c| c.cast(&DataType::Int64))
        .map_err(column_type_error)?;
    let values = millis.i64().map_err(column_type_error)?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| ClimateDataError::NullValue {
                    column: name.to_string(),
                    row,
                })
        })
        .collect()
}
