// daily_frame.rs

//! Contains the `DailyClimateFrame` structure for handling lazy operations on daily climate input data.

use crate::climate_data::error::ClimateDataError;
use crate::types::climate::DailyClimateRecord;
use chrono::NaiveDate;
use polars::prelude::*;

pub const DATE: &str = "date";
pub const TEMP_MAX: &str = "tamax_degC";
pub const TEMP_MIN: &str = "tamin_degC";
pub const PRECIPITATION: &str = "ptot_mm";

/// Column names of a daily climate table, in output order.
pub fn schema_column_names() -> Vec<&'static str> {
    vec![DATE, TEMP_MAX, TEMP_MIN, PRECIPITATION]
}

/// A wrapper around a Polars `LazyFrame` holding a daily climate series.
///
/// The frame has a `date` column of type `Date` and `tamax_degC`,
/// `tamin_degC` and `ptot_mm` columns of type `Float64`.
///
/// Instances are usually obtained through [`crate::ClimateDataLoader`] or
/// [`DailyClimateFrame::from_records`].
///
/// # Errors
///
/// Operations that trigger computation on the underlying `LazyFrame` (e.g.,
/// [`DailyClimateFrame::collect_records`]) return a [`ClimateDataError`] if
/// the computation fails or the data is incomplete.
#[derive(Clone)]
pub struct DailyClimateFrame {
    /// The underlying Polars LazyFrame containing the daily data.
    pub frame: LazyFrame,
}

impl DailyClimateFrame {
    /// Creates a new `DailyClimateFrame` wrapping the given Polars `LazyFrame`.
    ///
    /// # Arguments
    ///
    /// * `frame` - A `LazyFrame` assumed to contain the daily climate columns.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds a frame from in-memory records.
    ///
    /// # Examples
    ///
    /// ```
    /// use solarcalc::{DailyClimateFrame, DailyClimateRecord};
    /// use chrono::NaiveDate;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let day = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    /// let frame = DailyClimateFrame::from_records(&[DailyClimateRecord::new(day, -14.8, -20.8, 1.54)])?;
    /// assert_eq!(frame.frame.collect()?.height(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_records(records: &[DailyClimateRecord]) -> Result<Self, ClimateDataError> {
        let df = DataFrame::new(vec![
            Column::new(
                DATE.into(),
                records.iter().map(|r| r.date).collect::<Vec<NaiveDate>>(),
            ),
            Column::new(
                TEMP_MAX.into(),
                records.iter().map(|r| r.temp_max).collect::<Vec<f64>>(),
            ),
            Column::new(
                TEMP_MIN.into(),
                records.iter().map(|r| r.temp_min).collect::<Vec<f64>>(),
            ),
            Column::new(
                PRECIPITATION.into(),
                records.iter().map(|r| r.precipitation).collect::<Vec<f64>>(),
            ),
        ])?;
        Ok(Self::new(df.lazy()))
    }

    /// Filters the daily data based on a Polars predicate expression.
    ///
    /// Returns a *new* `DailyClimateFrame`; the original remains unchanged.
    pub fn filter(&self, predicate: Expr) -> DailyClimateFrame {
        DailyClimateFrame::new(self.frame.clone().filter(predicate))
    }

    /// Filters the daily data to dates within `start..=end`.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> DailyClimateFrame {
        self.filter(
            col(DATE)
                .gt_eq(lit(start))
                .and(col(DATE).lt_eq(lit(end))),
        )
    }

    /// Filters the daily data to a single date.
    pub fn get_at(&self, date: NaiveDate) -> DailyClimateFrame {
        self.filter(col(DATE).eq(lit(date)))
    }

    /// Collects the frame and converts every row into a [`DailyClimateRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimateDataError::ColumnNotFound`] if a column is missing,
    /// [`ClimateDataError::NullValue`] if any cell is empty and
    /// [`ClimateDataError::DateParse`] if a date cannot be read.
    pub fn collect_records(&self) -> Result<Vec<DailyClimateRecord>, ClimateDataError> {
        let df = self.frame.clone().collect()?;
        records_from_dataframe(&df)
    }
}

/// Reads daily records out of any DataFrame with the daily climate columns.
///
/// The `date` column may be a polars `Date` or `YYYY-MM-DD` text; the value
/// columns may be of any numeric type.
pub(crate) fn records_from_dataframe(
    df: &DataFrame,
) -> Result<Vec<DailyClimateRecord>, ClimateDataError> {
    let dates = date_values(df, DATE)?;
    let temp_max = float_values(df, TEMP_MAX)?;
    let temp_min = float_values(df, TEMP_MIN)?;
    let precipitation = float_values(df, PRECIPITATION)?;

    Ok(dates
        .into_iter()
        .zip(temp_max)
        .zip(temp_min)
        .zip(precipitation)
        .map(|(((date, tmax), tmin), ptot)| DailyClimateRecord::new(date, tmax, tmin, ptot))
        .collect())
}

pub(crate) fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ClimateDataError> {
    df.column(name)
        .map_err(|e| ClimateDataError::ColumnNotFound(name.to_string(), e))
}

pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ClimateDataError> {
    let column_type_error = |source| ClimateDataError::ColumnType {
        column: name.to_string(),
        source,
    };
    let casted = get_column(df, name)?
        .cast(&DataType::Float64)
        .map_err(column_type_error)?;
    let values = casted.f64().map_err(column_type_error)?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| ClimateDataError::NullValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

/// Text values of a column, casting dates and numbers to their string form.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>, ClimateDataError> {
    let column_type_error = |source| ClimateDataError::ColumnType {
        column: name.to_string(),
        source,
    };
    let casted = get_column(df, name)?
        .cast(&DataType::String)
        .map_err(column_type_error)?;
    let values = casted.str().map_err(column_type_error)?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(|s| s.trim().to_string())
                .ok_or_else(|| ClimateDataError::NullValue {
                    column: name.to_string(),
                    row,
                })
        })
        .collect()
}

fn date_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>, ClimateDataError> {
    string_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, text)| {
            // Accepts "YYYY-MM-DD" and datetimes that start with it.
            NaiveDate::parse_and_remainder(&text, "%Y-%m-%d")
                .map(|(date, _)| date)
                .map_err(|_| ClimateDataError::DateParse {
                    column: name.to_string(),
                    row,
                    value: text.clone(),
                })
        })
        .collect()
}
