use crate::climate_data::error::ClimateDataError;
use crate::frames::daily_frame::{records_from_dataframe, DailyClimateFrame};
use crate::frames::hourly_frame::{self, HourlyRadiationFrame, DATETIME_FORMAT};
use crate::types::climate::DailyClimateRecord;
use log::{info, warn};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Six days of winter data from northern Quebec, the series the hourly
/// regression values are computed from.
const DEMO_CLIMATE_CSV: &str = include_str!("../../data/demo_climate.csv");

/// Reads daily climate tables and writes hourly radiation tables as CSV.
///
/// Every daily series the loader returns has been checked to be contiguous:
/// one row per calendar day, in chronological order.
#[derive(Debug, Clone, Default)]
pub struct ClimateDataLoader;

impl ClimateDataLoader {
    pub fn new() -> ClimateDataLoader {
        ClimateDataLoader
    }

    /// Reads a daily climate CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateDataError::CsvRead`] if the file cannot be parsed and
    /// [`ClimateDataError::DateGap`] if a day is missing or out of order.
    pub fn read_daily_csv(&self, path: &Path) -> Result<DailyClimateFrame, ClimateDataError> {
        let path_buf = path.to_path_buf();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path_buf.clone()))
            .map_err(|e| ClimateDataError::CsvRead(path_buf.clone(), e))?
            .finish()
            .map_err(|e| ClimateDataError::CsvRead(path_buf.clone(), e))?;
        info!("Read {} daily rows from {:?}", df.height(), path);

        self.daily_from_dataframe(&df)
    }

    /// Normalizes an in-memory daily table into a [`DailyClimateFrame`].
    ///
    /// Text dates become polars `Date`s and numeric columns become `Float64`.
    pub fn daily_from_dataframe(&self, df: &DataFrame) -> Result<DailyClimateFrame, ClimateDataError> {
        let records = records_from_dataframe(df)?;
        validate_contiguous(&records)?;
        DailyClimateFrame::from_records(&records)
    }

    /// The bundled 6-day series starting on 1980-01-01.
    pub fn demo_climate_data(&self) -> Result<DailyClimateFrame, ClimateDataError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(DEMO_CLIMATE_CSV.as_bytes()))
            .finish()
            .map_err(ClimateDataError::DemoDataset)?;
        self.daily_from_dataframe(&df)
    }

    /// Writes an hourly radiation table as CSV, with `datetime` formatted as
    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn write_hourly_csv(
        &self,
        path: &Path,
        frame: &HourlyRadiationFrame,
    ) -> Result<(), ClimateDataError> {
        let path_buf = path.to_path_buf();
        let mut df = frame.collect()?;
        let mut file = std::fs::File::create(&path_buf)
            .map_err(|e| ClimateDataError::FileCreate(path_buf.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
            .finish(&mut df)
            .map_err(|e| ClimateDataError::CsvWrite(path_buf.clone(), e))?;
        info!("Wrote {} hourly rows to {:?}", df.height(), path);
        Ok(())
    }

    /// Reads back a CSV written by [`ClimateDataLoader::write_hourly_csv`].
    pub fn read_hourly_csv(&self, path: &Path) -> Result<HourlyRadiationFrame, ClimateDataError> {
        let path_buf = path.to_path_buf();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path_buf.clone()))
            .map_err(|e| ClimateDataError::CsvRead(path_buf.clone(), e))?
            .finish()
            .map_err(|e| ClimateDataError::CsvRead(path_buf.clone(), e))?;

        let records = hourly_frame::records_from_dataframe(&df)?;
        if records.len() % 24 != 0 {
            warn!(
                "Hourly table {:?} has {} rows, not a whole number of days",
                path,
                records.len()
            );
        }
        HourlyRadiationFrame::from_records(&records)
    }
}

/// Checks that every date is exactly one day after the previous one.
pub fn validate_contiguous(records: &[DailyClimateRecord]) -> Result<(), ClimateDataError> {
    for pair in records.windows(2) {
        let (previous, next) = (pair[0].date, pair[1].date);
        if previous.succ_opt() != Some(next) {
            return Err(ClimateDataError::DateGap { previous, next });
        }
    }
    Ok(())
}
