use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of climate observations.
///
/// Records are expected in a contiguous, chronologically ordered sequence.
/// `temp_max >= temp_min` is not enforced: some historical series contain
/// inverted extremes and the model only ever uses the absolute difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClimateRecord {
    pub date: NaiveDate,    // date
    pub temp_max: f64,      // tamax_degC
    pub temp_min: f64,      // tamin_degC
    pub precipitation: f64, // ptot_mm (total mm)
}

impl DailyClimateRecord {
    pub fn new(date: NaiveDate, temp_max: f64, temp_min: f64, precipitation: f64) -> Self {
        Self {
            date,
            temp_max,
            temp_min,
            precipitation,
        }
    }

    /// Daily temperature range `|max - min|` in °C.
    pub fn temperature_range(&self) -> f64 {
        (self.temp_max - self.temp_min).abs()
    }

    /// True when the maximum temperature is below the minimum.
    pub fn has_inverted_extremes(&self) -> bool {
        self.temp_max < self.temp_min
    }

    /// Name of the first non-finite field, if any.
    pub(crate) fn first_non_finite_field(&self) -> Option<&'static str> {
        if !self.temp_max.is_finite() {
            Some("temp_max")
        } else if !self.temp_min.is_finite() {
            Some("temp_min")
        } else if !self.precipitation.is_finite() {
            Some("precipitation")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_temperature_range_tolerates_inverted_extremes() {
        let record = DailyClimateRecord::new(date(1980, 1, 2), -24.4, -14.0, 0.41);
        assert!(record.has_inverted_extremes());
        assert!((record.temperature_range() - 10.4).abs() < 1e-12);
    }

    #[test]
    fn test_first_non_finite_field() {
        let ok = DailyClimateRecord::new(date(1980, 1, 1), -14.8, -20.8, 1.54);
        assert_eq!(ok.first_non_finite_field(), None);

        let missing_min = DailyClimateRecord::new(date(1980, 1, 1), -14.8, f64::NAN, 1.54);
        assert_eq!(missing_min.first_non_finite_field(), Some("temp_min"));

        let missing_rain = DailyClimateRecord::new(date(1980, 1, 1), -14.8, -20.8, f64::NAN);
        assert_eq!(missing_rain.first_non_finite_field(), Some("precipitation"));
    }
}
