//! This module provides the main entry point of the crate. A [`SolarCalc`] is
//! configured once for a site and turns a daily climate series into an hourly
//! solar radiation series.

use crate::astronomy::geometry::{SolarGeometry, Twilight};
use crate::error::SolarCalcError;
use crate::frames::daily_frame::DailyClimateFrame;
use crate::frames::hourly_frame::HourlyRadiationFrame;
use crate::irradiance::synthesize_day;
use crate::maybe_rayon::map_in_order;
use crate::transmittance::classifier::{self, DerivedDailyState};
use crate::transmittance::policy::PreRainPolicy;
use crate::types::climate::DailyClimateRecord;
use crate::types::radiation::HourlyRadiationRecord;
use crate::types::site::SiteLocation;
use bon::bon;
use chrono::{Duration, NaiveTime};
use log::{debug, info, warn};

/// Estimates hourly global solar radiation at one site.
///
/// The computation is deterministic: the same site, options and climate series
/// always give the same output.
///
/// # Examples
///
/// ```
/// use solarcalc::{DailyClimateRecord, SolarCalc};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), solarcalc::SolarCalcError> {
/// let calc = SolarCalc::builder()
///     .longitude(-76.4687209)
///     .latitude(56.5213541)
///     .altitude(100.0)
///     .build()?;
///
/// let day = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
/// let hourly = calc.compute(&[DailyClimateRecord::new(day, -14.8, -20.8, 1.54)])?;
/// assert_eq!(hourly.len(), 24);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCalc {
    site: SiteLocation,
    pre_rain_policy: PreRainPolicy,
    twilight: Twilight,
}

#[bon]
impl SolarCalc {
    /// Creates a new `SolarCalc` for a site.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.longitude(f64)`: **Required.** Decimal degrees, east positive.
    /// * `.latitude(f64)`: **Required.** Decimal degrees, north positive.
    /// * `.altitude(f64)`: **Required.** Meters above sea level.
    /// * `.pre_rain_policy(PreRainPolicy)`: Optional. Defaults to [`PreRainPolicy::NextDay`].
    /// * `.twilight(Twilight)`: Optional. Defaults to [`Twilight::Geometric`].
    ///
    /// # Errors
    ///
    /// Returns [`SolarCalcError::InvalidSite`] if the coordinates are out of range.
    #[builder]
    pub fn new(
        longitude: f64,
        latitude: f64,
        altitude: f64,
        pre_rain_policy: Option<PreRainPolicy>,
        twilight: Option<Twilight>,
    ) -> Result<Self, SolarCalcError> {
        let site = SiteLocation::new(longitude, latitude, altitude)?;
        Ok(Self {
            site,
            pre_rain_policy: pre_rain_policy.unwrap_or_default(),
            twilight: twilight.unwrap_or_default(),
        })
    }

    /// Creates a `SolarCalc` with default options for an already validated site.
    pub fn with_site(site: SiteLocation) -> Self {
        Self {
            site,
            pre_rain_policy: PreRainPolicy::default(),
            twilight: Twilight::default(),
        }
    }

    pub fn site(&self) -> &SiteLocation {
        &self.site
    }

    pub fn pre_rain_policy(&self) -> PreRainPolicy {
        self.pre_rain_policy
    }

    pub fn twilight(&self) -> Twilight {
        self.twilight
    }

    /// Derives the rain flag, temperature range and transmittance of every day.
    ///
    /// # Errors
    ///
    /// Returns [`SolarCalcError::MalformedRecord`] if any record holds a
    /// non-finite temperature or precipitation value.
    pub fn derive_states(
        &self,
        records: &[DailyClimateRecord],
    ) -> Result<Vec<DerivedDailyState>, SolarCalcError> {
        validate_records(records)?;
        Ok(classifier::derive_states(
            records,
            self.site.latitude(),
            self.pre_rain_policy,
        ))
    }

    /// Computes 24 hourly radiation records for every daily record.
    ///
    /// `records` must be a contiguous, chronologically ordered series; the
    /// output follows the same order, from the first day 00:00 to the last
    /// day 23:00.
    ///
    /// # Errors
    ///
    /// Returns [`SolarCalcError::MalformedRecord`] if any record holds a
    /// non-finite value. No partial output is produced in that case.
    pub fn compute(
        &self,
        records: &[DailyClimateRecord],
    ) -> Result<Vec<HourlyRadiationRecord>, SolarCalcError> {
        info!(
            "Computing hourly solar radiation for {} days at lon {}, lat {}, alt {} m",
            records.len(),
            self.site.longitude(),
            self.site.latitude(),
            self.site.altitude()
        );
        let states = self.derive_states(records)?;

        // Once tau is known, days are independent of each other.
        let site = self.site;
        let twilight = self.twilight;
        let days: Vec<Vec<HourlyRadiationRecord>> =
            map_in_order(states, |state| day_records(&state, &site, twilight));

        let hourly: Vec<HourlyRadiationRecord> = days.into_iter().flatten().collect();
        info!("Produced {} hourly records", hourly.len());
        Ok(hourly)
    }

    /// Like [`SolarCalc::compute`], reading from and writing to Polars frames.
    ///
    /// # Errors
    ///
    /// Returns [`SolarCalcError::ClimateData`] if the daily frame is missing a
    /// column or holds null or unparseable values, and the errors of
    /// [`SolarCalc::compute`].
    pub fn compute_frame(
        &self,
        daily: &DailyClimateFrame,
    ) -> Result<HourlyRadiationFrame, SolarCalcError> {
        let records = daily.collect_records()?;
        let hourly = self.compute(&records)?;
        Ok(HourlyRadiationFrame::from_records(&hourly)?)
    }
}

fn validate_records(records: &[DailyClimateRecord]) -> Result<(), SolarCalcError> {
    for (index, record) in records.iter().enumerate() {
        if let Some(field) = record.first_non_finite_field() {
            return Err(SolarCalcError::MalformedRecord {
                index,
                date: record.date,
                field,
            });
        }
        if record.has_inverted_extremes() {
            warn!(
                "Maximum temperature {} is below minimum {} on {}, using the absolute range",
                record.temp_max, record.temp_min, record.date
            );
        }
    }
    Ok(())
}

fn day_records(
    state: &DerivedDailyState,
    site: &SiteLocation,
    twilight: Twilight,
) -> Vec<HourlyRadiationRecord> {
    let geometry = SolarGeometry::compute(state.day_of_year, site, twilight);
    if geometry.has_daylight() {
        debug!(
            "{} (day {}): rain {}, deltaT {:.2}, tau {:.4}, sunrise {:.3}, sunset {:.3}",
            state.date,
            state.day_of_year,
            state.rainy,
            state.delta_t,
            state.tau,
            geometry.sunrise,
            geometry.sunset
        );
    } else {
        warn!(
            "{} (day {}): no sunrise at latitude {}, all hours set to zero",
            state.date,
            state.day_of_year,
            site.latitude()
        );
    }

    let hourly = synthesize_day(&geometry, state.tau, site.altitude());
    let midnight = state.date.and_time(NaiveTime::MIN);
    hourly
        .iter()
        .enumerate()
        .map(|(hour, &solar_radiation)| HourlyRadiationRecord {
            datetime: midnight + Duration::hours(hour as i64),
            solar_radiation,
            delta_t: state.delta_t,
            tau: state.tau,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    fn regression_calc() -> SolarCalc {
        SolarCalc::builder()
            .longitude(-76.4687209)
            .latitude(56.5213541)
            .altitude(100.0)
            .build()
            .unwrap()
    }

    // Day 1 tests deltaT <= 10 with inverted extremes, day 2 deltaT > 10,
    // days 3-6 deltaT == 0. Precipitation gives overcast at the start of the
    // series, clear sky, pre-rain, overcast, denser cloud and clear sky at the end.
    fn regression_series() -> Vec<DailyClimateRecord> {
        let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        let tamin = [-20.8, -14.0, -28.7, -32.84, -33.4, -29.6];
        let tamax = [-14.8, -24.4, -28.7, -32.84, -33.4, -29.6];
        let ptot = [1.54, 0.41, 0.00, 2.35, 1.92, 0.21];
        (0..6)
            .map(|i| {
                DailyClimateRecord::new(start + Duration::days(i as i64), tamax[i], tamin[i], ptot[i])
            })
            .collect()
    }

    #[rustfmt::skip]
    const EXPECTED_RADIATION: [f64; 144] = [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 6.98, 41.6, 64.28, 73.5, 68.62, 49.97, 18.82,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 7.19, 45.07, 81.08, 98.82, 89.54, 57.65, 19.67,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 7.44, 43.02, 71.64, 85.66, 78.56, 53.7, 20.5,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 7.75, 42.7, 66.27, 76.57, 71.6, 52.44, 21.4,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 8.11, 43.15, 66.4, 76.26, 71.69, 53.23, 22.35,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 8.53, 47.46, 85.16, 104.19, 95.5, 63.03, 23.46,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ];

    #[test]
    fn test_regression_series() -> Result<(), SolarCalcError> {
        let hourly = regression_calc().compute(&regression_series())?;
        assert_eq!(hourly.len(), 144);

        let expected_delta_t = [6.0, 10.4, 0.0, 0.0, 0.0, 0.0];
        let expected_tau = [0.4 / (11.0 - 6.0), 0.7, 0.6, 0.4, 0.3, 0.7];
        for (i, record) in hourly.iter().enumerate() {
            assert_abs_diff_eq!(record.delta_t, expected_delta_t[i / 24], epsilon = 1e-12);
            assert_abs_diff_eq!(record.tau, expected_tau[i / 24], epsilon = 1e-12);
            assert_eq!(
                record.solar_radiation, EXPECTED_RADIATION[i],
                "hour {} of the series",
                i
            );
        }
        Ok(())
    }

    #[test]
    fn test_timestamps_are_hourly_and_gap_free() -> Result<(), SolarCalcError> {
        let hourly = regression_calc().compute(&regression_series())?;
        let first: NaiveDateTime = NaiveDate::from_ymd_opt(1980, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(hourly[0].datetime, first);
        assert_eq!(hourly[143].datetime, first + Duration::hours(143));
        for pair in hourly.windows(2) {
            assert_eq!(pair[1].datetime - pair[0].datetime, Duration::hours(1));
        }
        Ok(())
    }

    #[test]
    fn test_compute_is_idempotent() -> Result<(), SolarCalcError> {
        let calc = regression_calc();
        let series = regression_series();
        assert_eq!(calc.compute(&series)?, calc.compute(&series)?);
        Ok(())
    }

    #[test]
    fn test_compute_empty_series() -> Result<(), SolarCalcError> {
        assert!(regression_calc().compute(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_record_fails_the_whole_run() {
        let mut series = regression_series();
        series[3].temp_min = f64::NAN;
        let err = regression_calc().compute(&series).unwrap_err();
        match err {
            SolarCalcError::MalformedRecord { index, date, field } => {
                assert_eq!(index, 3);
                assert_eq!(date, NaiveDate::from_ymd_opt(1980, 1, 4).unwrap());
                assert_eq!(field, "temp_min");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_year_rollover_uses_calendar_day_of_year() -> Result<(), SolarCalcError> {
        let calc = regression_calc();
        let dec31 = NaiveDate::from_ymd_opt(1980, 12, 31).unwrap();
        let series = vec![
            DailyClimateRecord::new(dec31, 0.0, 0.0, 0.0),
            DailyClimateRecord::new(dec31 + Duration::days(1), 0.0, 0.0, 0.0),
        ];
        let states = calc.derive_states(&series)?;
        assert_eq!(states[0].day_of_year, 366);
        assert_eq!(states[1].day_of_year, 1);

        let hourly = calc.compute(&series)?;
        assert_eq!(
            hourly[24].datetime,
            NaiveDate::from_ymd_opt(1981, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_builder_rejects_invalid_site() {
        let result = SolarCalc::builder()
            .longitude(0.0)
            .latitude(-95.0)
            .altitude(0.0)
            .build();
        assert!(matches!(
            result,
            Err(SolarCalcError::InvalidSite {
                field: "latitude",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_options() -> Result<(), SolarCalcError> {
        let calc = SolarCalc::builder()
            .longitude(2.35)
            .latitude(48.85)
            .altitude(35.0)
            .pre_rain_policy(PreRainPolicy::Disabled)
            .twilight(Twilight::Civil)
            .build()?;
        assert_eq!(calc.pre_rain_policy(), PreRainPolicy::Disabled);
        assert_eq!(calc.twilight(), Twilight::Civil);

        let defaults = SolarCalc::with_site(*calc.site());
        assert_eq!(defaults.pre_rain_policy(), PreRainPolicy::NextDay);
        assert_eq!(defaults.twilight(), Twilight::Geometric);
        Ok(())
    }

    #[test]
    fn test_disabled_pre_rain_policy_changes_only_pre_rain_day() -> Result<(), SolarCalcError> {
        let calc = SolarCalc::builder()
            .longitude(-76.4687209)
            .latitude(56.5213541)
            .altitude(100.0)
            .pre_rain_policy(PreRainPolicy::Disabled)
            .build()?;
        let taus: Vec<f64> = calc
            .derive_states(&regression_series())?
            .iter()
            .map(|s| s.tau)
            .collect();
        assert_abs_diff_eq!(taus[2], 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(taus[3], 0.4, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_southern_hemisphere_summer_has_long_days() -> Result<(), SolarCalcError> {
        let calc = SolarCalc::builder()
            .longitude(151.2)
            .latitude(-33.9)
            .altitude(40.0)
            .build()?;
        let date = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
        let hourly = calc.compute(&[DailyClimateRecord::new(date, 30.0, 15.0, 0.0)])?;
        let lit_hours = hourly.iter().filter(|r| r.solar_radiation > 0.0).count();
        assert!(lit_hours >= 13, "only {} lit hours", lit_hours);
        Ok(())
    }

    #[test]
    fn test_compute_frame_on_demo_data() -> Result<(), Box<dyn std::error::Error>> {
        let daily = crate::climate_data::loader::ClimateDataLoader::new().demo_climate_data()?;
        let hourly = regression_calc().compute_frame(&daily)?;

        let records = hourly.collect_records()?;
        let values: Vec<f64> = records.iter().map(|r| r.solar_radiation).collect();
        assert_eq!(values, EXPECTED_RADIATION.to_vec());

        let day_three = hourly
            .get_for_day(NaiveDate::from_ymd_opt(1980, 1, 3).unwrap())
            .collect_records()?;
        assert_eq!(day_three.len(), 24);
        assert_abs_diff_eq!(day_three[0].tau, 0.6, epsilon = 1e-12);
        Ok(())
    }

    // With `--features parallel` this checks the rayon path against a plain
    // sequential walk over the same days.
    #[test]
    fn test_compute_matches_sequential_walk_over_long_series() -> Result<(), SolarCalcError> {
        let calc = regression_calc();
        let start = NaiveDate::from_ymd_opt(1999, 6, 1).unwrap();
        let records: Vec<DailyClimateRecord> = (0..800)
            .map(|i| {
                let ptot = if i % 5 < 2 { 4.0 } else { 0.0 };
                DailyClimateRecord::new(start + Duration::days(i), 12.0 + (i % 7) as f64, 3.0, ptot)
            })
            .collect();

        let hourly = calc.compute(&records)?;
        let expected: Vec<HourlyRadiationRecord> = calc
            .derive_states(&records)?
            .iter()
            .flat_map(|state| day_records(state, calc.site(), calc.twilight()))
            .collect();
        assert_eq!(hourly, expected);

        let first = start.and_time(NaiveTime::MIN);
        for (i, record) in hourly.iter().enumerate() {
            assert_eq!(record.datetime, first + Duration::hours(i as i64));
        }
        Ok(())
    }
}
