//! Daily atmospheric transmittance from rain history and temperature swing.
//!
//! The classifier is an ordered chain of overwrites on a single value. Later
//! rules win over earlier ones and the temperature-range rule always divides
//! whatever the rain rules produced.

use crate::transmittance::policy::PreRainPolicy;
use crate::types::climate::DailyClimateRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A day is rainy when it receives strictly more than this, in mm.
pub const RAIN_THRESHOLD_MM: f64 = 1.0;

pub const CLEAR_SKY_TAU: f64 = 0.70;
pub const OVERCAST_TAU: f64 = 0.40;
/// Rain on two consecutive days means denser cloud cover.
pub const PERSISTENT_OVERCAST_TAU: f64 = 0.30;
pub const PRE_RAIN_TAU: f64 = 0.60;

/// The temperature-range rule only applies below this absolute latitude.
pub const RANGE_RULE_MAX_LATITUDE: f64 = 60.0;
/// Largest temperature range, in °C, that still darkens the day.
pub const RANGE_RULE_MAX_DELTA_T: f64 = 10.0;
const RANGE_RULE_DIVISOR: f64 = 11.0;

pub fn is_rainy(precipitation: f64) -> bool {
    precipitation > RAIN_THRESHOLD_MM
}

/// The slice of the series the classifier sees for one day.
///
/// `previous_rainy` is `None` on the first day, `next_rainy` on the last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayWindow {
    pub previous_rainy: Option<bool>,
    pub rainy: bool,
    pub next_rainy: Option<bool>,
    pub delta_t: f64,
}

impl DayWindow {
    /// Builds the window of day `index` from the rain flags of the whole series.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn at(rain_flags: &[bool], index: usize, delta_t: f64) -> Option<Self> {
        let rainy = *rain_flags.get(index)?;
        let previous_rainy = index
            .checked_sub(1)
            .and_then(|i| rain_flags.get(i))
            .copied();
        let next_rainy = rain_flags.get(index + 1).copied();
        Some(Self {
            previous_rainy,
            rainy,
            next_rainy,
            delta_t,
        })
    }
}

/// Transmittance coefficient of one day, in (0, 1].
pub fn classify(window: &DayWindow, latitude_deg: f64, policy: PreRainPolicy) -> f64 {
    let mut tau = CLEAR_SKY_TAU;

    if window.rainy {
        tau = OVERCAST_TAU;
    }

    if window.rainy && window.previous_rainy == Some(true) {
        tau = PERSISTENT_OVERCAST_TAU;
    }

    if policy.is_pre_rain(window.rainy, window.next_rainy) {
        tau = PRE_RAIN_TAU;
    }

    // A range of exactly 0 never qualifies, so the divisor stays below 11.
    if latitude_deg.abs() < RANGE_RULE_MAX_LATITUDE
        && window.delta_t > 0.0
        && window.delta_t <= RANGE_RULE_MAX_DELTA_T
    {
        tau /= RANGE_RULE_DIVISOR - window.delta_t;
    }

    tau
}

/// Per-day quantities derived from the climate series before any geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedDailyState {
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub rainy: bool,
    pub delta_t: f64,
    pub tau: f64,
}

/// Classifies every day of a series in one pass, one state per record.
///
/// The records are assumed to be contiguous and in chronological order.
pub fn derive_states(
    records: &[DailyClimateRecord],
    latitude_deg: f64,
    policy: PreRainPolicy,
) -> Vec<DerivedDailyState> {
    let rain_flags: Vec<bool> = records.iter().map(|r| is_rainy(r.precipitation)).collect();

    records
        .iter()
        .zip(rain_flags.iter())
        .enumerate()
        .map(|(index, (record, &rainy))| {
            let window = DayWindow {
                previous_rainy: index.checked_sub(1).map(|i| rain_flags[i]),
                rainy,
                next_rainy: rain_flags.get(index + 1).copied(),
                delta_t: record.temperature_range(),
            };
            DerivedDailyState {
                date: record.date,
                day_of_year: record.date.ordinal(),
                rainy,
                delta_t: window.delta_t,
                tau: classify(&window, latitude_deg, policy),
            }
        })
        .collect()
}
