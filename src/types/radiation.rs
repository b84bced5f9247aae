use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One hour of estimated global solar radiation on a horizontal surface.
///
/// The daily temperature range and transmittance are repeated on each of the
/// 24 hours of a day so the heuristic can be traced from the output alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRadiationRecord {
    pub datetime: NaiveDateTime, // datetime
    pub solar_radiation: f64,    // solar_rad_W/m2
    pub delta_t: f64,            // deltat_degC
    pub tau: f64,                // tau
}

/// Radiation aggregated over one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRadiationTotal {
    pub date: NaiveDate,
    /// Daily total in MJ/m².
    pub total: f64,
    /// Highest hourly value of the day in W/m².
    pub peak: f64,
    pub tau: f64,
}

/// Sums an hourly series into per-day totals, in input order.
///
/// Each hourly value is treated as a mean irradiance over one hour
/// (W/m² × 3600 s), so a full day of `n` W/m² gives `n × 24 × 3600 / 10⁶` MJ/m².
pub fn daily_totals(records: &[HourlyRadiationRecord]) -> Vec<DailyRadiationTotal> {
    let mut totals: Vec<DailyRadiationTotal> = Vec::new();
    for record in records {
        let date = record.datetime.date();
        let energy = record.solar_radiation * 3600.0 / 1.0e6;
        match totals.last_mut() {
            Some(day) if day.date == date => {
                day.total += energy;
                day.peak = day.peak.max(record.solar_radiation);
            }
            _ => totals.push(DailyRadiationTotal {
                date,
                total: energy,
                peak: record.solar_radiation,
                tau: record.tau,
            }),
        }
    }
    totals
}
