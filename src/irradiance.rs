//! Hourly global irradiance on a horizontal surface from solar geometry and
//! daily transmittance (Campbell & Norman, 1998, eq. 11.11 and 11.13).

use crate::astronomy::geometry::{SolarGeometry, HOURS_PER_DAY};

/// Extraterrestrial flux density normal to the solar beam, W/m².
pub const SOLAR_CONSTANT: f64 = 1360.0;
/// Sea-level atmospheric pressure, kPa.
pub const SEA_LEVEL_PRESSURE: f64 = 101.3;
/// Atmospheric scale height used for the pressure correction, m.
pub const PRESSURE_SCALE_HEIGHT: f64 = 8200.0;
/// Fraction of the attenuated beam that reaches the ground as diffuse sky radiation.
pub const DIFFUSE_FRACTION: f64 = 0.3;

/// Atmospheric pressure in kPa at `altitude` meters.
pub fn atmospheric_pressure(altitude: f64) -> f64 {
    SEA_LEVEL_PRESSURE * (-altitude / PRESSURE_SCALE_HEIGHT).exp()
}

/// Optical air mass for a sun at `cos_zenith`.
///
/// Grows without bound as the sun approaches the horizon; callers only use it
/// while the sun is above the horizon.
pub fn optical_air_mass(pressure: f64, cos_zenith: f64) -> f64 {
    pressure / SEA_LEVEL_PRESSURE / cos_zenith
}

/// Direct beam flux on a horizontal surface, W/m².
pub fn beam_irradiance(tau: f64, air_mass: f64, cos_zenith: f64) -> f64 {
    SOLAR_CONSTANT * tau.powf(air_mass) * cos_zenith
}

/// Diffuse sky flux on a horizontal surface, W/m².
///
/// A fixed share of the flux removed from the beam, so it vanishes for a
/// perfectly clear atmosphere (`tau == 1`).
pub fn diffuse_irradiance(tau: f64, air_mass: f64, cos_zenith: f64) -> f64 {
    DIFFUSE_FRACTION * (1.0 - tau.powf(air_mass)) * SOLAR_CONSTANT * cos_zenith
}

/// Rounds to two decimals, the precision the hourly series is reported at.
///
/// Ties go to the even hundredth.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Global irradiance at one hour of the day, in W/m², unrounded.
///
/// Hours outside [sunrise, sunset], hours with the sun below the horizon and
/// days without a sunrise all give exactly zero. The air mass is only
/// evaluated once those cases are excluded.
pub fn hourly_irradiance(geometry: &SolarGeometry, hour: usize, tau: f64, pressure: f64) -> f64 {
    if !geometry.is_daylight(hour as f64) {
        return 0.0;
    }
    let Some(&zenith) = geometry.zenith.get(hour) else {
        return 0.0;
    };
    let cos_zenith = zenith.cos();
    if !(cos_zenith > 0.0) {
        return 0.0;
    }

    let air_mass = optical_air_mass(pressure, cos_zenith);
    let total =
        beam_irradiance(tau, air_mass, cos_zenith) + diffuse_irradiance(tau, air_mass, cos_zenith);

    // Also catches NaN.
    if total > 0.0 {
        total
    } else {
        0.0
    }
}

/// The 24 hourly irradiance values of one day, rounded to two decimals.
pub fn synthesize_day(geometry: &SolarGeometry, tau: f64, altitude: f64) -> [f64; HOURS_PER_DAY] {
    let pressure = atmospheric_pressure(altitude);
    let mut hourly = [0.0; HOURS_PER_DAY];
    for (hour, value) in hourly.iter_mut().enumerate() {
        *value = round_hundredths(hourly_irradiance(geometry, hour, tau, pressure));
    }
    hourly
}
