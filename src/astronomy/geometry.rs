//! Solar geometry from the day of year and the site coordinates.
//!
//! All functions follow Campbell & Norman (1998), chapter 11. Times are in
//! decimal hours of local standard time, angles are in radians unless the
//! argument name says otherwise.

use crate::types::site::SiteLocation;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const HOURS_PER_DAY: usize = 24;

/// Zenith angle of the sun at which a day is considered to start and end.
///
/// The geometric definition (90°) is what the radiation model is published
/// with. The other variants widen the daylight window for refraction and the
/// usual twilight conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Twilight {
    /// Sun centre on the horizon, ψ = 90°.
    #[default]
    Geometric,
    /// Apparent sunrise with refraction and solar radius, ψ = 90.833°.
    Apparent,
    /// ψ = 96°.
    Civil,
    /// ψ = 102°.
    Nautical,
    /// ψ = 108°.
    Astronomical,
}

impl Twilight {
    pub fn zenith_degrees(&self) -> f64 {
        match self {
            Twilight::Geometric => 90.0,
            Twilight::Apparent => 90.833,
            Twilight::Civil => 96.0,
            Twilight::Nautical => 102.0,
            Twilight::Astronomical => 108.0,
        }
    }

    pub fn zenith(&self) -> f64 {
        self.zenith_degrees().to_radians()
    }
}

/// Equation of time correction in hours (Campbell & Norman, eq. 11.4).
///
/// Stays within about ±0.25 h over the year.
pub fn equation_of_time(day_of_year: u32) -> f64 {
    let f = (279.575 + 0.98565 * day_of_year as f64) * PI / 180.0;
    (-104.7 * f.sin() + 596.2 * (2.0 * f).sin() + 4.3 * (3.0 * f).sin()
        - 12.7 * (4.0 * f).sin()
        - 429.3 * f.cos()
        - 2.0 * (2.0 * f).cos()
        + 19.3 * (3.0 * f).cos())
        / 3600.0
}

/// Standard meridian of the time zone, in degrees.
///
/// The longitude is truncated toward zero to a multiple of 15°.
pub fn standard_meridian(longitude_deg: f64) -> f64 {
    (longitude_deg / DEGREES_PER_HOUR).trunc() * DEGREES_PER_HOUR
}

/// Longitudinal correction in hours, positive east of the standard meridian.
pub fn longitudinal_correction(longitude_deg: f64) -> f64 {
    (longitude_deg - standard_meridian(longitude_deg)) * 24.0 / 360.0
}

/// Local standard time of solar noon, in decimal hours.
pub fn solar_noon(day_of_year: u32, longitude_deg: f64) -> f64 {
    12.0 - longitudinal_correction(longitude_deg) - equation_of_time(day_of_year)
}

/// Solar declination in radians (Campbell & Norman, eq. 11.2).
pub fn solar_declination(day_of_year: u32) -> f64 {
    let doy = day_of_year as f64;
    let d = 278.97 + 0.9856 * doy + 1.9165 * ((356.6 + 0.9856 * doy) * PI / 180.0).sin();
    (0.39785 * (d * PI / 180.0).sin()).asin()
}

/// Half of the daylight period in hours (Campbell & Norman, eq. 11.6).
///
/// Returns NaN during polar day or polar night, when the sun never crosses
/// the zenith angle `psi`.
pub fn half_day_length(latitude: f64, declination: f64, psi: f64) -> f64 {
    let ratio = (psi.cos() - latitude.sin() * declination.sin())
        / (latitude.cos() * declination.cos());
    // acos is NaN outside [-1, 1], which is how "no daylight" propagates.
    ratio.acos().to_degrees() / DEGREES_PER_HOUR
}

/// Zenith angle of the sun, in radians, at local standard time `hour`.
pub fn zenith_angle(latitude: f64, declination: f64, solar_noon: f64, hour: f64) -> f64 {
    let hour_angle = (DEGREES_PER_HOUR * (solar_noon - hour)).to_radians();
    (latitude.sin() * declination.sin() + latitude.cos() * declination.cos() * hour_angle.cos())
        .acos()
}

/// Solar geometry of one calendar day at one site.
///
/// Derived purely from the day of year and the site; no state carries over
/// from one day to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    pub day_of_year: u32,
    /// Decimal hour of local standard time.
    pub solar_noon: f64,
    pub declination: f64,
    /// Hours; NaN when the day has no sunrise or sunset.
    pub half_day_length: f64,
    pub sunrise: f64,
    pub sunset: f64,
    /// Zenith angle at each integer hour 0..=23.
    pub zenith: [f64; HOURS_PER_DAY],
}

impl SolarGeometry {
    pub fn compute(day_of_year: u32, site: &SiteLocation, twilight: Twilight) -> Self {
        let latitude = site.latitude_rad();
        let solar_noon = solar_noon(day_of_year, site.longitude());
        let declination = solar_declination(day_of_year);
        let half_day_length = half_day_length(latitude, declination, twilight.zenith());

        let mut zenith = [0.0; HOURS_PER_DAY];
        for (hour, z) in zenith.iter_mut().enumerate() {
            *z = zenith_angle(latitude, declination, solar_noon, hour as f64);
        }

        Self {
            day_of_year,
            solar_noon,
            declination,
            half_day_length,
            sunrise: solar_noon - half_day_length,
            sunset: solar_noon + half_day_length,
            zenith,
        }
    }

    /// False during polar day or polar night.
    pub fn has_daylight(&self) -> bool {
        self.half_day_length.is_finite()
    }

    /// True when `hour` lies inside [sunrise, sunset].
    ///
    /// Always false when the day has no defined sunrise.
    pub fn is_daylight(&self, hour: f64) -> bool {
        self.has_daylight() && hour >= self.sunrise && hour <= self.sunset
    }
}
