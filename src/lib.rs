//! Hourly solar radiation estimates from daily climate records.
//!
//! A [`SolarCalc`] is configured for one site (longitude, latitude, altitude)
//! and turns a contiguous daily series of maximum temperature, minimum
//! temperature and precipitation into 24 hourly values of global horizontal
//! irradiance per day, following Campbell & Norman (1998).
//!
//! ```
//! use solarcalc::{ClimateDataLoader, SolarCalc};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let calc = SolarCalc::builder()
//!     .longitude(-76.4687209)
//!     .latitude(56.5213541)
//!     .altitude(100.0)
//!     .build()?;
//!
//! let daily = ClimateDataLoader::new().demo_climate_data()?;
//! let hourly = calc.compute_frame(&daily)?;
//! assert_eq!(hourly.collect_records()?.len(), 6 * 24);
//! # Ok(())
//! # }
//! ```

mod astronomy;
mod climate_data;
mod error;
mod frames;
mod irradiance;
mod maybe_rayon;
mod solar_calc;
mod transmittance;
mod types;

pub use error::SolarCalcError;
pub use solar_calc::SolarCalc;

pub use climate_data::error::ClimateDataError;
pub use climate_data::loader::{validate_contiguous, ClimateDataLoader};

pub use frames::daily_frame::DailyClimateFrame;
pub use frames::hourly_frame::HourlyRadiationFrame;

pub use types::climate::DailyClimateRecord;
pub use types::radiation::{daily_totals, DailyRadiationTotal, HourlyRadiationRecord};
pub use types::site::SiteLocation;

pub use astronomy::geometry::{
    equation_of_time, half_day_length, longitudinal_correction, solar_declination, solar_noon,
    standard_meridian, zenith_angle, SolarGeometry, Twilight,
};
pub use irradiance::{
    atmospheric_pressure, beam_irradiance, diffuse_irradiance, hourly_irradiance,
    optical_air_mass, synthesize_day,
};
pub use transmittance::classifier::{classify, is_rainy, DayWindow, DerivedDailyState};
pub use transmittance::policy::PreRainPolicy;

/// Column names of the daily input table.
pub mod daily_columns {
    pub use crate::frames::daily_frame::{
        schema_column_names, DATE, PRECIPITATION, TEMP_MAX, TEMP_MIN,
    };
}

/// Column names of the hourly output table.
pub mod hourly_columns {
    pub use crate::frames::hourly_frame::{
        schema_column_names, DATETIME, DATETIME_FORMAT, DELTA_T, SOLAR_RADIATION, TAU,
    };
}
