//! Defines the geographic site for which radiation is estimated.

use crate::error::SolarCalcError;
use serde::{Deserialize, Serialize};

/// A geographic site, in decimal degrees and meters above sea level.
///
/// Longitude is positive east of Greenwich, latitude is positive north of the
/// equator. A site is validated once, when it is created, and never changes
/// during a run.
///
/// # Examples
///
/// ```
/// use solarcalc::SiteLocation;
///
/// let site = SiteLocation::new(-76.4687209, 56.5213541, 100.0).unwrap();
/// assert_eq!(site.altitude(), 100.0);
/// assert!((site.latitude_rad() - 56.5213541_f64.to_radians()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SiteFields")]
pub struct SiteLocation {
    longitude: f64,
    latitude: f64,
    altitude: f64,
}

impl SiteLocation {
    /// Creates a new `SiteLocation`.
    ///
    /// # Errors
    ///
    /// Returns [`SolarCalcError::InvalidSite`] if any coordinate is not finite,
    /// if the longitude is outside [-180, 180] or if the latitude is outside [-90, 90].
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Result<Self, SolarCalcError> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SolarCalcError::InvalidSite {
                field: "longitude",
                value: longitude,
            });
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SolarCalcError::InvalidSite {
                field: "latitude",
                value: latitude,
            });
        }
        if !altitude.is_finite() {
            return Err(SolarCalcError::InvalidSite {
                field: "altitude",
                value: altitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
            altitude,
        })
    }

    /// Longitude in decimal degrees, east positive.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in decimal degrees, north positive.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Altitude in meters above sea level.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }
}

/// Unchecked wire form of a [`SiteLocation`].
#[derive(Deserialize)]
struct SiteFields {
    longitude: f64,
    latitude: f64,
    altitude: f64,
}

impl TryFrom<SiteFields> for SiteLocation {
    type Error = SolarCalcError;

    fn try_from(fields: SiteFields) -> Result<Self, Self::Error> {
        SiteLocation::new(fields.longitude, fields.latitude, fields.altitude)
    }
}
