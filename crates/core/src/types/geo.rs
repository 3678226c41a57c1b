//! Geographic coordinates for event locations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors that can occur when building [`Coordinates`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinatesError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude must be between -90 and 90, got {0}")]
    Latitude(f64),
    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude must be between -180 and 180, got {0}")]
    Longitude(f64),
    /// Input is not of the form `LAT,LON`.
    #[error("expected coordinates as LAT,LON, got {0:?}")]
    Format(String),
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of Greenwich.
    pub longitude: f64,
}

impl Coordinates {
    /// Where the map opens when nothing else is known (central London).
    pub const DEFAULT_CENTER: Self = Self {
        latitude: 51.505,
        longitude: -0.09,
    };

    /// Create validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::DEFAULT_CENTER
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || CoordinatesError::Format(s.to_owned());
        let (lat, lon) = s.split_once(',').ok_or_else(format_err)?;
        let lat: f64 = lat.trim().parse().map_err(|_| format_err())?;
        let lon: f64 = lon.trim().parse().map_err(|_| format_err())?;
        Self::new(lat, lon)
    }
}
