use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orbit::geodesy::geodetic_to_ecef;
use crate::track::TrackError;

/// A sea-level point on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TrackError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TrackError::InvalidRequestRange(format!(
                "observer latitude {latitude} outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TrackError::InvalidRequestRange(format!(
                "observer longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse `"lat,lon"`.
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let (lat, lon) = coordinates.split_once(',')?;
        let lat = lat.trim().parse().ok()?;
        let lon = lon.trim().parse().ok()?;
        Self::new(lat, lon).ok()
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        geodetic_to_ecef(self.latitude, self.longitude, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        let obs = ObserverLocation::from_coordinates(" 40.7128, -74.0060 ").unwrap();
        assert_eq!(obs.latitude, 40.7128);
        assert_eq!(obs.longitude, -74.0060);
        assert!(ObserverLocation::from_coordinates("40.7").is_none());
        assert!(ObserverLocation::from_coordinates("north,west").is_none());
        assert!(ObserverLocation::from_coordinates("91,0").is_none());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            ObserverLocation::new(0.0, 181.0),
            Err(TrackError::InvalidRequestRange(_))
        ));
        assert!(ObserverLocation::new(f64::NAN, 0.0).is_err());
        assert!(ObserverLocation::new(-90.0, 180.0).is_ok());
    }
}
