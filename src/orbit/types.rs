use chrono::{DateTime, Utc};
use serde::Serialize;
use sgp4::{Constants, Elements};
use std::fmt;
use utoipa::ToSchema;

use super::error::PropagationError;

/// Mean orbital elements of one catalogued satellite, with the propagator
/// constants derived from them.
///
/// Built once when the catalog is loaded and never mutated afterwards, so a
/// shared reference can be propagated from any number of threads.
pub struct OrbitalState {
    name: String,
    elements: Elements,
    constants: Constants,
}

impl OrbitalState {
    /// Parse a two-line element set. `name` is the optional title line.
    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, PropagationError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| PropagationError::MalformedElementSet(e.to_string()))?;
        Self::from_elements(elements)
    }

    pub fn from_elements(elements: Elements) -> Result<Self, PropagationError> {
        validate_elements(&elements)?;

        let constants = Constants::from_elements(&elements)
            .map_err(|e| PropagationError::MalformedElementSet(e.to_string()))?;

        let name = elements
            .object_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        Ok(Self {
            name,
            elements,
            constants,
        })
    }

    /// NORAD catalog number; the stable key of a satellite.
    pub fn catalog_id(&self) -> u64 {
        self.elements.norad_id
    }

    /// Display name. Not unique across the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }

    /// Revolutions per day.
    pub fn mean_motion(&self) -> f64 {
        self.elements.mean_motion
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    pub fn inclination_deg(&self) -> f64 {
        self.elements.inclination
    }

    pub fn right_ascension_deg(&self) -> f64 {
        self.elements.right_ascension
    }

    pub fn argument_of_perigee_deg(&self) -> f64 {
        self.elements.argument_of_perigee
    }

    pub fn mean_anomaly_deg(&self) -> f64 {
        self.elements.mean_anomaly
    }

    /// Nominal orbital period in minutes.
    pub fn period_minutes(&self) -> f64 {
        1440.0 / self.elements.mean_motion
    }

    pub(crate) fn constants(&self) -> &Constants {
        &self.constants
    }
}

impl fmt::Debug for OrbitalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrbitalState")
            .field("catalog_id", &self.catalog_id())
            .field("name", &self.name)
            .field("epoch", &self.epoch())
            .field("mean_motion", &self.elements.mean_motion)
            .field("eccentricity", &self.elements.eccentricity)
            .field("inclination", &self.elements.inclination)
            .finish_non_exhaustive()
    }
}

fn validate_elements(elements: &Elements) -> Result<(), PropagationError> {
    if !elements.mean_motion.is_finite() || elements.mean_motion <= 0.0 {
        return Err(PropagationError::MalformedElementSet(format!(
            "mean motion must be positive, got {} rev/day",
            elements.mean_motion
        )));
    }
    if !(0.0..1.0).contains(&elements.eccentricity) {
        return Err(PropagationError::MalformedElementSet(format!(
            "eccentricity must be in [0, 1), got {}",
            elements.eccentricity
        )));
    }
    if !(0.0..=180.0).contains(&elements.inclination) {
        return Err(PropagationError::MalformedElementSet(format!(
            "inclination must be in [0, 180] deg, got {}",
            elements.inclination
        )));
    }
    Ok(())
}

/// Position and velocity in the TEME inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

impl StateVector {
    pub fn speed_km_s(&self) -> f64 {
        let v = self.velocity_km_s;
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }
}

/// Sub-satellite point on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticPosition {
    /// Degrees, -90..90
    pub latitude: f64,
    /// Degrees, -180..180
    pub longitude: f64,
    /// Kilometers above the ellipsoid
    pub altitude: f64,
    /// Inertial speed, km/s
    pub speed: f64,
    pub timestamp: DateTime<Utc>,
}
