use chrono::{DateTime, Utc};
use sgp4::MinutesSinceEpoch;

use super::error::PropagationError;
use super::geodesy::{earth_rotation_angle, ecef_to_geodetic, inertial_to_fixed};
use super::types::{GeodeticPosition, OrbitalState, StateVector};

/// Propagate `state` to `at` with SGP4/SDP4. `at` may lie on either side of
/// the element set epoch.
pub fn propagate(state: &OrbitalState, at: DateTime<Utc>) -> Result<StateVector, PropagationError> {
    let minutes = minutes_since_epoch(state, at);

    let prediction = state
        .constants()
        .propagate(MinutesSinceEpoch(minutes))
        .map_err(|e| PropagationError::OrbitDecayed {
            minutes_since_epoch: minutes,
            reason: e.to_string(),
        })?;

    // Geodetic altitude does not depend on longitude, so the inertial
    // position can be tested against the ellipsoid directly.
    let (_, _, altitude_km) = ecef_to_geodetic(prediction.position);
    if altitude_km < 0.0 {
        return Err(PropagationError::OrbitDecayed {
            minutes_since_epoch: minutes,
            reason: format!("position {:.1} km below the ellipsoid", -altitude_km),
        });
    }

    Ok(StateVector {
        position_km: prediction.position,
        velocity_km_s: prediction.velocity,
    })
}

/// Rotate an inertial state into the Earth-fixed frame at `at` and project it
/// onto the WGS-84 ellipsoid.
pub fn to_geodetic(vector: &StateVector, at: DateTime<Utc>) -> GeodeticPosition {
    let fixed = inertial_to_fixed(vector.position_km, earth_rotation_angle(at));
    let (latitude, longitude, altitude) = ecef_to_geodetic(fixed);

    GeodeticPosition {
        latitude,
        longitude,
        altitude,
        speed: vector.speed_km_s(),
        timestamp: at,
    }
}

pub fn locate(state: &OrbitalState, at: DateTime<Utc>) -> Result<GeodeticPosition, PropagationError> {
    let vector = propagate(state, at)?;
    Ok(to_geodetic(&vector, at))
}

fn minutes_since_epoch(state: &OrbitalState, at: DateTime<Utc>) -> f64 {
    let delta = at - state.epoch();
    match delta.num_microseconds() {
        Some(us) => us as f64 / 60_000_000.0,
        None => delta.num_milliseconds() as f64 / 60_000.0,
    }
}
