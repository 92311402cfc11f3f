use chrono::{DateTime, Utc};

use crate::orbit::geodesy::{
    earth_rotation_angle, inertial_to_fixed, inertial_to_fixed_velocity, norm,
};
use crate::orbit::{propagate, OrbitalState, PropagationError};
use crate::track::{LookSample, ObserverLocation};

/// Elevation, azimuth and range of `state` seen from `observer` at `at`.
pub fn look_angles(
    observer: &ObserverLocation,
    state: &OrbitalState,
    at: DateTime<Utc>,
) -> Result<LookSample, PropagationError> {
    let vector = propagate(state, at)?;
    let gmst = earth_rotation_angle(at);
    let sat_ecef = inertial_to_fixed(vector.position_km, gmst);
    let sat_vel_ecef = inertial_to_fixed_velocity(vector.position_km, vector.velocity_km_s, gmst);
    Ok(look_angles_from_fixed(observer, sat_ecef, sat_vel_ecef, at))
}

/// Topocentric view of an Earth-fixed position and velocity. The observer is
/// at rest in the Earth-fixed frame.
pub fn look_angles_from_fixed(
    observer: &ObserverLocation,
    sat_ecef: [f64; 3],
    sat_vel_ecef: [f64; 3],
    at: DateTime<Utc>,
) -> LookSample {
    let sta_ecef = observer.position_ecef_km();
    let dr = [
        sat_ecef[0] - sta_ecef[0],
        sat_ecef[1] - sta_ecef[1],
        sat_ecef[2] - sta_ecef[2],
    ];
    let range = norm(dr);

    let (east, north, up) = ecef_to_enu(dr, observer.lat_rad(), observer.lon_rad());
    let azimuth = east.atan2(north).to_degrees().rem_euclid(360.0);
    let elevation = if range > 0.0 {
        (up / range).clamp(-1.0, 1.0).asin().to_degrees()
    } else {
        90.0
    };
    let range_rate = if range > 0.0 {
        (sat_vel_ecef[0] * dr[0] + sat_vel_ecef[1] * dr[1] + sat_vel_ecef[2] * dr[2]) / range
    } else {
        0.0
    };

    LookSample {
        time: at,
        elevation,
        azimuth,
        range,
        range_rate,
    }
}

fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}
