//! WGS-84 ellipsoid and Earth-rotation helpers.

use chrono::{DateTime, Utc};

pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;

const MAX_LATITUDE_ITERATIONS: usize = 10;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-12;

/// Greenwich mean sidereal time (IAU-82) at `at`, radians.
pub fn earth_rotation_angle(at: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()))
}

pub fn inertial_to_fixed(position: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        position[0] * cos_gmst + position[1] * sin_gmst,
        -position[0] * sin_gmst + position[1] * cos_gmst,
        position[2],
    ]
}

/// Velocity relative to the rotating Earth.
pub fn inertial_to_fixed_velocity(position: [f64; 3], velocity: [f64; 3], gmst: f64) -> [f64; 3] {
    let pos = inertial_to_fixed(position, gmst);
    let rotated = inertial_to_fixed(velocity, gmst);
    [
        rotated[0] + EARTH_ROTATION_RAD_S * pos[1],
        rotated[1] - EARTH_ROTATION_RAD_S * pos[0],
        rotated[2],
    ]
}

pub fn geodetic_to_ecef(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> [f64; 3] {
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let n = prime_vertical_radius(sin_lat);
    [
        (n + altitude_km) * cos_lat * lon.cos(),
        (n + altitude_km) * cos_lat * lon.sin(),
        (n * (1.0 - WGS84_E2) + altitude_km) * sin_lat,
    ]
}

/// Returns (latitude deg, longitude deg, altitude km).
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = ecef;
    let p = (x * x + y * y).sqrt();
    let lon = y.atan2(x);

    let mut lat = z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..MAX_LATITUDE_ITERATIONS {
        let sin_lat = lat.sin();
        let n = prime_vertical_radius(sin_lat);
        let next = (z + WGS84_E2 * n * sin_lat).atan2(p);
        let converged = (next - lat).abs() < LATITUDE_TOLERANCE_RAD;
        lat = next;
        if converged {
            break;
        }
    }

    // Well conditioned at the poles, unlike p / cos(lat) - N.
    let sin_lat = lat.sin();
    let alt = p * lat.cos() + z * sin_lat
        - WGS84_A_KM * (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    (lat.to_degrees(), normalize_longitude(lon.to_degrees()), alt)
}

/// Wrap into [-180, 180).
pub fn normalize_longitude(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}
