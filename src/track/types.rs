use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::orbit::GeodeticPosition;

pub type GroundTrackPoint = GeodeticPosition;

/// Topocentric view of a satellite from an observer at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LookSample {
    pub time: DateTime<Utc>,
    /// Degrees above the local horizon
    pub elevation: f64,
    /// Degrees clockwise from north, 0..360
    pub azimuth: f64,
    /// Kilometers
    pub range: f64,
    /// km/s, positive when receding
    pub range_rate: f64,
}

/// A maximal run of consecutive visible samples.
///
/// `start` and `end` are the first and last visible sample instants, not the
/// interpolated horizon crossings.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Pass {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_seconds: i64,
    pub peak_time: DateTime<Utc>,
    pub peak_elevation: f64,
    pub peak_azimuth: f64,
    pub peak_range: f64,
    pub samples: Vec<LookSample>,
}

impl Pass {
    pub(crate) fn from_samples(samples: Vec<LookSample>) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;
        let peak = samples
            .iter()
            .copied()
            .fold(*first, |best, s| if s.elevation > best.elevation { s } else { best });

        Some(Pass {
            start: first.time,
            end: last.time,
            duration_seconds: (last.time - first.time).num_seconds(),
            peak_time: peak.time,
            peak_elevation: peak.elevation,
            peak_azimuth: peak.azimuth,
            peak_range: peak.range,
            samples,
        })
    }
}
