use chrono::{DateTime, Duration, Utc};

use crate::orbit::OrbitalState;
use crate::track::{look_angles, LookSample, ObserverLocation, Pass, TrackError};

pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 10.0;
/// Brief low passes that fall between two samples are missed.
pub const DEFAULT_STEP: Duration = Duration::hours(2);

/// Find visibility windows of `state` from `observer` by fixed-step sampling.
///
/// Samples `start, start + step, ...` up to `start + horizon`, always
/// including `start + horizon` itself. Every maximal run of samples with
/// elevation >= `min_elevation_deg` is one [`Pass`]. A propagation failure
/// at any instant aborts the whole search.
pub fn find_passes(
    state: &OrbitalState,
    observer: &ObserverLocation,
    start: DateTime<Utc>,
    horizon: Duration,
    step: Duration,
    min_elevation_deg: f64,
) -> Result<Vec<Pass>, TrackError> {
    if horizon <= Duration::zero() {
        return Err(TrackError::InvalidRequestRange(format!(
            "horizon must be positive, got {horizon}"
        )));
    }
    if step <= Duration::zero() {
        return Err(TrackError::InvalidRequestRange(format!(
            "step must be positive, got {step}"
        )));
    }
    if !min_elevation_deg.is_finite() || !(-90.0..=90.0).contains(&min_elevation_deg) {
        return Err(TrackError::InvalidRequestRange(format!(
            "minimum elevation {min_elevation_deg} outside [-90, 90]"
        )));
    }
    let end = start
        .checked_add_signed(horizon)
        .ok_or_else(|| TrackError::InvalidRequestRange("horizon end is out of range".into()))?;

    let mut passes = Vec::new();
    let mut current: Vec<LookSample> = Vec::new();

    for at in sample_instants(start, end, step) {
        let sample = look_angles(observer, state, at)?;

        if sample.elevation >= min_elevation_deg {
            current.push(sample);
        } else if !current.is_empty() {
            passes.extend(Pass::from_samples(std::mem::take(&mut current)));
        }
    }
    passes.extend(Pass::from_samples(current));

    log::debug!(
        "{} pass(es) of {} over {} from ({:.4}, {:.4})",
        passes.len(),
        state.name(),
        horizon,
        observer.latitude,
        observer.longitude
    );

    Ok(passes)
}

fn sample_instants(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
) -> impl Iterator<Item = DateTime<Utc>> {
    let mut cursor = Some(start);
    std::iter::from_fn(move || {
        let at = cursor?;
        cursor = match at.checked_add_signed(step) {
            Some(next) if next <= end => Some(next),
            _ if at < end => Some(end),
            _ => None,
        };
        Some(at)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::fixtures;
    use crate::orbit::PropagationError;

    fn new_york() -> ObserverLocation {
        ObserverLocation::new(40.7128, -74.0060).unwrap()
    }

    #[test]
    fn sample_instants_include_both_ends() {
        let start = fixtures::iss().epoch();
        let end = start + Duration::minutes(25);
        let instants: Vec<_> = sample_instants(start, end, Duration::minutes(10)).collect();
        assert_eq!(
            instants,
            vec![
                start,
                start + Duration::minutes(10),
                start + Duration::minutes(20),
                end
            ]
        );

        let aligned: Vec<_> =
            sample_instants(start, start + Duration::minutes(20), Duration::minutes(10)).collect();
        assert_eq!(aligned.len(), 3);
    }

    #[test]
    fn zenith_threshold_finds_nothing() {
        let state = fixtures::iss();
        let passes = find_passes(
            &state,
            &new_york(),
            state.epoch(),
            Duration::days(3),
            Duration::minutes(1),
            90.0,
        )
        .unwrap();
        assert!(passes.is_empty());
    }

    #[test]
    fn nadir_threshold_is_one_pass_over_whole_horizon() {
        let state = fixtures::iss();
        let start = state.epoch();
        let horizon = Duration::days(1) + Duration::minutes(7);
        let passes = find_passes(
            &state,
            &new_york(),
            start,
            horizon,
            Duration::hours(2),
            -90.0,
        )
        .unwrap();

        assert_eq!(passes.len(), 1);
        let pass = &passes[0];
        assert_eq!(pass.start, start);
        assert_eq!(pass.end, start + horizon);
        assert_eq!(pass.duration_seconds, horizon.num_seconds());
        assert_eq!(pass.samples.len(), 14);
    }

    #[test]
    fn new_york_three_day_overview() {
        let state = fixtures::iss();
        let run = || {
            find_passes(
                &state,
                &new_york(),
                state.epoch(),
                Duration::days(3),
                DEFAULT_STEP,
                DEFAULT_MIN_ELEVATION_DEG,
            )
            .unwrap()
        };
        let first = run();
        assert_eq!(first, run());

        // Of the 37 two-hourly samples only epoch + 28h clears 10 degrees
        // (about 13.6 degrees, ~1300 km away). The next best is under 8.
        assert_eq!(first.len(), 1);
        let pass = &first[0];
        assert_eq!(pass.start, state.epoch() + Duration::hours(28));
        assert_eq!(pass.end, pass.start);
        assert_eq!(pass.duration_seconds, 0);
        assert_eq!(pass.samples.len(), 1);
        assert!(pass.peak_elevation >= DEFAULT_MIN_ELEVATION_DEG);
        assert!(pass.peak_elevation < 20.0, "{}", pass.peak_elevation);
        assert!((0.0..360.0).contains(&pass.peak_azimuth));
        assert!(pass.peak_range > 1000.0 && pass.peak_range < 1700.0);
    }

    #[test]
    fn fine_step_finds_real_passes() {
        let state = fixtures::iss();
        let start = state.epoch();
        let passes = find_passes(
            &state,
            &new_york(),
            start,
            Duration::days(1),
            Duration::seconds(30),
            DEFAULT_MIN_ELEVATION_DEG,
        )
        .unwrap();

        // The ISS rises above 10 degrees over New York a few times per day.
        assert!(!passes.is_empty());
        for pair in passes.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
        for pass in &passes {
            assert!(pass.duration_seconds < 15 * 60, "{}", pass.duration_seconds);
            let consecutive = pass
                .samples
                .windows(2)
                .all(|w| w[1].time - w[0].time == Duration::seconds(30));
            assert!(consecutive);
        }
    }

    #[test]
    fn rejects_bad_ranges() {
        let state = fixtures::iss();
        let obs = new_york();
        let start = state.epoch();
        let cases = [
            (Duration::zero(), Duration::hours(1), 10.0),
            (Duration::days(1), Duration::zero(), 10.0),
            (Duration::days(1), Duration::hours(-1), 10.0),
            (Duration::days(1), Duration::hours(1), 91.0),
            (Duration::days(1), Duration::hours(1), f64::NAN),
        ];
        for (horizon, step, min_el) in cases {
            assert!(matches!(
                find_passes(&state, &obs, start, horizon, step, min_el),
                Err(TrackError::InvalidRequestRange(_))
            ));
        }
    }

    #[test]
    fn decay_aborts_search() {
        let state = fixtures::decaying();
        let result = find_passes(
            &state,
            &new_york(),
            state.epoch(),
            Duration::days(1),
            Duration::minutes(10),
            -90.0,
        );
        assert!(matches!(
            result,
            Err(TrackError::Propagation(PropagationError::OrbitDecayed { .. }))
        ));
    }
}
