use chrono::{DateTime, Duration, Utc};

use crate::orbit::{locate, OrbitalState, PropagationError};
use crate::track::{GroundTrackPoint, TrackError};

/// `count` evenly spaced sub-satellite points over `[start, start + span]`.
///
/// Nothing is propagated until the track is iterated. The value itself
/// holds no cursor, so [`GroundTrack::iter`] can be called any number of
/// times and always yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct GroundTrack<'a> {
    state: &'a OrbitalState,
    start: DateTime<Utc>,
    span_ns: i64,
    count: usize,
}

pub fn sample_ground_track(
    state: &OrbitalState,
    start: DateTime<Utc>,
    span: Duration,
    count: usize,
) -> Result<GroundTrack<'_>, TrackError> {
    if count < 2 {
        return Err(TrackError::InvalidRequestRange(format!(
            "ground track needs at least 2 points, got {count}"
        )));
    }
    let span_ns = span.num_nanoseconds().ok_or_else(|| {
        TrackError::InvalidRequestRange(format!("span {span} is too long"))
    })?;
    if span_ns <= 0 {
        return Err(TrackError::InvalidRequestRange(format!(
            "span must be positive, got {span}"
        )));
    }
    if (span_ns as u128) < (count as u128 - 1) {
        return Err(TrackError::InvalidRequestRange(format!(
            "span {span} too short for {count} distinct points"
        )));
    }
    if start.checked_add_signed(span).is_none() {
        return Err(TrackError::InvalidRequestRange(
            "track end is out of range".into(),
        ));
    }

    Ok(GroundTrack {
        state,
        start,
        span_ns,
        count,
    })
}

impl<'a> GroundTrack<'a> {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.instant_at(self.count - 1)
    }

    /// Sample instant of point `index`, `None` past the last point. The last
    /// point lands exactly on the end of the span.
    pub fn instant(&self, index: usize) -> Option<DateTime<Utc>> {
        (index < self.count).then(|| self.instant_at(index))
    }

    pub fn point(&self, index: usize) -> Option<Result<GroundTrackPoint, PropagationError>> {
        self.instant(index).map(|at| locate(self.state, at))
    }

    // index < count, so the offset never exceeds span_ns
    fn instant_at(&self, index: usize) -> DateTime<Utc> {
        let offset = self.span_ns as i128 * index as i128 / (self.count as i128 - 1);
        self.start + Duration::nanoseconds(offset as i64)
    }

    pub fn iter(&self) -> GroundTrackIter<'a> {
        GroundTrackIter {
            track: *self,
            next: 0,
        }
    }

    /// Materialize the track, stopping at the first propagation failure.
    pub fn collect_points(&self) -> Result<Vec<GroundTrackPoint>, TrackError> {
        self.iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(TrackError::from)
    }
}

impl<'a> IntoIterator for &GroundTrack<'a> {
    type Item = Result<GroundTrackPoint, PropagationError>;
    type IntoIter = GroundTrackIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct GroundTrackIter<'a> {
    track: GroundTrack<'a>,
    next: usize,
}

impl Iterator for GroundTrackIter<'_> {
    type Item = Result<GroundTrackPoint, PropagationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.track.point(self.next)?;
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.track.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GroundTrackIter<'_> {}
