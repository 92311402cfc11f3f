mod error;
mod ground_track;
mod look_angles;
mod observer;
mod pass_finder;
mod types;

pub use error::TrackError;
pub use ground_track::{sample_ground_track, GroundTrack};
pub use look_angles::look_angles;
pub use observer::ObserverLocation;
pub use pass_finder::{find_passes, DEFAULT_MIN_ELEVATION_DEG, DEFAULT_STEP};
pub use types::{GroundTrackPoint, LookSample, Pass};
