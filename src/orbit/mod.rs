mod error;
pub mod geodesy;
mod propagation;
mod types;

pub use error::PropagationError;
pub use propagation::{locate, propagate, to_geodetic};
pub use types::{GeodeticPosition, OrbitalState, StateVector};

#[cfg(test)]
pub(crate) mod fixtures {
    /// ISS (ZARYA), epoch 2020-07-12.
    pub const ISS_NAME: &str = "ISS (ZARYA)";
    pub const ISS_LINE1: &str =
        "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    pub const ISS_LINE2: &str =
        "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    /// Vanguard 1, the first SGP4 verification case.
    pub const VANGUARD_LINE1: &str =
        "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
    pub const VANGUARD_LINE2: &str =
        "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

    /// Synthetic circular orbit, no drag.
    pub const CIRCULAR_LINE1: &str =
        "1 99999U 24001A   24001.00000000  .00000000  00000-0  00000-0 0  9999";
    pub const CIRCULAR_LINE2: &str =
        "2 99999  51.6000  10.0000 0000000   0.0000   0.0000 15.50000000    12";

    /// Zero mean motion.
    pub const STALLED_LINE1: &str =
        "1 99998U 24001B   24001.00000000  .00000000  00000-0  00000-0 0  9998";
    pub const STALLED_LINE2: &str =
        "2 99998  51.6000  10.0000 0000000   0.0000   0.0000  0.00000000    10";

    /// Very low perigee with heavy drag, re-enters within hours of epoch.
    pub const DECAYING_LINE1: &str =
        "1 28872U 05037B   05333.02012661  .25992681  00000-0  24476-3 0  1534";
    pub const DECAYING_LINE2: &str =
        "2 28872  96.4736 157.9986 0103669  74.0924 287.1985 16.05229931  1201";

    pub fn iss() -> super::OrbitalState {
        super::OrbitalState::from_tle(Some(ISS_NAME.to_string()), ISS_LINE1, ISS_LINE2)
            .expect("ISS fixture parses")
    }

    pub fn circular() -> super::OrbitalState {
        super::OrbitalState::from_tle(None, CIRCULAR_LINE1, CIRCULAR_LINE2)
            .expect("circular fixture parses")
    }

    pub fn decaying() -> super::OrbitalState {
        super::OrbitalState::from_tle(None, DECAYING_LINE1, DECAYING_LINE2)
            .expect("decaying fixture parses")
    }
}
