//! Sun position for scene lighting.
//!
//! Two independent pieces:
//! - [`ephemeris`]: where the sun is in the sky for a date and place
//!   (azimuth/altitude, plus solar noon, sunrise and sunset).
//! - [`light`]: where to put the scene's sun light for a given
//!   azimuth/altitude.

pub mod ephemeris;
pub mod light;

pub use ephemeris::{solar_angles, solar_angles_at_millis, sun_times};
pub use light::{angles_to_cartesian, sun_position, SUN_DISTANCE};
