//! Solar position value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sun position as seen from a point on the ground.
///
/// Azimuth is measured from due south, increasing westward; altitude from the
/// horizon (0) up to the zenith (π/2). Both in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SolarAngles {
    pub azimuth: f64,
    pub altitude: f64,
}

impl SolarAngles {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self { azimuth, altitude }
    }

    /// True when the sun is above the horizon.
    pub fn is_daylight(&self) -> bool {
        self.altitude > 0.0
    }

    /// Azimuth converted to the compass convention (degrees from north,
    /// clockwise), for display.
    pub fn compass_azimuth_deg(&self) -> f64 {
        (self.azimuth.to_degrees() + 180.0).rem_euclid(360.0)
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude.to_degrees()
    }
}

/// Sun events of a single day at a given location.
///
/// Sunrise and sunset are `None` when the sun never crosses the horizon
/// (polar day or polar night).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub solar_noon: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

impl SunTimes {
    /// Length of daylight, if the sun rises and sets on this day.
    pub fn day_length(&self) -> Option<chrono::Duration> {
        match (self.sunrise, self.sunset) {
            (Some(rise), Some(set)) => Some(set - rise),
            _ => None,
        }
    }
}
