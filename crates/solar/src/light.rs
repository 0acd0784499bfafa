//! Placement of the scene's sun light.

use chrono::{DateTime, Utc};
use scene_common::{CartesianPosition, GeoCoordinate, SceneResult, SolarAngles};

use crate::ephemeris::solar_angles;

/// Distance from the origin at which the sun light is placed.
pub const SUN_DISTANCE: f64 = 300.0;

/// Convert sun azimuth/altitude into a light position `distance` away.
///
/// ```text
/// h = distance * cos(altitude)
/// y = h * tan(altitude)
/// x = -h * tan(azimuth)
/// z = h * cos(azimuth)
/// ```
///
/// This is not a spherical-to-Cartesian transform: the horizontal terms mix
/// `tan` and `cos` of the azimuth, so the result is not at a fixed radius.
/// The visual result of the scene is tuned to exactly this mapping. At
/// altitude 0 the light sits on the ground plane (`y == 0`).
///
/// Never fails; NaN propagates.
pub fn angles_to_cartesian(angles: &SolarAngles, distance: f64) -> CartesianPosition {
    let h = distance * angles.altitude.cos();
    let y = h * angles.altitude.tan();
    let x = -h * angles.azimuth.tan();
    let z = h * angles.azimuth.cos();
    CartesianPosition::new(x, y, z)
}

/// Light position for the sun at `timestamp` over `location`.
pub fn sun_position(
    timestamp: &DateTime<Utc>,
    location: &GeoCoordinate,
    distance: f64,
) -> SceneResult<CartesianPosition> {
    let angles = solar_angles(timestamp, location)?;
    Ok(angles_to_cartesian(&angles, distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_horizon_light_on_ground() {
        for azimuth in [-1.2, -0.5, 0.0, 0.3, 1.0] {
            let pos = angles_to_cartesian(&SolarAngles::new(azimuth, 0.0), SUN_DISTANCE);
            assert_eq!(pos.y, 0.0);
        }
    }

    #[test]
    fn test_due_south() {
        let pos = angles_to_cartesian(&SolarAngles::new(0.0, FRAC_PI_4), 300.0);
        let h = 300.0 * FRAC_PI_4.cos();
        assert_eq!(pos.x, 0.0);
        assert!((pos.y - h).abs() < 1e-9); // tan(45°) == 1
        assert!((pos.z - h).abs() < 1e-12);
    }

    #[test]
    fn test_west_is_negative_x() {
        let pos = angles_to_cartesian(&SolarAngles::new(0.5, 0.3), SUN_DISTANCE);
        assert!(pos.x < 0.0);
        let pos = angles_to_cartesian(&SolarAngles::new(-0.5, 0.3), SUN_DISTANCE);
        assert!(pos.x > 0.0);
    }

    #[test]
    fn test_formula_is_not_normalised() {
        // The light does not stay on a sphere of radius `distance`.
        let pos = angles_to_cartesian(&SolarAngles::new(1.0, 0.2), 300.0);
        let radius = (pos.x * pos.x + pos.y * pos.y + pos.z * pos.z).sqrt();
        assert!((radius - 300.0).abs() > 1.0);

        let h = 300.0 * 0.2f64.cos();
        assert!((pos.x + h * 1.0f64.tan()).abs() < 1e-9);
        assert!((pos.z - h * 1.0f64.cos()).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let pos = angles_to_cartesian(&SolarAngles::new(f64::NAN, 0.3), SUN_DISTANCE);
        assert!(pos.x.is_nan());
        assert!(pos.z.is_nan());
        assert!(!pos.y.is_nan());
    }
}
