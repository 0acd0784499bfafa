//! Spherical (Web-Mercator style) projection centred on a configurable point.
//!
//! Longitude maps linearly to x and latitude through the Mercator logarithm to
//! y, both scaled by `tile_size * 2^zoom` per radian. The centre projects to
//! the origin and y grows southward (screen convention).
//!
//! The scene lays footprints out in a plane whose axes are the projection's
//! axes swapped and negated: `(x', y') = (-y, -x)`. Extrusion and the mesh
//! rotation downstream depend on exactly this remap.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use scene_common::{GeoCoordinate, PlanarPoint, ProjectionConfig, SceneError, SceneResult};

/// A projector with a validated configuration and precomputed constants.
///
/// Observably identical to calling [`project`] with the same config; it only
/// skips re-validating and recomputing the centre ordinate on every call.
#[derive(Debug, Clone, Copy)]
pub struct MercatorProjector {
    config: ProjectionConfig,
    /// Scale per radian
    k: f64,
    /// Centre longitude in radians
    lambda_c: f64,
    /// Mercator ordinate of the centre latitude
    y_c: f64,
}

impl MercatorProjector {
    /// Create a projector, validating the configuration.
    pub fn new(config: ProjectionConfig) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            k: config.scale(),
            lambda_c: config.center.lon.to_radians(),
            y_c: mercator_y(config.center.lat.to_radians()),
        })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project a geographic coordinate to the planar system.
    pub fn project(&self, coord: &GeoCoordinate) -> SceneResult<PlanarPoint> {
        coord.validate()?;
        let x = self.k * (coord.lon.to_radians() - self.lambda_c);
        let y = -self.k * (mercator_y(coord.lat.to_radians()) - self.y_c);
        Ok(PlanarPoint::new(x, y))
    }

    /// Project a geographic coordinate and remap it onto the scene plane.
    pub fn project_to_scene(&self, coord: &GeoCoordinate) -> SceneResult<PlanarPoint> {
        self.project(coord).map(to_scene)
    }

    /// Invert [`MercatorProjector::project`].
    pub fn unproject(&self, point: &PlanarPoint) -> SceneResult<GeoCoordinate> {
        if !point.is_finite() {
            return Err(SceneError::InvalidCoordinate(format!(
                "non-finite planar point ({}, {})",
                point.x, point.y
            )));
        }
        let lambda = self.lambda_c + point.x / self.k;
        let y = self.y_c - point.y / self.k;
        let phi = 2.0 * y.exp().atan() - FRAC_PI_2;
        Ok(GeoCoordinate::new(lambda.to_degrees(), phi.to_degrees()))
    }

    /// Invert [`MercatorProjector::project_to_scene`].
    pub fn unproject_from_scene(&self, point: &PlanarPoint) -> SceneResult<GeoCoordinate> {
        self.unproject(&from_scene(*point))
    }
}

/// Mercator ordinate of a latitude given in radians.
fn mercator_y(phi: f64) -> f64 {
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Project a geographic coordinate relative to `config.center`.
///
/// # Errors
/// `LatitudeOutOfDomain` at or beyond the poles, `InvalidCoordinate` for
/// non-finite input or longitude outside [-180, 180], `InvalidConfig` for a
/// bad zoom or tile size.
pub fn project(coord: &GeoCoordinate, config: &ProjectionConfig) -> SceneResult<PlanarPoint> {
    MercatorProjector::new(*config)?.project(coord)
}

/// Project and apply the scene axis remap in one step.
pub fn project_to_scene(
    coord: &GeoCoordinate,
    config: &ProjectionConfig,
) -> SceneResult<PlanarPoint> {
    project(coord, config).map(to_scene)
}

/// Remap projection axes onto the scene ground plane: `(x', y') = (-y, -x)`.
pub fn to_scene(point: PlanarPoint) -> PlanarPoint {
    PlanarPoint::new(-point.y, -point.x)
}

/// Inverse of [`to_scene`]. The remap is its own inverse.
fn from_scene(point: PlanarPoint) -> PlanarPoint {
    to_scene(point)
}

/// Recover the geographic coordinate of a projected point.
pub fn unproject(point: &PlanarPoint, config: &ProjectionConfig) -> SceneResult<GeoCoordinate> {
    MercatorProjector::new(*config)?.unproject(point)
}

/// Recover the geographic coordinate of a scene-plane point.
pub fn unproject_from_scene(
    point: &PlanarPoint,
    config: &ProjectionConfig,
) -> SceneResult<GeoCoordinate> {
    MercatorProjector::new(*config)?.unproject_from_scene(point)
}
