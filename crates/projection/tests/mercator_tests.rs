//! Tests for the Mercator projector and the scene axis remap.

use projection::{project, project_to_scene, unproject, unproject_from_scene, MercatorProjector};
use scene_common::{GeoCoordinate, ProjectionConfig, SceneError};
use test_utils::fixtures::{footprints, places};
use test_utils::{assert_approx_eq, assert_coords_approx_eq, create_regular_footprint};

fn coord((lon, lat): (f64, f64)) -> GeoCoordinate {
    GeoCoordinate::new(lon, lat)
}

fn london_config() -> ProjectionConfig {
    ProjectionConfig::default().with_center(coord(places::LONDON))
}

// ============================================================================
// Centre and finiteness
// ============================================================================

#[test]
fn test_london_centre_maps_to_origin() {
    let p = project_to_scene(&coord(places::LONDON), &london_config()).unwrap();
    assert_coords_approx_eq!((p.x, p.y), (0.0, 0.0), 0.0);
}

#[test]
fn test_any_centre_maps_to_origin() {
    for (lon, lat) in [(0.0, 0.0), (151.2, -33.9), (-179.9, 84.9), (18.95, 69.65)] {
        let c = GeoCoordinate::new(lon, lat);
        let config = ProjectionConfig::new(c, 15, 128);
        let p = project(&c, &config).unwrap();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
    }
}

#[test]
fn test_finite_inside_practical_bound() {
    let config = ProjectionConfig::new(coord(places::NULL_ISLAND), 15, 128);
    let mut lat = -84.9;
    while lat < 85.0 {
        let mut lon = -180.0;
        while lon <= 180.0 {
            let p = project(&GeoCoordinate::new(lon, lat), &config).unwrap();
            assert!(p.is_finite(), "non-finite at ({}, {})", lon, lat);
            lon += 15.0;
        }
        lat += 5.0;
    }
}

#[test]
fn test_practical_mercator_bound_is_square() {
    // At the web-map latitude limit the world is as tall as it is wide.
    let config = ProjectionConfig::new(coord(places::NULL_ISLAND), 0, 128);
    let east = project(&GeoCoordinate::new(180.0, 0.0), &config).unwrap();
    let north = project(&GeoCoordinate::new(0.0, places::MAX_MERCATOR_LAT), &config).unwrap();
    assert_approx_eq!(east.x, -north.y, 1e-6);
}

// ============================================================================
// Domain errors
// ============================================================================

#[test]
fn test_poles_fail_with_domain_error() {
    let config = london_config();
    for lat in [90.0, -90.0, 90.5, -120.0] {
        match project(&GeoCoordinate::new(0.0, lat), &config) {
            Err(SceneError::LatitudeOutOfDomain(l)) => assert_eq!(l, lat),
            other => panic!("expected domain error for lat {}, got {:?}", lat, other),
        }
    }
}

#[test]
fn test_bad_centre_fails() {
    let config = ProjectionConfig::default().with_center(GeoCoordinate::new(0.0, 90.0));
    let err = project(&coord(places::LONDON), &config).unwrap_err();
    assert!(err.is_domain_error());
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_roundtrip_recovers_coordinates() {
    let config = london_config();
    let ring = create_regular_footprint(places::LONDON, 0.01, 12);
    for (lon, lat) in ring {
        let c = GeoCoordinate::new(lon, lat);
        let p = project(&c, &config).unwrap();
        let back = unproject(&p, &config).unwrap();
        assert_coords_approx_eq!((back.lon, back.lat), (lon, lat), 1e-6);
    }
}

#[test]
fn test_roundtrip_far_from_centre() {
    let config = ProjectionConfig::new(coord(places::LONDON), 3, 256);
    for (lon, lat) in [(151.2093, -33.8688), (-120.0, 80.0), (179.9, -84.0)] {
        let p = project(&GeoCoordinate::new(lon, lat), &config).unwrap();
        let back = unproject(&p, &config).unwrap();
        assert_coords_approx_eq!((back.lon, back.lat), (lon, lat), 1e-6);
    }
}

#[test]
fn test_scene_roundtrip() {
    let config = london_config();
    let projector = MercatorProjector::new(config).unwrap();
    for (lon, lat) in footprints::CORNER_L {
        let c = GeoCoordinate::new(lon, lat);
        let s = projector.project_to_scene(&c).unwrap();
        let back = unproject_from_scene(&s, &config).unwrap();
        assert_coords_approx_eq!((back.lon, back.lat), (lon, lat), 1e-6);
    }
}

#[test]
fn test_unproject_rejects_non_finite() {
    let config = london_config();
    let p = scene_common::PlanarPoint::new(f64::NAN, 0.0);
    assert!(unproject(&p, &config).is_err());
}

// ============================================================================
// Scene axis remap
// ============================================================================

#[test]
fn test_scene_axes() {
    let config = london_config();
    let (lon, lat) = places::LONDON;

    // North of the centre: projection y < 0, scene x = -y > 0
    let north = project_to_scene(&GeoCoordinate::new(lon, lat + 0.001), &config).unwrap();
    assert!(north.x > 0.0);
    assert_approx_eq!(north.y, 0.0, 1e-9);

    // East of the centre: projection x > 0, scene y = -x < 0
    let east = project_to_scene(&GeoCoordinate::new(lon + 0.001, lat), &config).unwrap();
    assert!(east.y < 0.0);
    assert_approx_eq!(east.x, 0.0, 1e-9);
}

#[test]
fn test_building_scale_at_default_zoom() {
    // 0.0006° of longitude at zoom 15, tile 128 is about 44 units wide.
    let config = london_config();
    let [a, b, ..] = footprints::TERRACE;
    let pa = project(&coord(a), &config).unwrap();
    let pb = project(&coord(b), &config).unwrap();
    assert_approx_eq!(pa.distance(&pb), 4_194_304.0 * 0.0006f64.to_radians(), 1e-6);
}
