//! Building footprints from GeoJSON.
//!
//! Polygon features contribute their outer ring; MultiPolygon features one
//! building per member polygon. Other geometries are skipped.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use scene::BuildingRecord;
use scene_common::{GeoBounds, GeoCoordinate};

/// Read a GeoJSON FeatureCollection of building footprints.
pub fn load_buildings(path: &Path) -> Result<Vec<BuildingRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read buildings file: {}", path.display()))?;

    let records = parse_buildings(&content)
        .with_context(|| format!("Failed to parse buildings file: {}", path.display()))?;

    info!(path = %path.display(), count = records.len(), "Loaded building footprints");
    Ok(records)
}

/// Parse a GeoJSON FeatureCollection.
pub fn parse_buildings(geojson: &str) -> Result<Vec<BuildingRecord>> {
    let root: Value = serde_json::from_str(geojson)?;

    let features = match root.get("features").and_then(Value::as_array) {
        Some(features) => features,
        None => bail!("expected a FeatureCollection with a `features` array"),
    };

    let mut records = Vec::new();
    for (index, feature) in features.iter().enumerate() {
        let properties = feature.get("properties").unwrap_or(&Value::Null);
        let levels = levels(properties);
        let landmark = is_landmark(properties);

        let Some(geometry) = feature.get("geometry") else {
            debug!(index, "Skipping feature without geometry");
            continue;
        };

        let rings = match geometry.get("type").and_then(Value::as_str) {
            Some("Polygon") => vec![outer_ring(geometry.get("coordinates"))],
            Some("MultiPolygon") => geometry
                .get("coordinates")
                .and_then(Value::as_array)
                .map(|polygons| polygons.iter().map(|p| outer_ring(Some(p))).collect())
                .unwrap_or_default(),
            other => {
                debug!(index, geometry = ?other, "Skipping non-polygon feature");
                continue;
            }
        };

        for ring in rings {
            match ring {
                Some(footprint) => {
                    records.push(BuildingRecord::new(footprint, levels).landmark(landmark))
                }
                None => warn!(index, "Skipping feature with malformed coordinates"),
            }
        }
    }

    Ok(records)
}

/// Geographic extent of every footprint.
pub fn bounds(records: &[BuildingRecord]) -> Option<GeoBounds> {
    GeoBounds::from_coordinates(records.iter().flat_map(|r| r.footprint.iter()))
}

fn outer_ring(polygon: Option<&Value>) -> Option<Vec<GeoCoordinate>> {
    polygon?
        .as_array()?
        .first()?
        .as_array()?
        .iter()
        .map(|position| {
            let position = position.as_array()?;
            let lon = position.first()?.as_f64()?;
            let lat = position.get(1)?.as_f64()?;
            Some(GeoCoordinate::new(lon, lat))
        })
        .collect()
}

/// Storey count from `building:levels` or `levels`, as a number or a
/// numeric string, rounded and at least 1. Defaults to 1.
fn levels(properties: &Value) -> u32 {
    ["building:levels", "levels"]
        .iter()
        .filter_map(|key| properties.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|levels| levels.is_finite() && *levels >= 0.0)
        .map(|levels| levels.round().max(1.0) as u32)
        .unwrap_or(1)
}

fn is_landmark(properties: &Value) -> bool {
    let is_pub = properties.get("amenity").and_then(Value::as_str) == Some("pub");
    let flagged = match properties.get("landmark") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => matches!(s.as_str(), "yes" | "true"),
        _ => false,
    };
    is_pub || flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{assert_approx_eq, require_test_file};

    fn feature(properties: &str, geometry: &str) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{{"type": "Feature", "properties": {}, "geometry": {}}}]}}"#,
            properties, geometry
        )
    }

    const SQUARE: &str = r#"{"type": "Polygon", "coordinates": [[[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]]]}"#;

    #[test]
    fn test_polygon_outer_ring() {
        let geometry = r#"{"type": "Polygon", "coordinates": [
            [[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]],
            [[0.2, 0.2], [0.4, 0.2], [0.4, 0.4], [0.2, 0.2]]
        ]}"#;
        let records = parse_buildings(&feature("{}", geometry)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].footprint.len(), 5);
        assert_eq!(records[0].levels, 1);
        assert!(!records[0].landmark);
    }

    #[test]
    fn test_levels_variants() {
        for (properties, expected) in [
            (r#"{"building:levels": "4"}"#, 4),
            (r#"{"building:levels": 7}"#, 7),
            (r#"{"levels": 2}"#, 2),
            (r#"{"building:levels": "2.6"}"#, 3),
            (r#"{"building:levels": "0.3"}"#, 1),
            (r#"{"levels": 0}"#, 1),
            (r#"{"building:levels": "many"}"#, 1),
            (r#"{"building:levels": "many", "levels": 5}"#, 5),
            (r#"null"#, 1),
        ] {
            let records = parse_buildings(&feature(properties, SQUARE)).unwrap();
            assert_eq!(records[0].levels, expected, "properties {}", properties);
        }
    }

    #[test]
    fn test_landmark_detection() {
        for (properties, expected) in [
            (r#"{"amenity": "pub"}"#, true),
            (r#"{"amenity": "cafe"}"#, false),
            (r#"{"landmark": true}"#, true),
            (r#"{"landmark": "yes"}"#, true),
            (r#"{"landmark": false}"#, false),
        ] {
            let records = parse_buildings(&feature(properties, SQUARE)).unwrap();
            assert_eq!(records[0].landmark, expected, "properties {}", properties);
        }
    }

    #[test]
    fn test_skips_other_geometries() {
        let point = r#"{"type": "Point", "coordinates": [0, 0]}"#;
        assert!(parse_buildings(&feature("{}", point)).unwrap().is_empty());
        assert!(parse_buildings(&feature("{}", "null")).unwrap().is_empty());

        let broken = r#"{"type": "Polygon", "coordinates": [[[0, 0], ["a", 1]]]}"#;
        assert!(parse_buildings(&feature("{}", broken)).unwrap().is_empty());
    }

    #[test]
    fn test_not_a_collection() {
        assert!(parse_buildings(r#"{"type": "Feature"}"#).is_err());
        assert!(parse_buildings("not json").is_err());
    }

    #[test]
    fn test_bounds() {
        let geometry = r#"{"type": "MultiPolygon", "coordinates": [
            [[[0, 0], [1, 0], [1, 1], [0, 0]]],
            [[[2, 2], [3, 2], [3, 4], [2, 2]]]
        ]}"#;
        let records = parse_buildings(&feature("{}", geometry)).unwrap();
        assert_eq!(records.len(), 2);

        let bounds = bounds(&records).unwrap();
        let center = bounds.center();
        assert_approx_eq!(center.lon, 1.5, 1e-12);
        assert_approx_eq!(center.lat, 2.0, 1e-12);
        assert!(super::bounds(&[]).is_none());
    }

    #[test]
    fn test_bundled_whitechapel() {
        let path = require_test_file!("whitechapel.geojson");
        let records = load_buildings(&path).unwrap();

        // Five polygon features, one of them a two-part MultiPolygon
        assert_eq!(records.len(), 6);
        assert_eq!(records.iter().filter(|r| r.landmark).count(), 2);
        assert_eq!(records[0].levels, 4);
    }
}
