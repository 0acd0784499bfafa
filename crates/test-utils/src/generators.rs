//! Footprint generators for creating synthetic building outlines.
//!
//! These generators create predictable, verifiable shapes that can be used
//! across the test suite.

/// Creates a regular polygon footprint around a geographic centre.
///
/// Vertices are listed counter-clockwise (seen from above, east = +lon,
/// north = +lat), starting due east of the centre. The ring is open: the
/// first vertex is not repeated.
///
/// # Arguments
///
/// * `center` - (lon, lat) of the polygon centre
/// * `radius_deg` - Distance from centre to each vertex, in degrees
/// * `sides` - Number of vertices (at least 3)
///
/// # Example
///
/// ```
/// use test_utils::create_regular_footprint;
///
/// let ring = create_regular_footprint((0.0, 0.0), 0.001, 4);
/// assert_eq!(ring.len(), 4);
/// assert!((ring[0].0 - 0.001).abs() < 1e-12);
/// ```
pub fn create_regular_footprint(center: (f64, f64), radius_deg: f64, sides: usize) -> Vec<(f64, f64)> {
    let sides = sides.max(3);
    (0..sides)
        .map(|i| {
            let angle = i as f64 / sides as f64 * std::f64::consts::TAU;
            (
                center.0 + radius_deg * angle.cos(),
                center.1 + radius_deg * angle.sin(),
            )
        })
        .collect()
}

/// Creates an axis-aligned rectangular footprint.
///
/// # Arguments
///
/// * `min` - (lon, lat) of the south-west corner
/// * `size` - (width, height) in degrees
pub fn create_rect_footprint(min: (f64, f64), size: (f64, f64)) -> Vec<(f64, f64)> {
    vec![
        min,
        (min.0 + size.0, min.1),
        (min.0 + size.0, min.1 + size.1),
        (min.0, min.1 + size.1),
    ]
}

/// Creates a row of adjacent rectangular footprints along a street, west to
/// east, each `width` degrees wide.
pub fn create_street(start: (f64, f64), count: usize, width: f64, depth: f64) -> Vec<Vec<(f64, f64)>> {
    (0..count)
        .map(|i| create_rect_footprint((start.0 + i as f64 * width, start.1), (width, depth)))
        .collect()
}
