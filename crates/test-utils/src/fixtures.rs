//! Common test fixtures for sunlit scene tests.
//!
//! This module provides pre-defined test data that represents common
//! scenarios: scene centres, building footprints and clock times.

/// Common geographic points as (lon, lat).
pub mod places {
    /// Default scene centre (Whitechapel, London)
    pub const LONDON: (f64, f64) = (-0.0668529, 51.5127414);

    /// Greenwich observatory, on the prime meridian
    pub const GREENWICH: (f64, f64) = (0.0, 51.4779);

    /// A point on the equator and prime meridian
    pub const NULL_ISLAND: (f64, f64) = (0.0, 0.0);

    /// Tromsø, north of the Arctic Circle (polar day in June)
    pub const TROMSO: (f64, f64) = (18.9553, 69.6492);

    /// Sydney, southern hemisphere
    pub const SYDNEY: (f64, f64) = (151.2093, -33.8688);

    /// Practical Mercator bound used by web maps
    pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;
}

/// Building footprints near the default scene centre, as (lon, lat) rings.
pub mod footprints {
    /// A small rectangular terrace block, counter-clockwise, open ring.
    pub const TERRACE: [(f64, f64); 4] = [
        (-0.0671, 51.5126),
        (-0.0665, 51.5126),
        (-0.0665, 51.5129),
        (-0.0671, 51.5129),
    ];

    /// The same block as a clockwise ring with an explicit closing vertex.
    pub const TERRACE_CLOSED_CW: [(f64, f64); 5] = [
        (-0.0671, 51.5126),
        (-0.0671, 51.5129),
        (-0.0665, 51.5129),
        (-0.0665, 51.5126),
        (-0.0671, 51.5126),
    ];

    /// An L-shaped (concave) corner building.
    pub const CORNER_L: [(f64, f64); 6] = [
        (-0.0680, 51.5120),
        (-0.0674, 51.5120),
        (-0.0674, 51.5122),
        (-0.0678, 51.5122),
        (-0.0678, 51.5125),
        (-0.0680, 51.5125),
    ];

    /// Degenerate footprint: all vertices on one line.
    pub const COLLINEAR: [(f64, f64); 3] = [
        (-0.0671, 51.5126),
        (-0.0668, 51.5126),
        (-0.0665, 51.5126),
    ];
}

/// Common time values for testing.
pub mod time {
    /// Summer solstice, midnight UTC
    pub const SUMMER_SOLSTICE: &str = "2024-06-21T00:00:00Z";

    /// Winter solstice, midnight UTC
    pub const WINTER_SOLSTICE: &str = "2024-12-21T00:00:00Z";

    /// Approximate solar noon in London on the summer solstice
    pub const LONDON_SUMMER_NOON: &str = "2024-06-21T12:02:00Z";

    /// Noon sun altitude in London at the summer solstice, degrees
    /// (90 - 51.51 + 23.44)
    pub const LONDON_SUMMER_NOON_ALTITUDE_DEG: f64 = 61.93;

    /// Noon sun altitude in London at the winter solstice, degrees
    /// (90 - 51.51 - 23.44)
    pub const LONDON_WINTER_NOON_ALTITUDE_DEG: f64 = 15.05;
}
