//! Test support shared across the workspace.
//!
//! Fixtures are plain `(lon, lat)` tuples and strings so that any crate,
//! `scene-common` included, can use them without a dependency cycle.
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a bundled test file, or skip the calling test when it is missing.
///
/// ```ignore
/// let path = require_test_file!("whitechapel.geojson");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let Some(path) = $crate::find_test_file($name) else {
            eprintln!(
                "SKIPPED: test file '{}' not found in {:?}; set TEST_DATA_DIR to point at it",
                $name,
                $crate::testdata_dirs()
            );
            return;
        };
        path
    }};
}

/// Assert two numbers agree within `epsilon`. Both sides are widened to f64.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        assert!(
            (left - right).abs() <= epsilon,
            "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > epsilon `{:?}`",
            left,
            right,
            (left - right).abs(),
            epsilon
        );
    }};
}

/// Assert two `(x, y)` pairs agree component-wise within `epsilon`.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_within_epsilon() {
        assert_approx_eq!(51.51274, 51.5127414, 1e-5);
        assert_approx_eq!(0.0_f32, -0.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_approx_eq_outside_epsilon() {
        assert_approx_eq!(300.0, 299.0, 0.5);
    }

    #[test]
    fn test_coords_approx_eq() {
        assert_coords_approx_eq!((-0.0668529, 51.5127414), (-0.06685, 51.51274), 1e-4);
    }
}
