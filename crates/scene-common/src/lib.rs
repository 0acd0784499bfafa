//! Common types and utilities shared across the sunlit scene crates.

pub mod bbox;
pub mod config;
pub mod coord;
pub mod error;
pub mod sun;
pub mod time;

pub use bbox::GeoBounds;
pub use config::ProjectionConfig;
pub use coord::{CartesianPosition, GeoCoordinate, PlanarPoint};
pub use error::{SceneError, SceneResult};
pub use sun::{SolarAngles, SunTimes};
