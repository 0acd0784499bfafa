//! Error types for the sunlit scene crates.

use thiserror::Error;

/// Result type alias using SceneError.
pub type SceneResult<T> = Result<T, SceneError>;

/// Primary error type for projection, ephemeris and scene operations.
#[derive(Debug, Error)]
pub enum SceneError {
    // === Domain Errors ===
    #[error("Latitude {0} is outside the Mercator domain (-90, 90)")]
    LatitudeOutOfDomain(f64),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // === Input Errors ===
    #[error("Invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    #[error("Invalid footprint: {0}")]
    InvalidFootprint(String),

    #[error("Invalid level count {0}: buildings need at least one level")]
    InvalidLevels(u32),

    // === Geometry Errors ===
    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SceneError {
    /// Shorthand for an [`SceneError::InvalidConfig`].
    pub fn config(param: impl Into<String>, message: impl Into<String>) -> Self {
        SceneError::InvalidConfig {
            param: param.into(),
            message: message.into(),
        }
    }

    /// True for failures caused by geographic or temporal input outside the
    /// domain of the projection or the solar ephemeris.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            SceneError::LatitudeOutOfDomain(_)
                | SceneError::InvalidCoordinate(_)
                | SceneError::InvalidTimestamp(_)
        )
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Serialization(format!("JSON error: {}", err))
    }
}
