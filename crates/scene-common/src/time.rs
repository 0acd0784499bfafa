//! Timestamp handling for clock updates.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::{SceneError, SceneResult};

/// Parse a clock timestamp.
///
/// Supports:
/// - Full RFC 3339: "2024-06-21T12:00:00Z", "2024-06-21T13:00:00+01:00"
/// - Without timezone (assumed UTC): "2024-06-21T12:00:00"
/// - Date only (midnight UTC): "2024-06-21"
/// - "now"
pub fn parse_timestamp(s: &str) -> SceneResult<DateTime<Utc>> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }

    // Try full datetime with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try without timezone (assume UTC)
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    // Try date only
    if let Ok(ndt) = NaiveDateTime::parse_from_str(&format!("{}T00:00:00", s), "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    Err(SceneError::InvalidTimestamp(s.to_string()))
}

/// Convert milliseconds since the Unix epoch to a UTC timestamp.
///
/// Non-finite or out-of-range values fail instead of producing a degenerate
/// sun position.
pub fn from_epoch_millis(millis: f64) -> SceneResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(SceneError::InvalidTimestamp(format!(
            "non-finite epoch milliseconds: {}",
            millis
        )));
    }
    if millis.abs() > i64::MAX as f64 {
        return Err(SceneError::InvalidTimestamp(format!(
            "epoch milliseconds out of range: {}",
            millis
        )));
    }

    let whole = millis.floor();
    let nanos = ((millis - whole) * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_millis(whole as i64)
        .map(|dt| dt + chrono::Duration::nanoseconds(nanos))
        .ok_or_else(|| {
            SceneError::InvalidTimestamp(format!("epoch milliseconds out of range: {}", millis))
        })
}

/// Milliseconds since the Unix epoch, with sub-millisecond precision.
pub fn to_epoch_millis(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 + f64::from(dt.timestamp_subsec_nanos() % 1_000_000) / 1_000_000.0
}
