//! Low-precision solar ephemeris.
//!
//! Follows the published algorithm from the Astronomy Answers series
//! (the one behind SunCalc): mean anomaly, equation of centre, ecliptic
//! longitude, then equatorial coordinates and the local hour angle. Accuracy
//! is well under a degree for dates within a few centuries of J2000.
//!
//! Azimuth is measured from due south and increases westward.

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Duration, NaiveTime, Utc};
use scene_common::time::{from_epoch_millis, to_epoch_millis};
use scene_common::{GeoCoordinate, SceneResult, SolarAngles, SunTimes};

const DAY_MS: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;

/// Obliquity of the ecliptic (radians)
const OBLIQUITY: f64 = 23.4397 * PI / 180.0;

/// Mean solar transit offset (days)
const J0: f64 = 0.0009;

/// Sun altitude at sunrise/sunset: upper limb on the horizon with standard
/// refraction (degrees).
const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

fn to_julian(millis: f64) -> f64 {
    millis / DAY_MS - 0.5 + J1970
}

fn from_julian(julian: f64) -> f64 {
    (julian + 0.5 - J1970) * DAY_MS
}

/// Days since J2000.
fn to_days(millis: f64) -> f64 {
    to_julian(millis) - J2000
}

fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

fn sidereal_time(d: f64, lw: f64) -> f64 {
    (280.16 + 360.985_623_5 * d).to_radians() - lw
}

fn solar_mean_anomaly(d: f64) -> f64 {
    (357.5291 + 0.985_600_28 * d).to_radians()
}

fn ecliptic_longitude(m: f64) -> f64 {
    // Equation of centre
    let c = (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians();
    // Perihelion of the Earth
    let p = 102.9372_f64.to_radians();
    m + c + p + PI
}

/// Declination and right ascension of the sun `d` days after J2000.
fn sun_coords(d: f64) -> (f64, f64) {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    (declination(l, 0.0), right_ascension(l, 0.0))
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / TAU).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / TAU + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour angle at which the sun reaches altitude `h`. NaN when it never does.
fn hour_angle(h: f64, phi: f64, dec: f64) -> f64 {
    ((h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())).acos()
}

fn angles_at(millis: f64, location: &GeoCoordinate) -> SolarAngles {
    let lw = -location.lon.to_radians();
    let phi = location.lat.to_radians();
    let d = to_days(millis);

    let (dec, ra) = sun_coords(d);
    let h = sidereal_time(d, lw) - ra;

    SolarAngles::new(azimuth(h, phi, dec), altitude(h, phi, dec))
}

/// Sun azimuth/altitude at `timestamp` as seen from `location`.
///
/// # Errors
/// Fails with a domain error if the location is not a valid coordinate.
pub fn solar_angles(timestamp: &DateTime<Utc>, location: &GeoCoordinate) -> SceneResult<SolarAngles> {
    location.validate()?;
    Ok(angles_at(to_epoch_millis(timestamp), location))
}

/// Like [`solar_angles`] for a raw epoch-milliseconds clock value.
///
/// A non-finite timestamp fails fast with `InvalidTimestamp`.
pub fn solar_angles_at_millis(millis: f64, location: &GeoCoordinate) -> SceneResult<SolarAngles> {
    // Round-trips through chrono only to reject NaN/inf and out-of-range values.
    from_epoch_millis(millis)?;
    location.validate()?;
    Ok(angles_at(millis, location))
}

/// Solar noon, sunrise and sunset at `location` on the UTC calendar day of
/// `date`.
///
/// The transit is searched around the location's mean local noon of that
/// day, so the time of day carried by `date` does not matter. Sunrise and
/// sunset are `None` during polar day or polar night.
pub fn sun_times(date: &DateTime<Utc>, location: &GeoCoordinate) -> SceneResult<SunTimes> {
    location.validate()?;

    let lw = -location.lon.to_radians();
    let phi = location.lat.to_radians();

    let utc_noon = date.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::hours(12);
    let local_noon = to_epoch_millis(&utc_noon) - location.lon / 360.0 * DAY_MS;
    let d = to_days(local_noon);

    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);

    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);

    let j_noon = solar_transit_j(ds, m, l);
    let solar_noon = from_epoch_millis(from_julian(j_noon))?;

    let w = hour_angle(SUNRISE_ALTITUDE_DEG.to_radians(), phi, dec);
    let (sunrise, sunset) = if w.is_nan() {
        (None, None)
    } else {
        let a = approx_transit(w, lw, n);
        let j_set = solar_transit_j(a, m, l);
        let j_rise = j_noon - (j_set - j_noon);
        (
            Some(from_epoch_millis(from_julian(j_rise))?),
            Some(from_epoch_millis(from_julian(j_set))?),
        )
    };

    Ok(SunTimes {
        solar_noon,
        sunrise,
        sunset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_roundtrip() {
        let millis = 1_718_971_200_000.0;
        assert!((from_julian(to_julian(millis)) - millis).abs() < 1e-3);
    }

    #[test]
    fn test_j2000_epoch() {
        // 2000-01-01T12:00:00Z is day 0
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!(to_days(to_epoch_millis(&j2000)).abs() < 1e-9);
    }

    #[test]
    fn test_declination_at_solstices() {
        let june = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let (dec, _) = sun_coords(to_days(to_epoch_millis(&june)));
        assert!((dec.to_degrees() - 23.44).abs() < 0.1, "June declination {}", dec.to_degrees());

        let december = Utc.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
        let (dec, _) = sun_coords(to_days(to_epoch_millis(&december)));
        assert!((dec.to_degrees() + 23.44).abs() < 0.1, "December declination {}", dec.to_degrees());
    }

    #[test]
    fn test_hour_angle_nan_in_polar_day() {
        let phi = 80f64.to_radians();
        let dec = 23.4f64.to_radians();
        assert!(hour_angle(SUNRISE_ALTITUDE_DEG.to_radians(), phi, dec).is_nan());
    }
}
