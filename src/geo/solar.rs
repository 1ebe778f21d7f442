//! Astronomical time solver.
//!
//! Solar position uses the low-precision almanac formulas (declination and
//! equation of time good to about a minute of time), which is the accuracy
//! published prayer timetables work to. Every event is solved twice: the first
//! pass evaluates the sun at a rough estimate of the event, the second pass
//! re-evaluates it at the first result. Nothing is cached.
//!
//! All solver results are UTC instants relative to 00:00 UTC of the requested
//! date. For locations far from Greenwich an event can therefore fall on the
//! previous or next UTC day; the instants stay correctly ordered.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Depression of the sun's centre at apparent sunrise/sunset: refraction plus
/// the solar semi-diameter.
pub const HORIZON_DEPRESSION: f64 = 0.833;

/// Julian date at 00:00 UTC of a Gregorian calendar date.
pub fn julian_day(date: NaiveDate) -> f64 {
    let (mut y, mut m) = (date.year() as f64, date.month() as f64);
    let d = date.day() as f64;
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + d + b - 1524.5
}

fn fix_angle(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Sun declination and equation of time at an instant.
#[derive(Debug, Clone, Copy)]
pub struct SolarPosition {
    /// Declination in degrees
    pub declination: f64,
    /// Equation of time in hours, within [-12, 12)
    pub equation_of_time: f64,
}

impl SolarPosition {
    /// Position at Julian date `jd`.
    pub fn at(jd: f64) -> Self {
        let d = jd - 2451545.0;
        let g = fix_angle(357.529 + 0.98560028 * d) * DEG;
        let q = fix_angle(280.459 + 0.98564736 * d);
        let l = fix_angle(q + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()) * DEG;
        let e = (23.439 - 0.00000036 * d) * DEG;

        let right_ascension = ((e.cos() * l.sin()).atan2(l.cos()) / DEG / 15.0).rem_euclid(24.0);
        let declination = (e.sin() * l.sin()).asin() / DEG;
        let equation_of_time = (q / 15.0 - right_ascension + 12.0).rem_euclid(24.0) - 12.0;

        Self {
            declination,
            equation_of_time,
        }
    }
}

/// Hours (UTC) of solar transit for a position and longitude.
fn transit_hours(position: &SolarPosition, longitude: f64) -> f64 {
    12.0 - position.equation_of_time - longitude / 15.0
}

/// Hour angle, in hours, at which the sun stands at `altitude` degrees.
///
/// `None` when `|cos H| > 1`: the sun never reaches that altitude on the day.
fn hour_angle(latitude: f64, declination: f64, altitude: f64) -> Option<f64> {
    let (lat, decl) = (latitude * DEG, declination * DEG);
    let cos_h = ((altitude * DEG).sin() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());
    if !cos_h.is_finite() || cos_h.abs() > 1.0 {
        return None;
    }
    Some(cos_h.acos() / DEG / 15.0)
}

fn instant_from_hours(date: NaiveDate, hours: f64) -> DateTime<Utc> {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
    midnight + Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

fn position_at(date: NaiveDate, hours: f64) -> SolarPosition {
    SolarPosition::at(julian_day(date) + hours / 24.0)
}

/// Solve an event twice, each time evaluating the sun at the previous estimate.
fn refine(
    date: NaiveDate,
    initial_hours: f64,
    solve: impl Fn(&SolarPosition) -> Option<f64>,
) -> Option<DateTime<Utc>> {
    let first = solve(&position_at(date, initial_hours))?;
    let second = solve(&position_at(date, first))?;
    Some(instant_from_hours(date, second))
}

/// Instant of solar transit (Dhuhr reference) at `longitude` on `date`.
pub fn solar_noon(longitude: f64, date: NaiveDate) -> DateTime<Utc> {
    let estimate = 12.0 - longitude / 15.0;
    let first = transit_hours(&position_at(date, estimate), longitude);
    let second = transit_hours(&position_at(date, first), longitude);
    instant_from_hours(date, second)
}

/// Instant at which the sun is `angle_below_horizon` degrees below the
/// horizon, before transit when `is_morning`, after transit otherwise.
///
/// Returns `None` when the sun never reaches that depression on `date`
/// (polar summer for twilight angles, polar day/night for the horizon).
pub fn time_for_sun_angle(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    angle_below_horizon: f64,
    is_morning: bool,
) -> Option<DateTime<Utc>> {
    let initial = if is_morning { 6.0 } else { 18.0 } - longitude / 15.0;
    refine(date, initial, |position| {
        let noon = transit_hours(position, longitude);
        let h = hour_angle(latitude, position.declination, -angle_below_horizon)?;
        Some(if is_morning { noon - h } else { noon + h })
    })
}

/// Sun altitude, in degrees, at which a gnomon's shadow is `shadow_multiplier`
/// times its length plus the noon shadow.
pub fn asr_altitude(latitude: f64, declination: f64, shadow_multiplier: f64) -> f64 {
    let noon_shadow = ((latitude - declination).abs() * DEG).tan();
    (1.0 / (shadow_multiplier + noon_shadow)).atan() / DEG
}

/// Afternoon instant at which the shadow ratio reaches `shadow_multiplier`.
///
/// Returns `None` when the sun never climbs to the required altitude.
pub fn time_for_shadow_ratio(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    shadow_multiplier: f64,
) -> Option<DateTime<Utc>> {
    let initial = 15.0 - longitude / 15.0;
    refine(date, initial, |position| {
        let noon = transit_hours(position, longitude);
        let altitude = asr_altitude(latitude, position.declination, shadow_multiplier);
        let h = hour_angle(latitude, position.declination, altitude)?;
        Some(noon + h)
    })
}
