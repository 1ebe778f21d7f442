//! Lunation-based month starts.
//!
//! New moons come from the mean-lunation series with the principal periodic
//! terms (accurate to a few minutes over the historical range, ignoring ΔT).
//! A month begins the day after the conjunction when the conjunction falls
//! before the variant's cut-off on its UTC day, otherwise one day later.
//! Months are counted from 1 Muharram 1 AH: month number `n` is
//! `(year − 1)·12 + (month − 1)`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::geo::KAABA;
use crate::geo::solar::{self, HORIZON_DEPRESSION};

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_861;

/// Month number of the lunation whose new moon is `k = 0` (6 January 2000),
/// i.e. Shawwal 1420.
const LUNATION_OFFSET: i64 = 17_037;

/// Cut-off deciding whether the month starts the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Conjunction before sunset in Mecca
    MeccaSunset,
    /// Conjunction before 12:00 UTC
    NoonUtc,
}

/// Julian ephemeris day of the `k`-th new moon after 6 January 2000.
pub fn new_moon_jde(k: f64) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let jde = 2_451_550.097_66 + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let omega = (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * mp.sin() + 0.172_41 * e * m.sin() + 0.016_08 * (2.0 * mp).sin()
        + 0.010_39 * (2.0 * f).sin()
        + 0.007_39 * e * (mp - m).sin()
        - 0.005_14 * e * (mp + m).sin()
        + 0.002_08 * e * e * (2.0 * m).sin()
        - 0.001_11 * (mp - 2.0 * f).sin()
        - 0.000_57 * (mp + 2.0 * f).sin()
        + 0.000_56 * e * (2.0 * mp + m).sin()
        - 0.000_42 * (3.0 * mp).sin()
        + 0.000_42 * e * (m + 2.0 * f).sin()
        + 0.000_38 * e * (m - 2.0 * f).sin()
        - 0.000_24 * e * (2.0 * mp - m).sin()
        - 0.000_17 * omega.sin();

    jde + correction
}

fn instant_from_jd(jd: f64) -> DateTime<Utc> {
    let seconds = ((jd - 2_440_587.5) * 86_400.0).round() as i64;
    DateTime::from_timestamp(seconds, 0).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Instant of the conjunction that opens month number `n`.
pub fn conjunction(n: i64) -> DateTime<Utc> {
    instant_from_jd(new_moon_jde((n - LUNATION_OFFSET) as f64))
}

/// First day of month number `n`.
pub fn month_start(n: i64, criterion: Criterion) -> NaiveDate {
    let conj = conjunction(n);
    let conj_day = conj.date_naive();

    let before_cutoff = match criterion {
        Criterion::MeccaSunset => solar::time_for_sun_angle(
            KAABA.latitude(),
            KAABA.longitude(),
            conj_day,
            HORIZON_DEPRESSION,
            false,
        )
        .is_some_and(|sunset| conj < sunset),
        Criterion::NoonUtc => conj < conj_day.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc(),
    };

    let delay = if before_cutoff { 1 } else { 2 };
    conj_day
        .checked_add_signed(Duration::days(delay))
        .unwrap_or(conj_day)
}

/// Month number containing `date`, with the month's first day.
pub fn month_containing(date: NaiveDate, criterion: Criterion) -> (i64, NaiveDate) {
    // Rough estimate from the mean month, then step to the exact lunation.
    let days_since_epoch = date.num_days_from_ce() as f64 + 1_721_425.0 - 1_948_439.0;
    let mut n = (days_since_epoch / SYNODIC_MONTH).floor() as i64;

    // Month starts stop advancing where the conjunction instant saturates at
    // chrono's bounds, so both walks end on the first step without progress.
    let mut start = month_start(n, criterion);
    while start > date {
        let previous = month_start(n - 1, criterion);
        if previous >= start {
            break;
        }
        n -= 1;
        start = previous;
    }
    loop {
        let next = month_start(n + 1, criterion);
        if next > date || next <= start {
            break;
        }
        n += 1;
        start = next;
    }
    (n, start)
}

/// Length of month number `n` in days.
pub fn month_length(n: i64, criterion: Criterion) -> u32 {
    (month_start(n + 1, criterion) - month_start(n, criterion)).num_days() as u32
}
