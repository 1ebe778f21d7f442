//! Prayer time calculator.
//!
//! Combines the astronomical solver with a [`CalculationMethod`] and a
//! [`Madhab`] to produce the times of one calendar day. Every function here is
//! a pure function of its arguments: the same coordinate, date, method and
//! madhab always yield bit-identical results.
//!
//! ## Calculation steps
//!
//! 1. Sunrise and sunset at the apparent horizon, plus the next day's sunrise
//!    to measure the night. Failure here means midnight sun or polar night and
//!    is reported as [`PrayerError::UnsolvableAtLatitude`].
//! 2. Fajr from the madhab's angle override, else the method's angle.
//! 3. Dhuhr at solar transit.
//! 4. Asr from the madhab's shadow multiplier.
//! 5. Maghrib at sunset plus the madhab's delay.
//! 6. Isha from the madhab's angle override, else the method's Isha rule.
//! 7. Fajr and Isha are clamped to the high-latitude safe bounds (see
//!    [`high_latitude`]); the rule that fired is recorded on the result.
//! 8. Method and user minute adjustments, then rounding to the minute.
//! 9. The ordering `fajr < sunrise < dhuhr < asr < maghrib < isha` is checked;
//!    a violation is an error, never silently corrected.

pub mod high_latitude;
pub mod madhab;
pub mod method;


pub use high_latitude::HighLatitudeRule;
pub use madhab::Madhab;
pub use method::{
    CalculationMethod, CompatibilityStatus, IshaRule, compatibility_status, is_compatible,
};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PrayerError, PrayerResult};
use crate::geo::GeoCoordinate;
use crate::geo::solar::{self, HORIZON_DEPRESSION};

/// The daily events a timetable lists. `Sunrise` ends the Fajr window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All events in chronological order.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The five obligatory prayers.
    pub const FIVE: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

/// Per-prayer offsets in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerAdjustments {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl PrayerAdjustments {
    pub fn minutes_for(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Sum of two sets of offsets.
    pub fn combined(&self, other: &PrayerAdjustments) -> PrayerAdjustments {
        PrayerAdjustments {
            fajr: self.fajr.saturating_add(other.fajr),
            sunrise: self.sunrise.saturating_add(other.sunrise),
            dhuhr: self.dhuhr.saturating_add(other.dhuhr),
            asr: self.asr.saturating_add(other.asr),
            maghrib: self.maghrib.saturating_add(other.maghrib),
            isha: self.isha.saturating_add(other.isha),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == PrayerAdjustments::default()
    }
}

/// Everything besides location and date that determines a day's times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    pub method: CalculationMethod,
    pub madhab: Madhab,
    /// `None` uses the method's recommended rule.
    pub high_latitude_rule: Option<HighLatitudeRule>,
    /// User offsets, applied on top of the method's own.
    pub adjustments: PrayerAdjustments,
}

impl CalculationParameters {
    pub fn new(method: CalculationMethod, madhab: Madhab) -> Self {
        Self {
            method,
            madhab,
            high_latitude_rule: None,
            adjustments: PrayerAdjustments::default(),
        }
    }

    pub fn with_high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude_rule = Some(rule);
        self
    }

    pub fn with_adjustments(mut self, adjustments: PrayerAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn effective_high_latitude_rule(&self) -> HighLatitudeRule {
        self.high_latitude_rule
            .unwrap_or_else(|| self.method.high_latitude_rule())
    }

    pub fn fajr_angle(&self) -> f64 {
        self.madhab
            .fajr_twilight_angle()
            .unwrap_or_else(|| self.method.fajr_angle())
    }

    pub fn isha_rule(&self) -> IshaRule {
        match self.madhab.isha_twilight_angle() {
            Some(angle) => IshaRule::Angle(angle),
            None => self.method.isha_rule(),
        }
    }
}

/// Prayer times for one calendar day, as UTC instants rounded to the minute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPrayerTimes {
    pub date: NaiveDate,
    pub fajr: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
    pub method: CalculationMethod,
    pub madhab: Madhab,
    pub location: GeoCoordinate,
    /// Set when Fajr or Isha came from the high-latitude safe bound.
    pub high_latitude_fallback: Option<HighLatitudeRule>,
}

/// Midpoints of the night between Maghrib and the next Fajr.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NightPortions {
    pub middle_of_night: DateTime<Utc>,
    pub last_third: DateTime<Utc>,
}

impl DailyPrayerTimes {
    pub fn time_for(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// The latest event of the day that has started at `at`.
    ///
    /// `None` before Fajr; the previous day's Isha is still current then.
    pub fn current_prayer(&self, at: DateTime<Utc>) -> Option<Prayer> {
        Prayer::ALL
            .iter()
            .rev()
            .find(|p| self.time_for(**p) <= at)
            .copied()
    }

    /// The first event of the day still ahead of `at`; `None` after Isha.
    pub fn next_prayer(&self, at: DateTime<Utc>) -> Option<Prayer> {
        Prayer::ALL.iter().find(|p| self.time_for(**p) > at).copied()
    }

    /// Middle and last third of the night, given the following day's Fajr.
    pub fn night_portions(&self, next_fajr: DateTime<Utc>) -> NightPortions {
        let night = next_fajr - self.maghrib;
        NightPortions {
            middle_of_night: round_to_minute(self.maghrib + night / 2),
            last_third: round_to_minute(self.maghrib + night * 2 / 3),
        }
    }
}

/// Compute one day's times with the method's recommended high-latitude rule
/// and no user adjustments.
pub fn compute(
    coordinate: GeoCoordinate,
    date: NaiveDate,
    method: CalculationMethod,
    madhab: Madhab,
) -> PrayerResult<DailyPrayerTimes> {
    compute_with(coordinate, date, &CalculationParameters::new(method, madhab))
}

/// Compute one day's times for an explicit parameter bundle.
pub fn compute_with(
    coordinate: GeoCoordinate,
    date: NaiveDate,
    params: &CalculationParameters,
) -> PrayerResult<DailyPrayerTimes> {
    let (lat, lon) = (coordinate.latitude(), coordinate.longitude());
    let unsolvable = || PrayerError::UnsolvableAtLatitude {
        latitude: lat,
        date,
    };
    let next_day = date
        .succ_opt()
        .ok_or_else(|| PrayerError::InvalidDate(format!("no day follows {date}")))?;

    let sunrise =
        solar::time_for_sun_angle(lat, lon, date, HORIZON_DEPRESSION, true).ok_or_else(unsolvable)?;
    let sunset = solar::time_for_sun_angle(lat, lon, date, HORIZON_DEPRESSION, false)
        .ok_or_else(unsolvable)?;
    let next_sunrise = solar::time_for_sun_angle(lat, lon, next_day, HORIZON_DEPRESSION, true)
        .ok_or_else(unsolvable)?;
    let night = next_sunrise - sunset;
    if night <= Duration::zero() {
        return Err(unsolvable());
    }

    let dhuhr = solar::solar_noon(lon, date);
    let asr = solar::time_for_shadow_ratio(lat, lon, date, params.madhab.asr_shadow_multiplier())
        .ok_or_else(unsolvable)?;
    let maghrib = sunset + Duration::minutes(params.madhab.maghrib_delay_minutes());

    let rule = params.effective_high_latitude_rule();
    let mut fallback_fired = false;

    let fajr_angle = params.fajr_angle();
    let safe_fajr = high_latitude::safe_fajr(rule, fajr_angle, sunrise, night);
    let fajr = match solar::time_for_sun_angle(lat, lon, date, fajr_angle, true) {
        Some(solved) if solved >= safe_fajr => solved,
        _ => {
            fallback_fired = true;
            safe_fajr
        }
    };

    let isha = match params.isha_rule() {
        IshaRule::MinutesAfterMaghrib(minutes) => maghrib + Duration::minutes(minutes),
        IshaRule::Angle(angle) => {
            let safe_isha = high_latitude::safe_isha(rule, angle, sunset, night);
            match solar::time_for_sun_angle(lat, lon, date, angle, false) {
                Some(solved) if solved <= safe_isha => solved,
                _ => {
                    fallback_fired = true;
                    safe_isha
                }
            }
        }
    };

    if fallback_fired {
        log_debug!(
            "High-latitude fallback ({}) applied at {} on {}",
            rule.display_name(),
            coordinate.display(),
            date
        );
    }

    let offsets = params.method.method_adjustments().combined(&params.adjustments);
    let adjust = |prayer: Prayer, instant: DateTime<Utc>| {
        round_to_minute(instant + Duration::minutes(offsets.minutes_for(prayer) as i64))
    };

    let times = DailyPrayerTimes {
        date,
        fajr: adjust(Prayer::Fajr, fajr),
        sunrise: adjust(Prayer::Sunrise, sunrise),
        dhuhr: adjust(Prayer::Dhuhr, dhuhr),
        asr: adjust(Prayer::Asr, asr),
        maghrib: adjust(Prayer::Maghrib, maghrib),
        isha: adjust(Prayer::Isha, isha),
        method: params.method,
        madhab: params.madhab,
        location: coordinate,
        high_latitude_fallback: fallback_fired.then_some(rule),
    };

    // Solved times already in order that collapse only after the minute
    // offsets mean the day or night is too short for the method.
    let solved_in_order = [fajr, sunrise, dhuhr, asr, maghrib, isha]
        .windows(2)
        .all(|pair| pair[0] < pair[1]);

    if let Err(err) = verify_ordering(&times) {
        if fallback_fired || solved_in_order {
            log_debug!("No ordered schedule at {} on {}: {}", coordinate.display(), date, err);
            return Err(unsolvable());
        }
        log_error!("Prayer times out of order on {}: {}", date, err);
        return Err(err);
    }
    Ok(times)
}

/// Compute `days` consecutive days starting at `start`.
///
/// Days are independent, so they are split across scoped worker threads.
/// Results come back in date order; the first failing day's error is returned.
pub fn compute_range(
    coordinate: GeoCoordinate,
    start: NaiveDate,
    days: u32,
    params: &CalculationParameters,
) -> PrayerResult<Vec<DailyPrayerTimes>> {
    let dates: Vec<NaiveDate> = start.iter_days().take(days as usize).collect();
    if dates.len() < days as usize {
        return Err(PrayerError::InvalidDate(format!(
            "range of {days} days from {start} leaves the supported calendar"
        )));
    }
    if dates.is_empty() {
        return Ok(Vec::new());
    }

    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(dates.len());
    let chunk_size = dates.len().div_ceil(workers);

    let chunks: Vec<PrayerResult<Vec<DailyPrayerTimes>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = dates
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|date| compute_with(coordinate, *date, params))
                        .collect::<PrayerResult<Vec<_>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut all = Vec::with_capacity(dates.len());
    for chunk in chunks {
        all.extend(chunk?);
    }
    Ok(all)
}

fn round_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    let millis = instant.timestamp_millis();
    let rounded = (millis + 30_000).div_euclid(60_000) * 60_000;
    DateTime::from_timestamp_millis(rounded).unwrap_or(instant)
}

fn verify_ordering(times: &DailyPrayerTimes) -> PrayerResult<()> {
    for pair in Prayer::ALL.windows(2) {
        let (earlier, later) = (pair[0], pair[1]);
        if times.time_for(earlier) >= times.time_for(later) {
            let detail = format!(
                "{} ({}) is not before {} ({})",
                earlier.name(),
                times.time_for(earlier).format("%H:%M UTC"),
                later.name(),
                times.time_for(later).format("%H:%M UTC"),
            );
            return Err(PrayerError::ComputationOrderingViolation {
                date: times.date,
                detail,
            });
        }
    }
    Ok(())
}
