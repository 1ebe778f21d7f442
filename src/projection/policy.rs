//! How much precision is honest to show for a date, and what to say about it.

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Timelike};
use serde::Serialize;
use std::fmt::Display;

/// Average Gregorian month in days (365.2425 / 12).
const AVERAGE_MONTH_DAYS: f64 = 30.436_875;

pub const SHORT_TERM_MONTHS: i64 = 12;
pub const MEDIUM_TERM_MONTHS: i64 = 60;

/// Window width shown for medium-term projections.
pub const MEDIUM_TERM_WINDOW_MINUTES: u32 = 30;

pub const SHORT_TERM_BANNER: &str = "Future prayer times are calculated astronomically and may differ by a few minutes from your local mosque's timetable.";
pub const MEDIUM_TERM_BANNER: &str = "Prayer times more than a year ahead are estimates. Daylight saving rules and local conventions may change, so each time is shown as a 30-minute window.";
pub const LONG_TERM_BANNER: &str = "Prayer times more than five years ahead are rough projections. Only the approximate time of day is shown; please verify closer to the date.";

/// How far from today a queried date lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclaimerLevel {
    Today,
    /// Up to 12 months away
    ShortTerm,
    /// Up to 60 months away
    MediumTerm,
    LongTerm,
}

impl DisclaimerLevel {
    pub fn precision(&self) -> PrecisionLevel {
        match self {
            DisclaimerLevel::Today | DisclaimerLevel::ShortTerm => PrecisionLevel::Exact,
            DisclaimerLevel::MediumTerm => PrecisionLevel::Window {
                minutes: MEDIUM_TERM_WINDOW_MINUTES,
            },
            DisclaimerLevel::LongTerm => PrecisionLevel::TimeOfDay,
        }
    }

    pub fn banner(&self) -> Option<&'static str> {
        match self {
            DisclaimerLevel::Today => None,
            DisclaimerLevel::ShortTerm => Some(SHORT_TERM_BANNER),
            DisclaimerLevel::MediumTerm => Some(MEDIUM_TERM_BANNER),
            DisclaimerLevel::LongTerm => Some(LONG_TERM_BANNER),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisclaimerLevel::Today => "today",
            DisclaimerLevel::ShortTerm => "short_term",
            DisclaimerLevel::MediumTerm => "medium_term",
            DisclaimerLevel::LongTerm => "long_term",
        }
    }
}

/// Whole average-length months between two dates, in either direction.
///
/// Counting days rather than calendar-month boundaries keeps the result
/// monotone in the distance between the dates.
pub fn months_between(today: NaiveDate, date: NaiveDate) -> i64 {
    let days = (date - today).num_days().unsigned_abs() as f64;
    (days / AVERAGE_MONTH_DAYS).floor() as i64
}

pub fn disclaimer_level(date: NaiveDate, today: NaiveDate) -> DisclaimerLevel {
    if date == today {
        return DisclaimerLevel::Today;
    }
    match months_between(today, date) {
        m if m <= SHORT_TERM_MONTHS => DisclaimerLevel::ShortTerm,
        m if m <= MEDIUM_TERM_MONTHS => DisclaimerLevel::MediumTerm,
        _ => DisclaimerLevel::LongTerm,
    }
}

/// Coarse label used when minutes would be false precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Noon,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..6 => TimeOfDay::EarlyMorning,
            6..12 => TimeOfDay::Morning,
            12..13 => TimeOfDay::Noon,
            13..17 => TimeOfDay::Afternoon,
            17..20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "Early Morning",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Noon => "Noon",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// How a projected instant is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrecisionLevel {
    /// `HH:mm`
    Exact,
    /// `[HH:mm–HH:mm]`, centred on the instant
    Window { minutes: u32 },
    /// One of six coarse labels
    TimeOfDay,
}

impl PrecisionLevel {
    /// Format `instant` in its own time zone.
    pub fn format_time<Z: TimeZone>(&self, instant: &DateTime<Z>) -> String
    where
        Z::Offset: Display,
    {
        match self {
            PrecisionLevel::Exact => instant.format("%H:%M").to_string(),
            PrecisionLevel::Window { minutes } => {
                let half = TimeDelta::seconds(*minutes as i64 * 30);
                let start = instant.clone() - half;
                let end = instant.clone() + half;
                format!("[{}–{}]", start.format("%H:%M"), end.format("%H:%M"))
            }
            PrecisionLevel::TimeOfDay => TimeOfDay::from_hour(instant.hour()).label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_disclaimer_boundaries() {
        let today = date(2024, 6, 1);
        assert_eq!(disclaimer_level(today, today), DisclaimerLevel::Today);
        assert_eq!(
            disclaimer_level(today + Duration::days(1), today),
            DisclaimerLevel::ShortTerm
        );
        assert_eq!(
            disclaimer_level(date(2025, 6, 1), today),
            DisclaimerLevel::ShortTerm
        );
        assert_eq!(
            disclaimer_level(date(2025, 7, 15), today),
            DisclaimerLevel::MediumTerm
        );
        assert_eq!(
            disclaimer_level(date(2027, 6, 1), today),
            DisclaimerLevel::MediumTerm
        );
        assert_eq!(
            disclaimer_level(date(2029, 6, 1), today),
            DisclaimerLevel::MediumTerm
        );
        assert_eq!(
            disclaimer_level(date(2029, 7, 15), today),
            DisclaimerLevel::LongTerm
        );
    }

    #[test]
    fn test_past_dates_use_distance() {
        let today = date(2024, 6, 1);
        assert_eq!(
            disclaimer_level(date(2024, 5, 1), today),
            DisclaimerLevel::ShortTerm
        );
        assert_eq!(
            disclaimer_level(date(2010, 1, 1), today),
            DisclaimerLevel::LongTerm
        );
    }

    #[test]
    fn test_precision_table() {
        assert_eq!(DisclaimerLevel::Today.precision(), PrecisionLevel::Exact);
        assert_eq!(DisclaimerLevel::ShortTerm.precision(), PrecisionLevel::Exact);
        assert_eq!(
            DisclaimerLevel::MediumTerm.precision(),
            PrecisionLevel::Window { minutes: 30 }
        );
        assert_eq!(DisclaimerLevel::LongTerm.precision(), PrecisionLevel::TimeOfDay);
        assert_eq!(DisclaimerLevel::Today.banner(), None);
        assert_eq!(DisclaimerLevel::LongTerm.banner(), Some(LONG_TERM_BANNER));
    }

    #[test]
    fn test_format_exact_and_window() {
        let instant = Utc.with_ymd_and_hms(2027, 6, 1, 4, 12, 0).unwrap();
        assert_eq!(PrecisionLevel::Exact.format_time(&instant), "04:12");
        assert_eq!(
            PrecisionLevel::Window { minutes: 30 }.format_time(&instant),
            "[03:57–04:27]"
        );
    }

    #[test]
    fn test_window_across_midnight() {
        let instant = Utc.with_ymd_and_hms(2027, 6, 1, 23, 50, 0).unwrap();
        assert_eq!(
            PrecisionLevel::Window { minutes: 30 }.format_time(&instant),
            "[23:35–00:05]"
        );
    }

    #[test]
    fn test_time_of_day_buckets() {
        let cases = [
            (0, "Early Morning"),
            (5, "Early Morning"),
            (6, "Morning"),
            (11, "Morning"),
            (12, "Noon"),
            (13, "Afternoon"),
            (16, "Afternoon"),
            (17, "Evening"),
            (19, "Evening"),
            (20, "Night"),
            (23, "Night"),
        ];
        for (hour, label) in cases {
            let instant = Utc.with_ymd_and_hms(2040, 1, 1, hour, 30, 0).unwrap();
            assert_eq!(PrecisionLevel::TimeOfDay.format_time(&instant), label);
        }
    }

    #[test]
    fn test_format_uses_instant_time_zone() {
        let instant = Utc
            .with_ymd_and_hms(2027, 6, 1, 1, 12, 0)
            .unwrap()
            .with_timezone(&chrono_tz::Asia::Riyadh);
        assert_eq!(PrecisionLevel::Exact.format_time(&instant), "04:12");
    }
}
