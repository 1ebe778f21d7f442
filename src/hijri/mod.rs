//! Hijri calendar conversion.
//!
//! Four calendar variants are selectable through [`CalendarVariant`], each
//! dispatching to a pure conversion:
//!
//! - `Civil` and `Tabular`: the 30-year arithmetic calendar with the Friday and
//!   Thursday epochs. Conversion in both directions is exact.
//! - `UmmAlQura` and `Astronomical`: month starts derived from computed new
//!   moons (see [`lunar`]). The inverse is exact within that model, but the
//!   model only approximates calendars fixed by sighting or by committee, so
//!   a published date may differ by a day.

pub mod events;
pub mod lunar;
pub mod tabular;

pub use events::{
    CustomEvent, EventCategory, EventMatch, ISLAMIC_EVENTS, IslamicEvent, events_on_date,
    next_occurrence,
};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

use crate::error::{PrayerError, PrayerResult};
use lunar::Criterion;

const JDN_OF_CE_DAY_ZERO: i64 = 1_721_425;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HijriMonth {
    Muharram,
    Safar,
    RabiAlAwwal,
    RabiAlThani,
    JumadaAlUla,
    JumadaAlThani,
    Rajab,
    Shaban,
    Ramadan,
    Shawwal,
    DhuAlQadah,
    DhuAlHijjah,
}

impl HijriMonth {
    pub const ALL: [HijriMonth; 12] = [
        HijriMonth::Muharram,
        HijriMonth::Safar,
        HijriMonth::RabiAlAwwal,
        HijriMonth::RabiAlThani,
        HijriMonth::JumadaAlUla,
        HijriMonth::JumadaAlThani,
        HijriMonth::Rajab,
        HijriMonth::Shaban,
        HijriMonth::Ramadan,
        HijriMonth::Shawwal,
        HijriMonth::DhuAlQadah,
        HijriMonth::DhuAlHijjah,
    ];

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<HijriMonth> {
        Self::ALL.get((number as usize).checked_sub(1)?).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            HijriMonth::Muharram => "Muharram",
            HijriMonth::Safar => "Safar",
            HijriMonth::RabiAlAwwal => "Rabi al-Awwal",
            HijriMonth::RabiAlThani => "Rabi al-Thani",
            HijriMonth::JumadaAlUla => "Jumada al-Ula",
            HijriMonth::JumadaAlThani => "Jumada al-Thani",
            HijriMonth::Rajab => "Rajab",
            HijriMonth::Shaban => "Sha'ban",
            HijriMonth::Ramadan => "Ramadan",
            HijriMonth::Shawwal => "Shawwal",
            HijriMonth::DhuAlQadah => "Dhu al-Qa'dah",
            HijriMonth::DhuAlHijjah => "Dhu al-Hijjah",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HijriEra {
    AnnoHegirae,
}

impl HijriEra {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HijriEra::AnnoHegirae => "AH",
        }
    }
}

/// A day in the Hijri calendar. Ordered by year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub day: u32,
    pub month: HijriMonth,
    pub year: i32,
    pub era: HijriEra,
}

impl Ord for HijriDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for HijriDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HijriDate {
    /// Build a date, checking only that the day is within 1..=30.
    ///
    /// Whether day 30 exists depends on the calendar variant; that is checked
    /// by [`gregorian_date`].
    pub fn new(year: i32, month: HijriMonth, day: u32) -> PrayerResult<Self> {
        if !(1..=30).contains(&day) {
            return Err(PrayerError::InvalidDate(format!(
                "Hijri day must be within 1..=30 (got {day})"
            )));
        }
        Ok(Self {
            day,
            month,
            year,
            era: HijriEra::AnnoHegirae,
        })
    }

    /// E.g. `9 Ramadan 1445 AH`.
    pub fn format(&self) -> String {
        format!(
            "{} {} {} {}",
            self.day,
            self.month.name(),
            self.year,
            self.era.abbreviation()
        )
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == HijriMonth::Ramadan
    }

    fn month_number(&self) -> i64 {
        (self.year as i64 - 1) * 12 + (self.month.number() as i64 - 1)
    }

    fn from_month_number(n: i64, day: u32) -> Self {
        Self {
            day,
            month: HijriMonth::ALL[n.rem_euclid(12) as usize],
            year: (n.div_euclid(12) + 1) as i32,
            era: HijriEra::AnnoHegirae,
        }
    }
}

/// The calendar algorithm used for Gregorian/Hijri conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarVariant {
    /// Arithmetic calendar, Friday epoch
    Civil,
    /// Arithmetic calendar, Thursday epoch
    Tabular,
    /// Conjunction before sunset in Mecca
    #[default]
    UmmAlQura,
    /// Conjunction before 12:00 UTC
    Astronomical,
}

impl CalendarVariant {
    pub const ALL: [CalendarVariant; 4] = [
        CalendarVariant::Civil,
        CalendarVariant::Tabular,
        CalendarVariant::UmmAlQura,
        CalendarVariant::Astronomical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarVariant::Civil => "civil",
            CalendarVariant::Tabular => "tabular",
            CalendarVariant::UmmAlQura => "umm_al_qura",
            CalendarVariant::Astronomical => "astronomical",
        }
    }

    /// Whether the Gregorian inverse is exact for real-world dates.
    pub fn has_exact_inverse(&self) -> bool {
        matches!(self, CalendarVariant::Civil | CalendarVariant::Tabular)
    }

    fn epoch(&self) -> Option<i64> {
        match self {
            CalendarVariant::Civil => Some(tabular::CIVIL_EPOCH),
            CalendarVariant::Tabular => Some(tabular::ASTRONOMICAL_EPOCH),
            _ => None,
        }
    }

    fn criterion(&self) -> Criterion {
        match self {
            CalendarVariant::Astronomical => Criterion::NoonUtc,
            _ => Criterion::MeccaSunset,
        }
    }
}

fn jdn_of(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + JDN_OF_CE_DAY_ZERO
}

fn date_of_jdn(jdn: i64) -> Option<NaiveDate> {
    let days = i32::try_from(jdn - JDN_OF_CE_DAY_ZERO).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Gregorian years the lunation series is evaluated over.
pub const LUNAR_YEAR_RANGE: RangeInclusive<i32> = -4000..=9999;

/// Hijri date of a Gregorian date.
///
/// Total over every [`NaiveDate`]. The lunation variants follow the new-moon
/// series only within [`LUNAR_YEAR_RANGE`]; outside it they use the civil
/// arithmetic calendar.
pub fn to_hijri(date: NaiveDate, variant: CalendarVariant) -> HijriDate {
    match variant.epoch() {
        Some(epoch) => tabular_to_hijri(date, epoch),
        None if LUNAR_YEAR_RANGE.contains(&date.year()) => {
            lunar_to_hijri(date, variant.criterion())
        }
        None => tabular_to_hijri(date, tabular::CIVIL_EPOCH),
    }
}

fn tabular_to_hijri(date: NaiveDate, epoch: i64) -> HijriDate {
    let (year, month, day) = tabular::from_jdn(jdn_of(date), epoch);
    HijriDate::from_month_number((year - 1) * 12 + (month as i64 - 1), day)
}

fn lunar_to_hijri(date: NaiveDate, criterion: Criterion) -> HijriDate {
    let (n, start) = lunar::month_containing(date, criterion);
    HijriDate::from_month_number(n, (date - start).num_days() as u32 + 1)
}

/// Hijri date after shifting the Gregorian date by a local sighting offset.
///
/// Communities that start months a day or two away from the computed
/// calendar configure this offset instead of a different variant.
/// The shift saturates at the ends of the supported Gregorian range.
pub fn to_hijri_with_offset(
    date: NaiveDate,
    variant: CalendarVariant,
    offset_days: i64,
) -> HijriDate {
    let shifted = Duration::try_days(offset_days)
        .and_then(|offset| date.checked_add_signed(offset))
        .unwrap_or(if offset_days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        });
    to_hijri(shifted, variant)
}

/// Number of days in a Hijri month under a variant.
pub fn days_in_month(year: i32, month: HijriMonth, variant: CalendarVariant) -> u32 {
    match variant.epoch() {
        Some(_) => tabular::month_length(year as i64, month.number()),
        None => {
            let n = (year as i64 - 1) * 12 + (month.number() as i64 - 1);
            lunar::month_length(n, variant.criterion())
        }
    }
}

/// Gregorian date of a Hijri date.
///
/// Exact for `Civil` and `Tabular`. For the lunation variants it inverts the
/// same model [`to_hijri`] uses, which is itself an approximation.
pub fn gregorian_date(hijri: HijriDate, variant: CalendarVariant) -> PrayerResult<NaiveDate> {
    let length = days_in_month(hijri.year, hijri.month, variant);
    if hijri.day == 0 || hijri.day > length {
        return Err(PrayerError::InvalidDate(format!(
            "{} has only {} days in the {} calendar (got day {})",
            hijri.month.name(),
            length,
            variant.as_str(),
            hijri.day
        )));
    }

    let out_of_range =
        || PrayerError::InvalidDate(format!("{} is outside the Gregorian range", hijri.format()));

    match variant.epoch() {
        Some(epoch) => {
            let jdn = tabular::to_jdn(hijri.year as i64, hijri.month.number(), hijri.day, epoch);
            date_of_jdn(jdn).ok_or_else(out_of_range)
        }
        None => {
            let start = lunar::month_start(hijri.month_number(), variant.criterion());
            start
                .checked_add_signed(Duration::days(hijri.day as i64 - 1))
                .ok_or_else(out_of_range)
        }
    }
}
