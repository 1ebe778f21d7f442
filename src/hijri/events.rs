//! Annual Islamic observances and user-defined events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CalendarVariant, HijriDate, HijriMonth, gregorian_date, to_hijri};
use crate::error::PrayerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Celebration,
    Commemoration,
    Fasting,
    SacredNight,
    Pilgrimage,
}

/// An observance that falls on the same Hijri day every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IslamicEvent {
    pub name: &'static str,
    pub day: u32,
    pub month: HijriMonth,
    pub category: EventCategory,
    pub significance: &'static str,
}

pub static ISLAMIC_EVENTS: [IslamicEvent; 9] = [
    IslamicEvent {
        name: "Islamic New Year",
        day: 1,
        month: HijriMonth::Muharram,
        category: EventCategory::Commemoration,
        significance: "Start of the Hijri year, marking the migration to Medina",
    },
    IslamicEvent {
        name: "Day of Ashura",
        day: 10,
        month: HijriMonth::Muharram,
        category: EventCategory::Fasting,
        significance: "Recommended fast commemorating the deliverance of Musa",
    },
    IslamicEvent {
        name: "Mawlid an-Nabi",
        day: 12,
        month: HijriMonth::RabiAlAwwal,
        category: EventCategory::Commemoration,
        significance: "Birth of the Prophet Muhammad",
    },
    IslamicEvent {
        name: "Isra and Mi'raj",
        day: 27,
        month: HijriMonth::Rajab,
        category: EventCategory::SacredNight,
        significance: "The Night Journey and Ascension",
    },
    IslamicEvent {
        name: "Start of Ramadan",
        day: 1,
        month: HijriMonth::Ramadan,
        category: EventCategory::Fasting,
        significance: "First day of the month of fasting",
    },
    IslamicEvent {
        name: "Laylat al-Qadr",
        day: 27,
        month: HijriMonth::Ramadan,
        category: EventCategory::SacredNight,
        significance: "The Night of Power, better than a thousand months",
    },
    IslamicEvent {
        name: "Eid al-Fitr",
        day: 1,
        month: HijriMonth::Shawwal,
        category: EventCategory::Celebration,
        significance: "Festival of breaking the fast",
    },
    IslamicEvent {
        name: "Hajj (Day of Tarwiyah)",
        day: 8,
        month: HijriMonth::DhuAlHijjah,
        category: EventCategory::Pilgrimage,
        significance: "Beginning of the Hajj rites",
    },
    IslamicEvent {
        name: "Eid al-Adha",
        day: 10,
        month: HijriMonth::DhuAlHijjah,
        category: EventCategory::Celebration,
        significance: "Festival of the sacrifice",
    },
];

/// A user-added event. Recurring events match the same day and month of any
/// year; others only their exact date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub name: String,
    pub date: HijriDate,
    #[serde(default)]
    pub recurring: bool,
}

impl CustomEvent {
    pub fn matches(&self, date: &HijriDate) -> bool {
        let same_day = self.date.day == date.day && self.date.month == date.month;
        same_day && (self.recurring || self.date.year == date.year)
    }
}

/// An event falling on a queried date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventMatch<'a> {
    Annual(&'static IslamicEvent),
    Custom(&'a CustomEvent),
}

impl EventMatch<'_> {
    pub fn name(&self) -> &str {
        match self {
            EventMatch::Annual(event) => event.name,
            EventMatch::Custom(event) => &event.name,
        }
    }
}

/// Annual observances on `date` (year ignored), followed by matching custom
/// events.
pub fn events_on_date<'a>(date: &HijriDate, custom: &'a [CustomEvent]) -> Vec<EventMatch<'a>> {
    let annual = ISLAMIC_EVENTS
        .iter()
        .filter(|e| e.day == date.day && e.month == date.month)
        .map(EventMatch::Annual);
    let user = custom
        .iter()
        .filter(|e| e.matches(date))
        .map(EventMatch::Custom);
    annual.chain(user).collect()
}

/// Gregorian date of the next occurrence of `event` on or after `from`.
pub fn next_occurrence(
    event: &IslamicEvent,
    from: NaiveDate,
    variant: CalendarVariant,
) -> PrayerResult<NaiveDate> {
    let today = to_hijri(from, variant);
    let this_year = HijriDate::new(today.year, event.month, event.day)?;
    let target = if this_year >= today {
        this_year
    } else {
        HijriDate::new(today.year + 1, event.month, event.day)?
    };
    gregorian_date(target, variant)
}
