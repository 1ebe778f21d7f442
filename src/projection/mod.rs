//! Prayer times for arbitrary dates, with an honest precision level.
//!
//! A projection is a normal daily computation plus everything a display
//! needs to avoid overstating accuracy: the disclaimer level for the distance
//! from today, the precision to format with, the Hijri date and the local
//! time zone of the coordinate.

pub mod policy;

pub use policy::{
    DisclaimerLevel, LONG_TERM_BANNER, MEDIUM_TERM_BANNER, PrecisionLevel, SHORT_TERM_BANNER,
    TimeOfDay, disclaimer_level, months_between,
};

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::PrayerResult;
use crate::geo::GeoCoordinate;
use crate::hijri::{self, CalendarVariant, HijriDate};
use crate::prayer::{
    self, CalculationMethod, CalculationParameters, DailyPrayerTimes, Madhab, Prayer,
};

/// Calendar and display settings for a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionOptions {
    pub calendar: CalendarVariant,
    /// Local sighting offset applied before the Hijri conversion
    pub hijri_offset_days: i64,
    /// `None` derives the zone from the coordinate
    pub timezone: Option<Tz>,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            calendar: CalendarVariant::UmmAlQura,
            hijri_offset_days: 0,
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuturePrayerTimeResult {
    pub times: DailyPrayerTimes,
    pub disclaimer: DisclaimerLevel,
    pub precision: PrecisionLevel,
    pub hijri_date: HijriDate,
    pub is_ramadan: bool,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
}

fn serialize_tz<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

impl FuturePrayerTimeResult {
    pub fn banner(&self) -> Option<&'static str> {
        self.disclaimer.banner()
    }

    pub fn local_time(&self, prayer: Prayer) -> DateTime<Tz> {
        self.times.time_for(prayer).with_timezone(&self.timezone)
    }

    /// The five prayers formatted at the result's precision, in local time.
    pub fn formatted(&self) -> Vec<(Prayer, String)> {
        Prayer::FIVE
            .iter()
            .map(|prayer| (*prayer, self.precision.format_time(&self.local_time(*prayer))))
            .collect()
    }
}

/// Project with the method's defaults and the Umm al-Qura calendar.
pub fn project(
    coordinate: GeoCoordinate,
    date: NaiveDate,
    method: CalculationMethod,
    madhab: Madhab,
    today: NaiveDate,
) -> PrayerResult<FuturePrayerTimeResult> {
    project_with(
        coordinate,
        date,
        &CalculationParameters::new(method, madhab),
        &ProjectionOptions::default(),
        today,
    )
}

pub fn project_with(
    coordinate: GeoCoordinate,
    date: NaiveDate,
    params: &CalculationParameters,
    options: &ProjectionOptions,
    today: NaiveDate,
) -> PrayerResult<FuturePrayerTimeResult> {
    let times = prayer::compute_with(coordinate, date, params)?;
    let disclaimer = disclaimer_level(date, today);
    let hijri_date = hijri::to_hijri_with_offset(date, options.calendar, options.hijri_offset_days);
    let timezone = options.timezone.unwrap_or_else(|| coordinate.timezone());

    log_debug!(
        "Projection for {} is {} months from {} ({})",
        date,
        months_between(today, date),
        today,
        disclaimer.as_str()
    );

    Ok(FuturePrayerTimeResult {
        times,
        disclaimer,
        precision: disclaimer.precision(),
        is_ramadan: hijri_date.is_ramadan(),
        hijri_date,
        timezone,
    })
}
