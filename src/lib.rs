//! # Salah Library
//!
//! Prayer times, Qibla direction and the Hijri calendar, plus the small host
//! layer used by the `salah` binary.
//!
//! This library exists to enable testing of the calculation core and provide
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! The calculation core is pure: every function takes its inputs (including
//! the date) explicitly and returns a value or a [`PrayerError`].
//!
//! - **Solar**: `geo::solar` solves sun events for a coordinate and day
//! - **Prayer**: `prayer` turns sun events into the five daily times
//! - **Qibla**: `geo::qibla` computes bearing and distance to the Kaaba
//! - **Calendar**: `hijri` converts Gregorian dates to the Hijri calendar
//! - **Projection**: `projection` adds a precision disclaimer for future dates
//!
//! The host layer reads `salah.toml` (`config`), parses arguments (`args`),
//! runs one-shot commands (`commands`) and pins "today" (`time_source`).

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Calculation core
pub mod error;
pub mod geo;
pub mod hijri;
pub mod prayer;
pub mod projection;

// Host layer
pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod time_source;
pub mod utils;

pub use error::{PrayerError, PrayerResult};
pub use geo::{GeoCoordinate, QiblaDirection, compute_qibla};
pub use hijri::{CalendarVariant, HijriDate, HijriMonth, to_hijri};
pub use prayer::{
    CalculationMethod, CalculationParameters, DailyPrayerTimes, HighLatitudeRule, Madhab, Prayer,
    compute as compute_prayer_times,
};
pub use projection::{
    DisclaimerLevel, FuturePrayerTimeResult, PrecisionLevel, project as project_future_prayer_times,
};
