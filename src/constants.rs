//! Application-wide constants and defaults.
//!
//! Defaults for every configuration field, the bounds validation enforces, and
//! a few well-known locations used by the test suites.

use crate::hijri::CalendarVariant;
use crate::prayer::{CalculationMethod, Madhab};

// # File Locations

pub const APP_DIR_NAME: &str = "salah";
pub const CONFIG_FILE_NAME: &str = "salah.toml";
pub const GEO_FILE_NAME: &str = "geo.toml";

// # Default Configuration Values

/// The Kaaba, used when no location has been configured yet.
pub const DEFAULT_LATITUDE: f64 = 21.4225;
pub const DEFAULT_LONGITUDE: f64 = 39.8262;

pub const DEFAULT_METHOD: CalculationMethod = CalculationMethod::MuslimWorldLeague;
pub const DEFAULT_MADHAB: Madhab = Madhab::Shafii;
pub const DEFAULT_CALENDAR: CalendarVariant = CalendarVariant::UmmAlQura;
pub const DEFAULT_HIJRI_OFFSET_DAYS: i64 = 0;

// # Validation Limits

pub const MINIMUM_HIJRI_OFFSET_DAYS: i64 = -2;
pub const MAXIMUM_HIJRI_OFFSET_DAYS: i64 = 2;

/// Largest per-prayer adjustment, in minutes, in either direction.
pub const MAXIMUM_ADJUSTMENT_MINUTES: i32 = 60;

// # Exit Codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[cfg(any(test, feature = "testing-support"))]
pub mod test_constants {
    pub const MECCA: (f64, f64) = (21.4225, 39.8262);
    pub const NEW_YORK: (f64, f64) = (40.7128, -74.0060);
    pub const LONDON: (f64, f64) = (51.5074, -0.1278);
    pub const KARACHI: (f64, f64) = (24.8607, 67.0011);
    pub const REYKJAVIK_LIKE: (f64, f64) = (64.0, -21.0);
    pub const SVALBARD: (f64, f64) = (78.2232, 15.6267);
}
