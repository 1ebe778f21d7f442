//! Time source abstraction for supporting both real and fixed "today".
//!
//! Prayer-time and calendar calculations take their date explicitly. Only the
//! host layer asks "what day is it?" (and the Qibla result stamps the instant
//! it was computed), through this module so the answer can be pinned
//! (`--today`) for reproducible projections and tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current instant
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date in the local time zone
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }

    /// Check if this source is pinned to a fixed date
    fn is_fixed(&self) -> bool;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn is_fixed(&self) -> bool {
        false
    }
}

/// A time source frozen at a given instant.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
    date: NaiveDate,
}

impl FixedTimeSource {
    /// Pin "today" to `date`, with "now" at local noon of that date.
    pub fn new(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        let instant = Local
            .from_local_datetime(&noon)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&noon));
        Self { instant, date }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn today(&self) -> NaiveDate {
        self.date
    }

    fn is_fixed(&self) -> bool {
        true
    }
}

/// Install the process-wide time source. Can only be done once.
pub fn init(source: Arc<dyn TimeSource>) -> anyhow::Result<()> {
    TIME_SOURCE
        .set(source)
        .map_err(|_| anyhow::anyhow!("Time source already initialized"))
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

/// Current instant from the installed time source.
pub fn now() -> DateTime<Utc> {
    source().now()
}

/// Today's date from the installed time source.
pub fn today() -> NaiveDate {
    source().today()
}

/// Whether "today" has been pinned.
pub fn is_fixed() -> bool {
    TIME_SOURCE.get().is_some_and(|s| s.is_fixed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2027, 3, 9).unwrap();
        let source = FixedTimeSource::new(date);
        assert_eq!(source.today(), date);
        assert!(source.is_fixed());
        assert_eq!(source.now(), source.now());
    }

    #[test]
    fn test_real_source_is_not_fixed() {
        assert!(!RealTimeSource.is_fixed());
    }
}
