//! Error types for the calculation core.
//!
//! Every core entry point returns either a value or a [`PrayerError`]. There is
//! no retry logic and no "best guess" value on failure: callers decide how to
//! surface the error to the user.

use chrono::NaiveDate;

/// Result type for core calculations.
pub type PrayerResult<T> = Result<T, PrayerError>;

/// Failures of the prayer, Qibla and calendar calculations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrayerError {
    /// Coordinate outside the valid latitude/longitude range (or not finite).
    #[error(
        "invalid location: latitude must be within -90..=90 and longitude within -180..=180 (got {latitude}, {longitude})"
    )]
    InvalidLocation { latitude: f64, longitude: f64 },

    /// Even the high-latitude fallback cannot produce five ordered times.
    #[error(
        "prayer times cannot be calculated reliably at this latitude on this date (latitude {latitude:.4}, {date})"
    )]
    UnsolvableAtLatitude { latitude: f64, date: NaiveDate },

    /// The five times were not strictly increasing after all corrections.
    #[error("computed prayer times are out of order on {date}: {detail}")]
    ComputationOrderingViolation { date: NaiveDate, detail: String },

    /// Calendar components that do not name a real day.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl PrayerError {
    /// Whether the failure is a limitation of the location rather than a defect.
    pub fn is_latitude_limitation(&self) -> bool {
        matches!(self, PrayerError::UnsolvableAtLatitude { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsolvable_message_is_user_facing() {
        let err = PrayerError::UnsolvableAtLatitude {
            latitude: 78.22,
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cannot be calculated reliably at this latitude"));
        assert!(err.is_latitude_limitation());
    }

    #[test]
    fn test_invalid_location_mentions_values() {
        let err = PrayerError::InvalidLocation {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(err.to_string().contains("91"));
        assert!(!err.is_latitude_limitation());
    }
}
