//! Geographic and astronomical calculations.
//!
//! ## Module Structure
//!
//! - [`solar`]: low-precision solar position and the time solver for noon,
//!   depression angles and Asr shadow ratios
//! - [`qibla`]: great-circle bearing and distance to the Kaaba
//!
//! [`GeoCoordinate`] is the validated location value every calculation takes.
//! A coordinate can only be built through [`GeoCoordinate::new`] (or
//! deserialized through the same check), so downstream code never re-validates.

pub mod qibla;
pub mod solar;

pub use qibla::{CompassPoint, KAABA, QiblaDirection, compute_qibla};

use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tzf_rs::DefaultFinder;

use crate::error::{PrayerError, PrayerResult};


static TZ_FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = PrayerError;

    fn try_from(raw: RawCoordinate) -> PrayerResult<Self> {
        GeoCoordinate::new(raw.latitude, raw.longitude)
    }
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting latitudes outside [-90, 90], longitudes
    /// outside [-180, 180] and non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> PrayerResult<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(PrayerError::InvalidLocation {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Human readable form, e.g. `21.423°N, 39.826°E`.
    pub fn display(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        format!(
            "{:.3}°{}, {:.3}°{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }

    /// The IANA time zone covering this coordinate.
    ///
    /// Ocean coordinates resolve to the nautical `Etc/GMT±N` zones; anything
    /// the finder cannot name falls back to UTC.
    pub fn timezone(&self) -> Tz {
        determine_timezone_from_coordinates(self.latitude, self.longitude)
    }
}

/// Look up the time zone for a latitude/longitude pair.
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    let name = TZ_FINDER.get_tz_name(longitude, latitude);
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}
