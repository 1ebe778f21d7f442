//! Qibla bearing engine.
//!
//! Initial great-circle bearing and haversine distance from any point to the
//! Kaaba. Pure geometry: the only input is the (already validated) coordinate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::GeoCoordinate;

/// Coordinate of the Kaaba, Masjid al-Haram, Mecca.
pub const KAABA: GeoCoordinate = GeoCoordinate {
    latitude: 21.4225,
    longitude: 39.8262,
};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this distance the bearing has no meaning.
const DEGENERATE_DISTANCE_KM: f64 = 1e-6;

/// The sixteen points of the compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Bucket a bearing into one of 16 points: `round(bearing / 22.5) mod 16`.
    pub fn from_bearing(bearing_degrees: f64) -> Self {
        let index = (bearing_degrees.rem_euclid(360.0) / 22.5).round() as usize % 16;
        Self::ALL[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

/// Direction and distance to the Kaaba from a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QiblaDirection {
    /// Initial great-circle bearing, clockwise from true north, in [0, 360)
    pub bearing_degrees: f64,
    pub distance_km: f64,
    pub from_location: GeoCoordinate,
    pub computed_at: DateTime<Utc>,
}

impl QiblaDirection {
    pub fn compass_direction(&self) -> CompassPoint {
        CompassPoint::from_bearing(self.bearing_degrees)
    }

    /// True at the Kaaba itself, where any bearing is as good as another.
    pub fn is_degenerate(&self) -> bool {
        self.distance_km < DEGENERATE_DISTANCE_KM
    }
}

/// Bearing and distance from `from` to the Kaaba, stamped with `computed_at`.
pub fn bearing_and_distance(from: GeoCoordinate, computed_at: DateTime<Utc>) -> QiblaDirection {
    let lat1 = from.latitude.to_radians();
    let lat2 = KAABA.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (KAABA.longitude - from.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let distance_km = 2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin();

    let bearing_degrees = if distance_km < DEGENERATE_DISTANCE_KM {
        0.0
    } else {
        let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
        // rem_euclid of a tiny negative value rounds up to exactly 360.0
        if bearing >= 360.0 { 0.0 } else { bearing }
    };

    QiblaDirection {
        bearing_degrees,
        distance_km,
        from_location: from,
        computed_at,
    }
}

/// Qibla direction from `from`, stamped with the current time source instant.
pub fn compute_qibla(from: GeoCoordinate) -> QiblaDirection {
    bearing_and_distance(from, crate::time_source::now())
}
