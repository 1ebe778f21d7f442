//! Safe bounds for Fajr and Isha where twilight never ends.
//!
//! Above roughly 48° the sun may not reach the Fajr/Isha depression during
//! summer, or reaches it absurdly close to midnight. Each rule gives a portion
//! of the night (sunset to next sunrise); Fajr may be no earlier than
//! `sunrise − portion·night` and Isha no later than `sunset + portion·night`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighLatitudeRule {
    /// Half of the night
    MiddleOfTheNight,
    /// One seventh of the night
    SeventhOfTheNight,
    /// `angle / 60` of the night ("Angle-Based")
    TwilightAngle,
}

impl HighLatitudeRule {
    /// Fraction of the night allotted to a twilight of `angle` degrees.
    pub fn night_portion(&self, angle: f64) -> f64 {
        match self {
            HighLatitudeRule::MiddleOfTheNight => 1.0 / 2.0,
            HighLatitudeRule::SeventhOfTheNight => 1.0 / 7.0,
            HighLatitudeRule::TwilightAngle => angle / 60.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HighLatitudeRule::MiddleOfTheNight => "Middle of the Night",
            HighLatitudeRule::SeventhOfTheNight => "One-Seventh of the Night",
            HighLatitudeRule::TwilightAngle => "Angle-Based",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HighLatitudeRule::MiddleOfTheNight => "middle_of_the_night",
            HighLatitudeRule::SeventhOfTheNight => "seventh_of_the_night",
            HighLatitudeRule::TwilightAngle => "twilight_angle",
        }
    }
}

fn portion_of(night: Duration, portion: f64) -> Duration {
    Duration::milliseconds((night.num_milliseconds() as f64 * portion).round() as i64)
}

/// Earliest acceptable Fajr.
pub fn safe_fajr(
    rule: HighLatitudeRule,
    angle: f64,
    sunrise: DateTime<Utc>,
    night: Duration,
) -> DateTime<Utc> {
    sunrise - portion_of(night, rule.night_portion(angle))
}

/// Latest acceptable Isha.
pub fn safe_isha(
    rule: HighLatitudeRule,
    angle: f64,
    sunset: DateTime<Utc>,
    night: Duration,
) -> DateTime<Utc> {
    sunset + portion_of(night, rule.night_portion(angle))
}
