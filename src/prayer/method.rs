//! Named calculation methods and their published parameters.

use serde::{Deserialize, Serialize};

use super::high_latitude::HighLatitudeRule;
use super::madhab::Madhab;
use super::PrayerAdjustments;

/// How a method defines the start of Isha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IshaRule {
    /// Sun this many degrees below the horizon
    Angle(f64),
    /// A fixed interval after Maghrib
    MinutesAfterMaghrib(i64),
}

/// A published parameter set for Fajr and Isha.
///
/// Exactly one method is active for any calculation. Each variant carries its
/// constants through the accessor functions below; there is no shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    MuslimWorldLeague,
    Egyptian,
    Karachi,
    UmmAlQura,
    MoonsightingCommittee,
    NorthAmerica,
    Kuwait,
    Qatar,
    Singapore,
    Jafari,
    Tehran,
    FcnaCanada,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 12] = [
        CalculationMethod::MuslimWorldLeague,
        CalculationMethod::Egyptian,
        CalculationMethod::Karachi,
        CalculationMethod::UmmAlQura,
        CalculationMethod::MoonsightingCommittee,
        CalculationMethod::NorthAmerica,
        CalculationMethod::Kuwait,
        CalculationMethod::Qatar,
        CalculationMethod::Singapore,
        CalculationMethod::Jafari,
        CalculationMethod::Tehran,
        CalculationMethod::FcnaCanada,
    ];

    /// Sun depression at Fajr, in degrees.
    pub fn fajr_angle(&self) -> f64 {
        match self {
            CalculationMethod::MuslimWorldLeague => 18.0,
            CalculationMethod::Egyptian => 19.5,
            CalculationMethod::Karachi => 18.0,
            CalculationMethod::UmmAlQura => 18.5,
            CalculationMethod::MoonsightingCommittee => 18.0,
            CalculationMethod::NorthAmerica => 15.0,
            CalculationMethod::Kuwait => 18.0,
            CalculationMethod::Qatar => 18.0,
            CalculationMethod::Singapore => 20.0,
            CalculationMethod::Jafari => 16.0,
            CalculationMethod::Tehran => 17.7,
            CalculationMethod::FcnaCanada => 13.0,
        }
    }

    pub fn isha_rule(&self) -> IshaRule {
        match self {
            CalculationMethod::MuslimWorldLeague => IshaRule::Angle(17.0),
            CalculationMethod::Egyptian => IshaRule::Angle(17.5),
            CalculationMethod::Karachi => IshaRule::Angle(18.0),
            CalculationMethod::UmmAlQura => IshaRule::MinutesAfterMaghrib(90),
            CalculationMethod::MoonsightingCommittee => IshaRule::Angle(18.0),
            CalculationMethod::NorthAmerica => IshaRule::Angle(15.0),
            CalculationMethod::Kuwait => IshaRule::Angle(17.5),
            CalculationMethod::Qatar => IshaRule::MinutesAfterMaghrib(90),
            CalculationMethod::Singapore => IshaRule::Angle(18.0),
            CalculationMethod::Jafari => IshaRule::Angle(14.0),
            CalculationMethod::Tehran => IshaRule::Angle(14.0),
            CalculationMethod::FcnaCanada => IshaRule::Angle(13.0),
        }
    }

    /// Minute offsets published alongside the method's angles.
    pub fn method_adjustments(&self) -> PrayerAdjustments {
        match self {
            CalculationMethod::MuslimWorldLeague | CalculationMethod::Singapore => {
                PrayerAdjustments {
                    dhuhr: 1,
                    ..PrayerAdjustments::default()
                }
            }
            CalculationMethod::MoonsightingCommittee => PrayerAdjustments {
                dhuhr: 5,
                maghrib: 3,
                ..PrayerAdjustments::default()
            },
            _ => PrayerAdjustments::default(),
        }
    }

    /// The high-latitude rule the method's authors recommend.
    pub fn high_latitude_rule(&self) -> HighLatitudeRule {
        match self {
            CalculationMethod::MoonsightingCommittee => HighLatitudeRule::SeventhOfTheNight,
            _ => HighLatitudeRule::TwilightAngle,
        }
    }

    pub fn compatible_madhabs(&self) -> &'static [Madhab] {
        match self {
            CalculationMethod::Jafari | CalculationMethod::Tehran => &[Madhab::Jafari],
            _ => &[Madhab::Hanafi, Madhab::Shafii],
        }
    }

    pub fn preferred_madhab(&self) -> Option<Madhab> {
        match self {
            CalculationMethod::Karachi => Some(Madhab::Hanafi),
            CalculationMethod::Egyptian | CalculationMethod::UmmAlQura => Some(Madhab::Shafii),
            CalculationMethod::Jafari | CalculationMethod::Tehran => Some(Madhab::Jafari),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationMethod::MuslimWorldLeague => "Muslim World League",
            CalculationMethod::Egyptian => "Egyptian General Authority of Survey",
            CalculationMethod::Karachi => "University of Islamic Sciences, Karachi",
            CalculationMethod::UmmAlQura => "Umm al-Qura University, Makkah",
            CalculationMethod::MoonsightingCommittee => "Moonsighting Committee Worldwide",
            CalculationMethod::NorthAmerica => "Islamic Society of North America",
            CalculationMethod::Kuwait => "Kuwait",
            CalculationMethod::Qatar => "Qatar",
            CalculationMethod::Singapore => "Majlis Ugama Islam Singapura",
            CalculationMethod::Jafari => "Shia Ithna-Ashari, Leva Institute, Qum",
            CalculationMethod::Tehran => "Institute of Geophysics, University of Tehran",
            CalculationMethod::FcnaCanada => "Fiqh Council of North America (Canada)",
        }
    }

    /// Short summary of the angles, e.g. `Fajr 18°, Isha 17°`.
    pub fn description(&self) -> String {
        match self.isha_rule() {
            IshaRule::Angle(isha) => format!("Fajr {}°, Isha {}°", self.fajr_angle(), isha),
            IshaRule::MinutesAfterMaghrib(minutes) => format!(
                "Fajr {}°, Isha {} min after Maghrib",
                self.fajr_angle(),
                minutes
            ),
        }
    }

    /// Key used in the configuration file.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMethod::MuslimWorldLeague => "muslim_world_league",
            CalculationMethod::Egyptian => "egyptian",
            CalculationMethod::Karachi => "karachi",
            CalculationMethod::UmmAlQura => "umm_al_qura",
            CalculationMethod::MoonsightingCommittee => "moonsighting_committee",
            CalculationMethod::NorthAmerica => "north_america",
            CalculationMethod::Kuwait => "kuwait",
            CalculationMethod::Qatar => "qatar",
            CalculationMethod::Singapore => "singapore",
            CalculationMethod::Jafari => "jafari",
            CalculationMethod::Tehran => "tehran",
            CalculationMethod::FcnaCanada => "fcna_canada",
        }
    }
}

/// Advisory classification of a method/madhab pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatus {
    Recommended,
    Compatible,
    Neutral,
    Incompatible,
}

impl CompatibilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityStatus::Recommended => "recommended",
            CompatibilityStatus::Compatible => "compatible",
            CompatibilityStatus::Neutral => "neutral",
            CompatibilityStatus::Incompatible => "incompatible",
        }
    }
}

/// Whether `madhab` is among the method's declared madhabs.
///
/// Advisory only: calculation proceeds either way.
pub fn is_compatible(method: CalculationMethod, madhab: Madhab) -> bool {
    method.compatible_madhabs().contains(&madhab)
}

pub fn compatibility_status(method: CalculationMethod, madhab: Madhab) -> CompatibilityStatus {
    if !is_compatible(method, madhab) {
        return CompatibilityStatus::Incompatible;
    }
    match method.preferred_madhab() {
        Some(preferred) if preferred == madhab => CompatibilityStatus::Recommended,
        Some(_) => CompatibilityStatus::Compatible,
        None => CompatibilityStatus::Neutral,
    }
}
