//! Configuration system for salah with validation and geo.toml integration.
//!
//! Settings are loaded from `salah.toml`, searched in this order:
//! 1. The directory given with `--config <dir>`
//! 2. **XDG_CONFIG_HOME**/salah/salah.toml
//!
//! A default file (located at the Kaaba) is created on first run.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Location]
//! latitude = 21.4225                # Geographic latitude (-90 to 90)
//! longitude = 39.8262               # Geographic longitude (-180 to 180)
//!
//! #[Calculation]
//! method = "muslim_world_league"    # Calculation method
//! madhab = "shafii"                 # Asr school: "hanafi", "shafii", "jafari"
//! high_latitude_rule = "twilight_angle"  # Optional, defaults to the method's rule
//!
//! #[Calendar]
//! calendar = "umm_al_qura"          # "civil", "tabular", "umm_al_qura", "astronomical"
//! hijri_offset_days = 0             # Local sighting offset (-2 to 2)
//! timezone = "Asia/Riyadh"          # Optional, derived from the coordinates otherwise
//!
//! [adjustments]                     # Optional minute offsets (-60 to 60)
//! fajr = 0
//! isha = 0
//!
//! [[custom_events]]                 # Optional personal dates on the Hijri calendar
//! name = "Anniversary"
//! day = 14
//! month = 3
//! year = 1440
//! recurring = true
//! ```
//!
//! ## geo.toml
//!
//! An optional `geo.toml` next to `salah.toml` overrides the coordinates, so
//! the main settings can be version controlled without publishing a location.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::geo::GeoCoordinate;
use crate::hijri::{CalendarVariant, CustomEvent, HijriDate, HijriMonth};
use crate::prayer::{
    CalculationMethod, CalculationParameters, HighLatitudeRule, Madhab, PrayerAdjustments,
};
use crate::projection::ProjectionOptions;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Coordinates stored separately in the optional geo.toml.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct GeoConfig {
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
}

/// A personal date as written in the settings file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConfigEvent {
    pub name: String,
    pub day: u32,
    /// Hijri month number, 1 (Muharram) to 12 (Dhu al-Hijjah)
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub recurring: bool,
}

/// Settings loaded from `salah.toml`.
///
/// Fields are optional in the file; [`load`] fills every `None` with its
/// default after validation, so code downstream of loading can rely on the
/// accessor methods.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub method: Option<CalculationMethod>,
    pub madhab: Option<Madhab>,
    /// `None` uses the method's recommended rule
    pub high_latitude_rule: Option<HighLatitudeRule>,

    pub calendar: Option<CalendarVariant>,
    pub hijri_offset_days: Option<i64>,
    /// IANA zone name for display
    pub timezone: Option<String>,

    pub adjustments: Option<PrayerAdjustments>,

    #[serde(default)]
    pub custom_events: Vec<ConfigEvent>,
}

impl Config {
    /// Load using automatic path detection, creating a default file if needed.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// Path of the optional geo.toml next to the active settings file.
    pub fn get_geo_path() -> Result<PathBuf> {
        let config_path = get_config_path()?;
        config_path
            .parent()
            .map(|p| p.join(GEO_FILE_NAME))
            .context("Could not determine config directory")
    }

    pub fn method(&self) -> CalculationMethod {
        self.method.unwrap_or(DEFAULT_METHOD)
    }

    pub fn madhab(&self) -> Madhab {
        self.madhab.unwrap_or(DEFAULT_MADHAB)
    }

    pub fn calendar(&self) -> CalendarVariant {
        self.calendar.unwrap_or(DEFAULT_CALENDAR)
    }

    pub fn hijri_offset_days(&self) -> i64 {
        self.hijri_offset_days.unwrap_or(DEFAULT_HIJRI_OFFSET_DAYS)
    }

    /// The configured location as a validated coordinate.
    pub fn coordinate(&self) -> Result<GeoCoordinate> {
        let latitude = self.latitude.unwrap_or(DEFAULT_LATITUDE);
        let longitude = self.longitude.unwrap_or(DEFAULT_LONGITUDE);
        GeoCoordinate::new(latitude, longitude).context("Configured location is invalid")
    }

    /// The configured display zone, if any.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| anyhow::anyhow!("Unknown time zone '{name}'"))
            })
            .transpose()
    }

    /// Parameter bundle for the prayer calculator.
    pub fn calculation_parameters(&self) -> CalculationParameters {
        let params = CalculationParameters::new(self.method(), self.madhab())
            .with_adjustments(self.adjustments.unwrap_or_default());
        match self.high_latitude_rule {
            Some(rule) => params.with_high_latitude_rule(rule),
            None => params,
        }
    }

    pub fn projection_options(&self) -> Result<ProjectionOptions> {
        Ok(ProjectionOptions {
            calendar: self.calendar(),
            hijri_offset_days: self.hijri_offset_days(),
            timezone: self.timezone()?,
        })
    }

    /// Custom events converted to calendar values.
    pub fn custom_events(&self) -> Result<Vec<CustomEvent>> {
        self.custom_events
            .iter()
            .map(|event| {
                let month = HijriMonth::from_number(event.month).with_context(|| {
                    format!(
                        "custom event '{}' has month {} (must be 1-12)",
                        event.name, event.month
                    )
                })?;
                let date = HijriDate::new(event.year, month, event.day)
                    .with_context(|| format!("custom event '{}' has an invalid day", event.name))?;
                Ok(CustomEvent {
                    name: event.name.clone(),
                    date,
                    recurring: event.recurring,
                })
            })
            .collect()
    }

    /// Log the effective settings as an indented block.
    pub fn log_config(&self, config_path: Option<&PathBuf>) {
        if let Some(path) = config_path {
            log_block_start!(
                "Loaded configuration from {}",
                crate::utils::private_path(path)
            );
        } else {
            log_block_start!("Loaded configuration");
        }

        let method = self.method();
        let madhab = self.madhab();
        match self.coordinate() {
            Ok(coordinate) => log_indented!("Location: {}", coordinate.display()),
            Err(_) => log_indented!("Location: invalid"),
        }
        log_indented!("Method: {} ({})", method.display_name(), method.description());
        log_indented!("Madhab: {}", madhab.display_name());
        log_indented!(
            "High latitude rule: {}",
            self.calculation_parameters()
                .effective_high_latitude_rule()
                .display_name()
        );
        log_indented!(
            "Calendar: {} (offset {} days)",
            self.calendar().as_str(),
            self.hijri_offset_days()
        );
        if let Some(tz) = &self.timezone {
            log_indented!("Time zone: {tz}");
        }
        if let Some(adjustments) = &self.adjustments
            && !adjustments.is_zero()
        {
            log_indented!(
                "Adjustments: fajr {:+}, sunrise {:+}, dhuhr {:+}, asr {:+}, maghrib {:+}, isha {:+}",
                adjustments.fajr,
                adjustments.sunrise,
                adjustments.dhuhr,
                adjustments.asr,
                adjustments.maghrib,
                adjustments.isha
            );
        }
    }
}

#[cfg(test)]
mod tests;
