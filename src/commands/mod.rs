//! Command-line command handlers for salah.
//!
//! Each command lives in its own submodule with a `handle_*_command` entry
//! point and a `display_help` function. Handlers share a [`CommandContext`]
//! built once from the settings file and the global options.

pub mod help;
pub mod hijri;
pub mod month;
pub mod project;
pub mod qibla;
pub mod times;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::GlobalOptions;
use crate::config::{self, Config};
use crate::geo::GeoCoordinate;
use crate::logger::Log;
use crate::prayer::CalculationParameters;

/// Settings and environment resolved for one invocation.
pub struct CommandContext {
    pub config: Config,
    pub coordinate: GeoCoordinate,
    /// Zone used to display instants
    pub timezone: Tz,
    pub today: NaiveDate,
    pub json: bool,
}

impl CommandContext {
    /// Load the settings file and apply the command-line overrides.
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let config_path: PathBuf = config::get_config_path()?;
        let config = config::load()?;

        if Log::is_debug() {
            config.log_config(Some(&config_path));
        }

        let coordinate = match options.location {
            Some((latitude, longitude)) => GeoCoordinate::new(latitude, longitude)
                .context("Coordinates given with --at are invalid")?,
            None => config.coordinate()?,
        };

        let timezone = match config.timezone()? {
            Some(tz) if options.location.is_none() => tz,
            // A configured zone does not apply to an ad-hoc location
            _ => coordinate.timezone(),
        };
        log_debug!("Using time zone {}", timezone.name());

        Ok(Self {
            config,
            coordinate,
            timezone,
            today: crate::time_source::today(),
            json: options.json,
        })
    }

    pub fn params(&self) -> CalculationParameters {
        self.config.calculation_parameters()
    }

    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}
