//! Default config creation.
//!
//! Writes a commented `salah.toml` through a small builder that aligns the
//! inline comments of every setting into one column.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::hijri::CalendarVariant;
use crate::prayer::CalculationMethod;

/// Create a default settings file at `path`.
///
/// When a geo.toml already sits next to it, the coordinates are left out of
/// the main file so they stay private.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let use_geo_file = path
        .parent()
        .map(|p| p.join(GEO_FILE_NAME).exists())
        .unwrap_or(false);

    fs::write(path, default_config_content(!use_geo_file))
        .with_context(|| format!("Failed to write default config to {}", path.display()))
}

/// The text of a default settings file.
pub(crate) fn default_config_content(include_coordinates: bool) -> String {
    let methods = CalculationMethod::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let calendars = CalendarVariant::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = ConfigBuilder::new();
    if include_coordinates {
        builder = builder
            .add_section("Location")
            .add_setting(
                "latitude",
                &format!("{DEFAULT_LATITUDE:.4}"),
                "Geographic latitude (-90 to 90)",
            )
            .add_setting(
                "longitude",
                &format!("{DEFAULT_LONGITUDE:.4}"),
                "Geographic longitude (-180 to 180)",
            );
    }

    let content = builder
        .add_section("Calculation")
        .add_setting(
            "method",
            &format!("\"{}\"", DEFAULT_METHOD.as_str()),
            &format!("One of: {methods}"),
        )
        .add_setting(
            "madhab",
            &format!("\"{}\"", DEFAULT_MADHAB.as_str()),
            "Asr school: \"hanafi\", \"shafii\" or \"jafari\"",
        )
        .add_section("Calendar")
        .add_setting(
            "calendar",
            &format!("\"{}\"", DEFAULT_CALENDAR.as_str()),
            &format!("Hijri calendar: {calendars}"),
        )
        .add_setting(
            "hijri_offset_days",
            &DEFAULT_HIJRI_OFFSET_DAYS.to_string(),
            &format!(
                "Local moon sighting offset ({MINIMUM_HIJRI_OFFSET_DAYS} to {MAXIMUM_HIJRI_OFFSET_DAYS}) days"
            ),
        )
        .add_table("adjustments")
        .add_setting(
            "fajr",
            "0",
            &format!("Minute offsets (-{MAXIMUM_ADJUSTMENT_MINUTES} to {MAXIMUM_ADJUSTMENT_MINUTES})"),
        )
        .add_setting("dhuhr", "0", "")
        .add_setting("asr", "0", "")
        .add_setting("maghrib", "0", "")
        .add_setting("isha", "0", "")
        .build();

    format!("{content}\n")
}

/// Builder for settings files with aligned inline comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    /// `#[Title]` comment heading
    Section(String),
    /// `[name]` TOML table header
    Table(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_table(mut self, name: &str) -> Self {
        self.entries.push(ConfigEntry::Table(format!("[{name}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        let comment = if comment.is_empty() {
            String::new()
        } else {
            format!("# {comment}")
        };
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment,
        });
        self
    }

    fn build(self) -> String {
        // One space between the longest setting and its comment
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(header) | ConfigEntry::Table(header) => {
                    if !result.is_empty() {
                        result.push(String::new());
                    }
                    result.push(header);
                }
                ConfigEntry::Setting { line, comment } if comment.is_empty() => {
                    result.push(line);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
