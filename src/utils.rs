//! Small helpers shared by the config and command layers.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Display a path with the home directory replaced by `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{input}'. Use YYYY-MM-DD format"))
}

/// Parse a `YYYY-MM` month into its first day.
pub fn parse_year_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{input}'. Use YYYY-MM format"))
}

/// Parse a `lat,lon` pair.
pub fn parse_coordinates(input: &str) -> Result<(f64, f64)> {
    let (lat, lon) = input
        .split_once(',')
        .with_context(|| format!("Invalid coordinates '{input}'. Use <latitude>,<longitude>"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid latitude '{}'", lat.trim()))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid longitude '{}'", lon.trim()))?;
    Ok((lat, lon))
}
