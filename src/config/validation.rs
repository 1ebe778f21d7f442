//! Configuration validation functionality.
//!
//! Rejects values no calculation can use and warns about combinations that
//! compute fine but are unusual.

use anyhow::Result;

use super::Config;
use crate::constants::*;
use crate::prayer::{CompatibilityStatus, Prayer, compatibility_status};

/// Validate a loaded (and geo.toml-merged) configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(lat.is_finite() && (-90.0..=90.0).contains(&lat))
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(lon.is_finite() && (-180.0..=180.0).contains(&lon))
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if let Some(offset) = config.hijri_offset_days
        && !(MINIMUM_HIJRI_OFFSET_DAYS..=MAXIMUM_HIJRI_OFFSET_DAYS).contains(&offset)
    {
        anyhow::bail!(
            "hijri_offset_days ({}) must be between {} and {}",
            offset,
            MINIMUM_HIJRI_OFFSET_DAYS,
            MAXIMUM_HIJRI_OFFSET_DAYS
        );
    }

    if let Some(adjustments) = &config.adjustments {
        for prayer in Prayer::ALL {
            let minutes = adjustments.minutes_for(prayer);
            if minutes.unsigned_abs() > MAXIMUM_ADJUSTMENT_MINUTES.unsigned_abs() {
                anyhow::bail!(
                    "adjustments.{} ({} minutes) must be between -{} and {} minutes",
                    prayer.name().to_lowercase(),
                    minutes,
                    MAXIMUM_ADJUSTMENT_MINUTES,
                    MAXIMUM_ADJUSTMENT_MINUTES
                );
            }
        }
    }

    // Unknown zone names are a typo, not something to silently ignore
    config.timezone()?;

    config.custom_events()?;

    validate_method_madhab(config);

    Ok(())
}

/// Warn (but never fail) when the madhab is not one the method lists.
fn validate_method_madhab(config: &Config) {
    let method = config.method();
    let madhab = config.madhab();
    if compatibility_status(method, madhab) == CompatibilityStatus::Incompatible {
        log_pipe!();
        log_warning!(
            "{} is not usually paired with the {} method",
            madhab.display_name(),
            method.display_name()
        );
        log_indented!("Prayer times will still be calculated with these settings");
    }
}
