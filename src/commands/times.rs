//! Times command: the prayer schedule for a single day.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::CommandContext;
use crate::hijri::{self, HijriDate};
use crate::prayer::{self, DailyPrayerTimes, NightPortions, Prayer};

#[derive(Serialize)]
struct DayReport<'a> {
    #[serde(flatten)]
    times: &'a DailyPrayerTimes,
    timezone: &'a str,
    hijri_date: HijriDate,
    night: Option<NightPortions>,
}

/// Handle the times command.
pub fn handle_times_command(ctx: &CommandContext, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or(ctx.today);
    let params = ctx.params();

    let times = prayer::compute_with(ctx.coordinate, date, &params)
        .with_context(|| format!("Failed to calculate prayer times for {date}"))?;

    // Night portions need the following day's Fajr; skip them if it fails
    let night = date
        .succ_opt()
        .and_then(|next| prayer::compute_with(ctx.coordinate, next, &params).ok())
        .map(|next| times.night_portions(next.fajr));

    let hijri_date = hijri::to_hijri_with_offset(
        date,
        ctx.config.calendar(),
        ctx.config.hijri_offset_days(),
    );

    if ctx.json {
        return super::print_json(&DayReport {
            times: &times,
            timezone: ctx.timezone.name(),
            hijri_date,
            night,
        });
    }

    log_version!();
    log_block_start!(
        "Prayer times for {} ({})",
        date.format("%A, %-d %B %Y"),
        hijri_date.format()
    );
    log_indented!("{} ({})", ctx.coordinate.display(), ctx.timezone.name());
    log_indented!(
        "{}, {}",
        times.method.display_name(),
        times.madhab.display_name()
    );

    log_block_start!("Schedule:");
    let now = crate::time_source::now();
    let next = (date == ctx.today).then(|| times.next_prayer(now)).flatten();
    for prayer in Prayer::ALL {
        let marker = if Some(prayer) == next { "  <- next" } else { "" };
        log_indented!(
            "{:<8} {}{}",
            prayer.name(),
            ctx.local(times.time_for(prayer)).format("%H:%M"),
            marker
        );
    }

    if let Some(night) = night {
        log_block_start!("Night:");
        log_indented!(
            "Middle     {}",
            ctx.local(night.middle_of_night).format("%H:%M")
        );
        log_indented!("Last third {}", ctx.local(night.last_third).format("%H:%M"));
    }

    if let Some(rule) = times.high_latitude_fallback {
        log_pipe!();
        log_info!(
            "Fajr or Isha uses the {} rule at this latitude",
            rule.display_name()
        );
    }

    log_end!();
    Ok(())
}

/// Display help for the times command
pub fn display_help() {
    log_version!();
    log_block_start!("times - Prayer times for one day");
    log_block_start!("Usage: salah times [DATE]");
    log_block_start!("Arguments:");
    log_indented!("DATE  Day to calculate, as YYYY-MM-DD (default: today)");
    log_block_start!("Notes:");
    log_indented!("Running salah with no command is the same as 'salah times'");
    log_indented!("Times are shown in the location's time zone");
    log_block_start!("Examples:");
    log_indented!("salah times");
    log_indented!("salah times 2025-03-01");
    log_indented!("salah --at 51.5074,-0.1278 times --json");
    log_end!();
}
