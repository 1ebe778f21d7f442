//! Month command: a timetable for every day of a Gregorian month.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use super::CommandContext;
use crate::hijri;
use crate::prayer::{self, Prayer};

/// Number of days in the Gregorian month starting at `first`.
fn days_in_month(first: NaiveDate) -> Result<u32> {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .context("Month is outside the supported calendar range")?;
    Ok((next - first).num_days() as u32)
}

/// Handle the month command. `month` is any day in the target month.
pub fn handle_month_command(ctx: &CommandContext, month: Option<NaiveDate>) -> Result<()> {
    let reference = month.unwrap_or(ctx.today);
    let first = reference
        .with_day(1)
        .context("Failed to find the first day of the month")?;
    let days = days_in_month(first)?;

    let timetable = prayer::compute_range(ctx.coordinate, first, days, &ctx.params())
        .with_context(|| {
            format!("Failed to calculate prayer times for {}", first.format("%B %Y"))
        })?;

    if ctx.json {
        return super::print_json(&timetable);
    }

    log_version!();
    log_block_start!(
        "{} at {} ({})",
        first.format("%B %Y"),
        ctx.coordinate.display(),
        ctx.timezone.name()
    );
    log_block_start!(
        "{:<10} {:<18} {:>5} {:>7} {:>5} {:>5} {:>7} {:>5}",
        "Date",
        "Hijri",
        "Fajr",
        "Sunrise",
        "Dhuhr",
        "Asr",
        "Maghrib",
        "Isha"
    );

    let calendar = ctx.config.calendar();
    let offset = ctx.config.hijri_offset_days();
    for day in &timetable {
        let hijri_date = hijri::to_hijri_with_offset(day.date, calendar, offset);
        let cells: Vec<String> = Prayer::ALL
            .iter()
            .map(|p| ctx.local(day.time_for(*p)).format("%H:%M").to_string())
            .collect();
        log_indented!(
            "{:<10} {:<18} {:>5} {:>7} {:>5} {:>5} {:>7} {:>5}",
            day.date.format("%a %d"),
            format!("{} {}", hijri_date.day, hijri_date.month.name()),
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            cells[4],
            cells[5]
        );
    }

    let fallback_days = timetable
        .iter()
        .filter(|d| d.high_latitude_fallback.is_some())
        .count();
    if fallback_days > 0 {
        log_pipe!();
        log_info!(
            "{} of {} days use a high-latitude rule for Fajr or Isha",
            fallback_days,
            timetable.len()
        );
    }

    log_end!();
    Ok(())
}

/// Display help for the month command
pub fn display_help() {
    log_version!();
    log_block_start!("month - Prayer timetable for a month");
    log_block_start!("Usage: salah month [YYYY-MM]");
    log_block_start!("Arguments:");
    log_indented!("YYYY-MM  Month to calculate (default: the current month)");
    log_block_start!("Examples:");
    log_indented!("salah month");
    log_indented!("salah month 2025-03 --json");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        let first = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        assert_eq!(days_in_month(first(2024, 2)).unwrap(), 29);
        assert_eq!(days_in_month(first(2025, 2)).unwrap(), 28);
        assert_eq!(days_in_month(first(2024, 12)).unwrap(), 31);
        assert_eq!(days_in_month(first(2024, 4)).unwrap(), 30);
    }
}
