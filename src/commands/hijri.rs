//! Hijri command: the Islamic calendar date, events and upcoming observances.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::CommandContext;
use crate::hijri::{
    self, CalendarVariant, EventMatch, HijriDate, ISLAMIC_EVENTS, events_on_date, next_occurrence,
};

/// How many upcoming observances to list.
const UPCOMING_COUNT: usize = 3;

#[derive(Serialize)]
struct Upcoming {
    name: &'static str,
    date: NaiveDate,
    days_away: i64,
}

#[derive(Serialize)]
struct HijriReport<'a> {
    gregorian: NaiveDate,
    hijri_date: HijriDate,
    formatted: String,
    calendar: CalendarVariant,
    days_in_month: u32,
    events: Vec<EventMatch<'a>>,
    upcoming: Vec<Upcoming>,
}

/// The next `count` annual observances strictly after `from`.
fn upcoming_events(
    from: NaiveDate,
    variant: CalendarVariant,
    count: usize,
) -> Result<Vec<Upcoming>> {
    let after = from
        .succ_opt()
        .context("Date is at the end of the supported range")?;
    let mut upcoming = Vec::with_capacity(ISLAMIC_EVENTS.len());
    for event in &ISLAMIC_EVENTS {
        let date = next_occurrence(event, after, variant)
            .with_context(|| format!("Failed to find the next {}", event.name))?;
        upcoming.push(Upcoming {
            name: event.name,
            date,
            days_away: (date - from).num_days(),
        });
    }
    upcoming.sort_by_key(|u| u.date);
    upcoming.truncate(count);
    Ok(upcoming)
}

/// Handle the hijri command.
pub fn handle_hijri_command(ctx: &CommandContext, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or(ctx.today);
    let variant = ctx.config.calendar();
    let hijri_date = hijri::to_hijri_with_offset(date, variant, ctx.config.hijri_offset_days());
    let days_in_month = hijri::days_in_month(hijri_date.year, hijri_date.month, variant);

    let custom = ctx.config.custom_events()?;
    let events = events_on_date(&hijri_date, &custom);
    let upcoming = upcoming_events(date, variant, UPCOMING_COUNT)?;

    if ctx.json {
        return super::print_json(&HijriReport {
            gregorian: date,
            hijri_date,
            formatted: hijri_date.format(),
            calendar: variant,
            days_in_month,
            events,
            upcoming,
        });
    }

    log_version!();
    log_block_start!("{}", date.format("%A, %-d %B %Y"));
    log_indented!("{}", hijri_date.format());
    log_indented!(
        "{} has {} days ({} calendar)",
        hijri_date.month.name(),
        days_in_month,
        variant.as_str()
    );
    if !variant.has_exact_inverse() {
        log_indented!("Month starts follow the computed new moon and may differ from local sighting");
    }

    if !events.is_empty() {
        log_block_start!("Today:");
        for event in &events {
            match event {
                EventMatch::Annual(e) => log_indented!("{} - {}", e.name, e.significance),
                EventMatch::Custom(e) => log_indented!("{}", e.name),
            }
        }
    }

    log_block_start!("Upcoming:");
    for u in &upcoming {
        log_indented!(
            "{:<28} {} (in {} days)",
            u.name,
            u.date.format("%-d %b %Y"),
            u.days_away
        );
    }

    log_end!();
    Ok(())
}

/// Display help for the hijri command
pub fn display_help() {
    log_version!();
    log_block_start!("hijri - Islamic calendar date");
    log_block_start!("Usage: salah hijri [DATE]");
    log_block_start!("Arguments:");
    log_indented!("DATE  Gregorian day to convert, as YYYY-MM-DD (default: today)");
    log_block_start!("Configuration:");
    log_indented!("calendar           civil, tabular, umm_al_qura or astronomical");
    log_indented!("hijri_offset_days  Shift by -2 to 2 days to match local sighting");
    log_indented!("[[custom_events]]  Personal dates shown alongside the observances");
    log_block_start!("Examples:");
    log_indented!("salah hijri");
    log_indented!("salah hijri 2024-03-11");
    log_end!();
}
