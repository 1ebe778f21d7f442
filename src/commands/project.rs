//! Project command: prayer times for a future date with a precision notice.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::CommandContext;
use crate::projection::{self, DisclaimerLevel};

/// Handle the project command.
pub fn handle_project_command(ctx: &CommandContext, date: NaiveDate) -> Result<()> {
    let mut options = ctx.config.projection_options()?;
    options.timezone = Some(ctx.timezone);

    let result = projection::project_with(ctx.coordinate, date, &ctx.params(), &options, ctx.today)
        .with_context(|| format!("Failed to project prayer times for {date}"))?;

    if ctx.json {
        return super::print_json(&result);
    }

    log_version!();
    log_block_start!(
        "Projected prayer times for {} ({})",
        date.format("%A, %-d %B %Y"),
        result.hijri_date.format()
    );
    log_indented!("{} ({})", ctx.coordinate.display(), result.timezone.name());
    if result.is_ramadan {
        log_indented!("Falls in Ramadan");
    }

    if let Some(banner) = result.banner() {
        log_pipe!();
        match result.disclaimer {
            DisclaimerLevel::ShortTerm => log_info!("{}", banner),
            _ => log_warning!("{}", banner),
        }
    }

    log_block_start!("Schedule:");
    for (prayer, formatted) in result.formatted() {
        log_indented!("{:<8} {}", prayer.name(), formatted);
    }

    log_end!();
    Ok(())
}

/// Display help for the project command
pub fn display_help() {
    log_version!();
    log_block_start!("project - Prayer times for a future date");
    log_block_start!("Usage: salah project <DATE>");
    log_block_start!("Arguments:");
    log_indented!("DATE  Target day, as YYYY-MM-DD");
    log_block_start!("Precision:");
    log_indented!("Up to 12 months ahead   exact minutes");
    log_indented!("Up to 5 years ahead     30-minute windows");
    log_indented!("Further ahead           time of day only");
    log_block_start!("Examples:");
    log_indented!("salah project 2026-02-18");
    log_indented!("salah --today 2025-01-01 project 2031-06-01 --json");
    log_end!();
}
