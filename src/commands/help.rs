//! Help command implementation for salah.
//!
//! This module provides a dispatcher for the help command that shows
//! command-specific help or general help based on the arguments provided.

use crate::args::canonical_command;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) {
    match command.map(|c| canonical_command(c).ok_or(c)) {
        None => display_general_help(),
        Some(Ok("times")) => super::times::display_help(),
        Some(Ok("month")) => super::month::display_help(),
        Some(Ok("qibla")) => super::qibla::display_help(),
        Some(Ok("hijri")) => super::hijri::display_help(),
        Some(Ok("project")) => super::project::display_help(),
        Some(Ok(_)) => display_help_help(),
        Some(Err(unknown)) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("times, t [DATE]       Prayer times for a day");
    log_indented!("month, m [YYYY-MM]    Timetable for a month");
    log_indented!("qibla, q              Direction and distance to the Kaaba");
    log_indented!("hijri, H [DATE]       Hijri date and Islamic events");
    log_indented!("project, p <DATE>     Future prayer times with a precision notice");
    log_indented!("help [COMMAND]        Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'salah help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'salah --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: salah help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("salah help");
    log_indented!("salah help project");
    log_end!();
}
