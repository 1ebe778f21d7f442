//! Main application entry point and high-level flow coordination.
//!
//! Parses the command line, configures the ambient state (logging, config
//! directory, time source) and hands off to the matching command handler:
//!
//! 1. Argument parsing and early exit for help/version
//! 2. Logger, config directory and "today" setup from the global options
//! 3. Settings loading into a `CommandContext`
//! 4. Command dispatch
//!
//! Errors from any step are logged with their context chain and turn into a
//! non-zero exit code.

use anyhow::Result;
use std::sync::Arc;

use salah::args::{self, CliAction, GlobalOptions, ParsedArgs};
use salah::commands::{self, CommandContext};
use salah::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use salah::logger::Log;
use salah::time_source::{self, FixedTimeSource};
use salah::{config, log_end, log_error_exit};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let code = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::ShowCommandHelp { command } => {
            commands::help::run_help_command(Some(command.as_str()));
            EXIT_SUCCESS
        }
        action => match run(action) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                // JSON mode silences the logger; errors still need to reach the user
                Log::set_enabled(true);
                log_error_exit!("{:#}", e);
                log_end!();
                EXIT_FAILURE
            }
        },
    };

    std::process::exit(code);
}

/// Set up the ambient state for a command and run it.
fn run(action: CliAction) -> Result<()> {
    let options = match &action {
        CliAction::Times { options, .. }
        | CliAction::Month { options, .. }
        | CliAction::Qibla { options }
        | CliAction::Hijri { options, .. }
        | CliAction::Project { options, .. } => options.clone(),
        _ => GlobalOptions::default(),
    };

    Log::set_debug(options.debug_enabled);
    if options.json {
        Log::set_enabled(false);
    }

    config::set_config_dir(options.config_dir.clone())?;
    if let Some(today) = options.today {
        time_source::init(Arc::new(FixedTimeSource::new(today)))?;
    }

    let ctx = CommandContext::load(&options)?;

    match action {
        CliAction::Times { date, .. } => commands::times::handle_times_command(&ctx, date),
        CliAction::Month { month, .. } => commands::month::handle_month_command(&ctx, month),
        CliAction::Qibla { .. } => commands::qibla::handle_qibla_command(&ctx),
        CliAction::Hijri { date, .. } => commands::hijri::handle_hijri_command(&ctx, date),
        CliAction::Project { date, .. } => commands::project::handle_project_command(&ctx, date),
        _ => Ok(()),
    }
}
