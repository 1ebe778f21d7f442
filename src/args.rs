//! Command-line argument parsing and processing.
//!
//! This module turns raw arguments into a [`CliAction`] for `main.rs`. Global
//! options may appear anywhere on the line; the first bare word selects the
//! command and anything after it is that command's argument. Unknown input is
//! reported with a warning and mapped to [`CliAction::ShowHelpDueToError`].

use chrono::NaiveDate;

use crate::utils::{parse_coordinates, parse_date, parse_year_month};

/// Options accepted by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub debug_enabled: bool,
    /// `--config <dir>`
    pub config_dir: Option<String>,
    /// `--at <lat,lon>` overrides the configured location
    pub location: Option<(f64, f64)>,
    /// `--today <date>` pins the reference date
    pub today: Option<NaiveDate>,
    /// `--json` prints a JSON document instead of the decorated log
    pub json: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Prayer times for one day (today when `date` is `None`)
    Times {
        options: GlobalOptions,
        date: Option<NaiveDate>,
    },
    /// A month timetable; `month` is the first day of the month
    Month {
        options: GlobalOptions,
        month: Option<NaiveDate>,
    },
    /// Qibla bearing and distance
    Qibla { options: GlobalOptions },
    /// Hijri date and events
    Hijri {
        options: GlobalOptions,
        date: Option<NaiveDate>,
    },
    /// Prayer times for a future date with a precision disclaimer
    Project {
        options: GlobalOptions,
        date: NaiveDate,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Display detailed help for one command
    ShowCommandHelp { command: String },
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Canonical name of a command or its short alias.
pub fn canonical_command(name: &str) -> Option<&'static str> {
    match name {
        "times" | "t" => Some("times"),
        "month" | "m" => Some("month"),
        "qibla" | "q" => Some("qibla"),
        "hijri" | "H" => Some("hijri"),
        "project" | "p" => Some("project"),
        "help" => Some("help"),
        _ => None,
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments, including the program
    ///   name (typically from `std::env::args()`)
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParsedArgs {
            action: parse_action(args),
        }
    }

    /// Parse the process arguments.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_action<I, S>(args: I) -> CliAction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args_vec: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|s| s.as_ref().to_string())
        .collect();

    // Version takes precedence over everything else
    if args_vec
        .iter()
        .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
    {
        return CliAction::ShowVersion;
    }

    let mut options = GlobalOptions::default();
    let mut display_help = false;
    let mut positionals: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args_vec.len() {
        let arg = &args_vec[i];
        match arg.as_str() {
            "--help" | "-h" => display_help = true,
            "--debug" | "-d" => options.debug_enabled = true,
            "--json" | "-j" => options.json = true,
            "--config" | "-c" => {
                // Parse: --config <directory>
                match args_vec.get(i + 1).filter(|v| !v.starts_with('-')) {
                    Some(dir) => {
                        options.config_dir = Some(dir.clone());
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        return CliAction::ShowHelpDueToError;
                    }
                }
            }
            "--at" | "-a" => {
                // Negative latitudes start with '-', so any next value is taken
                let Some(value) = args_vec.get(i + 1) else {
                    log_warning!("Missing coordinates for --at. Usage: --at <latitude>,<longitude>");
                    return CliAction::ShowHelpDueToError;
                };
                match parse_coordinates(value) {
                    Ok(location) => options.location = Some(location),
                    Err(e) => {
                        log_warning!("{e:#}");
                        return CliAction::ShowHelpDueToError;
                    }
                }
                i += 1;
            }
            "--today" => {
                let Some(value) = args_vec.get(i + 1) else {
                    log_warning!("Missing date for --today. Usage: --today <YYYY-MM-DD>");
                    return CliAction::ShowHelpDueToError;
                };
                match parse_date(value) {
                    Ok(date) => options.today = Some(date),
                    Err(e) => {
                        log_warning!("{e:#}");
                        return CliAction::ShowHelpDueToError;
                    }
                }
                i += 1;
            }
            flag if flag.starts_with('-') => {
                log_warning!("Unknown option: {}", flag);
                return CliAction::ShowHelpDueToError;
            }
            _ => positionals.push(arg.clone()),
        }
        i += 1;
    }

    let Some(command) = positionals.first() else {
        if display_help {
            return CliAction::ShowHelp;
        }
        return CliAction::Times {
            options,
            date: None,
        };
    };

    let Some(command) = canonical_command(command) else {
        log_warning!("Unknown command: {}", command);
        return CliAction::ShowHelpDueToError;
    };

    if command == "help" {
        return match positionals.get(1) {
            Some(topic) => CliAction::ShowCommandHelp {
                command: topic.clone(),
            },
            None => CliAction::ShowHelp,
        };
    }

    if display_help {
        return CliAction::ShowCommandHelp {
            command: command.to_string(),
        };
    }

    let argument = positionals.get(1).map(String::as_str);
    if let Some(extra) = positionals.get(2) {
        log_warning!("Unexpected argument for {}: {}", command, extra);
        return CliAction::ShowHelpDueToError;
    }

    match command {
        "times" => match parse_optional(argument, parse_date) {
            Ok(date) => CliAction::Times { options, date },
            Err(()) => CliAction::ShowHelpDueToError,
        },
        "month" => match parse_optional(argument, parse_year_month) {
            Ok(month) => CliAction::Month { options, month },
            Err(()) => CliAction::ShowHelpDueToError,
        },
        "hijri" => match parse_optional(argument, parse_date) {
            Ok(date) => CliAction::Hijri { options, date },
            Err(()) => CliAction::ShowHelpDueToError,
        },
        "qibla" => match argument {
            None => CliAction::Qibla { options },
            Some(extra) => {
                log_warning!("Unexpected argument for qibla: {}", extra);
                CliAction::ShowHelpDueToError
            }
        },
        "project" => match parse_optional(argument, parse_date) {
            Ok(Some(date)) => CliAction::Project { options, date },
            Ok(None) => {
                log_warning!("Missing date. Usage: salah project <YYYY-MM-DD>");
                CliAction::ShowHelpDueToError
            }
            Err(()) => CliAction::ShowHelpDueToError,
        },
        _ => CliAction::ShowHelpDueToError,
    }
}

/// Parse an optional positional, logging the failure.
fn parse_optional<T>(
    value: Option<&str>,
    parser: fn(&str) -> anyhow::Result<T>,
) -> Result<Option<T>, ()> {
    match value.map(parser).transpose() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            log_warning!("{e:#}");
            Err(())
        }
    }
}

/// Display version information.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Display general usage and all options.
pub fn display_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage: salah [OPTIONS] [COMMAND]");
    log_block_start!("Commands:");
    log_indented!("times, t [DATE]       Prayer times for a day (default: today)");
    log_indented!("month, m [YYYY-MM]    Timetable for a month (default: this month)");
    log_indented!("qibla, q              Direction and distance to the Kaaba");
    log_indented!("hijri, H [DATE]       Hijri date and Islamic events");
    log_indented!("project, p <DATE>     Future prayer times with a precision notice");
    log_indented!("help [COMMAND]        Show detailed help for a command");
    log_block_start!("Options:");
    log_indented!("-a, --at <LAT,LON>    Use these coordinates instead of the configured ones");
    log_indented!("-c, --config <DIR>    Use a custom configuration directory");
    log_indented!("-d, --debug           Enable detailed debug output");
    log_indented!("-j, --json            Print results as JSON");
    log_indented!("    --today <DATE>    Treat DATE as today");
    log_indented!("-h, --help            Print help information");
    log_indented!("-V, --version         Print version information");
    log_end!();
}
