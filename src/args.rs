//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Global flags
//! (`--config`, `--debug`, `--log`) may appear anywhere; the first bare word
//! selects the command. Anything unrecognized turns into
//! [`CliAction::ShowHelpDueToError`] so the binary can print usage and exit
//! non-zero.

use crate::commands::frames::FramesOptions;
use crate::common::constants::DEFAULT_FRAME_TICKS;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Open the live view (the default)
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        log_file: Option<String>,
    },
    /// Print frames on a simulated clock
    Frames {
        debug_enabled: bool,
        config_dir: Option<String>,
        log_file: Option<String>,
        options: FramesOptions,
    },
    /// `help [COMMAND]`, or `--help` given together with a command
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

#[derive(Clone, Copy, PartialEq)]
enum Command {
    Run,
    Frames,
    Help,
}

impl Command {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "run" => Some(Self::Run),
            "frames" | "f" => Some(Self::Frames),
            "help" | "h" => Some(Self::Help),
            _ => None,
        }
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;

        let mut command: Option<Command> = None;
        let mut help_topic: Option<String> = None;

        let mut frames_flag_seen = false;
        let mut ticks = DEFAULT_FRAME_TICKS;
        let mut json = false;
        let mut speed = 0.0;

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            let value = value_after(&args_vec, i);

            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--config" | "-c" => match value {
                    Some(dir) => {
                        config_dir = Some(dir.to_string());
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                },
                "--log" | "-l" => match value {
                    Some(file) => {
                        log_file = Some(file.to_string());
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing file for --log. Usage: --log <file>");
                        unknown_arg_found = true;
                    }
                },
                "--ticks" | "-n" => {
                    frames_flag_seen = true;
                    match value.and_then(|v| v.parse::<usize>().ok()) {
                        Some(n) => {
                            ticks = n;
                            i += 1;
                        }
                        None => {
                            log_warning!("--ticks needs a whole number. Usage: --ticks <n>");
                            unknown_arg_found = true;
                        }
                    }
                }
                "--json" | "-j" => {
                    frames_flag_seen = true;
                    json = true;
                }
                "--speed" | "-s" => {
                    frames_flag_seen = true;
                    match value
                        .and_then(|v| v.parse::<f64>().ok())
                        .filter(|x| x.is_finite() && *x >= 0.0)
                    {
                        Some(x) => {
                            speed = x;
                            i += 1;
                        }
                        None => {
                            log_warning!(
                                "--speed needs a non-negative number. Usage: --speed <multiplier>"
                            );
                            unknown_arg_found = true;
                        }
                    }
                }
                _ if arg.starts_with('-') => {
                    log_warning!("Unknown argument: {arg}");
                    unknown_arg_found = true;
                }
                "version" if command.is_none() => display_version = true,
                _ => match command {
                    None => match Command::from_word(arg) {
                        Some(cmd) => command = Some(cmd),
                        None => {
                            log_warning!("Unknown command: {arg}");
                            unknown_arg_found = true;
                        }
                    },
                    Some(Command::Help) if help_topic.is_none() => {
                        help_topic = Some(arg.to_string());
                    }
                    Some(_) => {
                        log_warning!("Unexpected argument: {arg}");
                        unknown_arg_found = true;
                    }
                },
            }
            i += 1;
        }

        if frames_flag_seen && command != Some(Command::Frames) {
            log_warning!("--ticks, --json and --speed only apply to the frames command");
            unknown_arg_found = true;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            match command {
                Some(Command::Frames) => CliAction::Help {
                    command: Some("frames".to_string()),
                },
                Some(Command::Run) => CliAction::Help {
                    command: Some("run".to_string()),
                },
                _ => CliAction::ShowHelp,
            }
        } else {
            match command {
                None | Some(Command::Run) => CliAction::Run {
                    debug_enabled,
                    config_dir,
                    log_file,
                },
                Some(Command::Frames) => CliAction::Frames {
                    debug_enabled,
                    config_dir,
                    log_file,
                    options: FramesOptions { ticks, json, speed },
                },
                Some(Command::Help) => CliAction::Help {
                    command: help_topic,
                },
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// The argument after `index`, unless it looks like another flag.
fn value_after(args: &[String], index: usize) -> Option<&str> {
    args.get(index + 1)
        .map(String::as_str)
        .filter(|next| !next.starts_with('-'))
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        ParsedArgs::parse(std::iter::once("showreel").chain(args.iter().copied())).action
    }

    fn run(debug_enabled: bool, config_dir: Option<&str>, log_file: Option<&str>) -> CliAction {
        CliAction::Run {
            debug_enabled,
            config_dir: config_dir.map(str::to_string),
            log_file: log_file.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), run(false, None, None));
        assert_eq!(parse(&["run"]), run(false, None, None));
    }

    #[test]
    fn test_parse_global_flags() {
        assert_eq!(parse(&["--debug"]), run(true, None, None));
        assert_eq!(parse(&["-d"]), run(true, None, None));
        assert_eq!(
            parse(&["--config", "/tmp/reel", "run", "--log", "out.log"]),
            run(false, Some("/tmp/reel"), Some("out.log"))
        );
        assert_eq!(
            parse(&["run", "-c", "/tmp/reel", "-d"]),
            run(true, Some("/tmp/reel"), None)
        );
    }

    #[test]
    fn test_parse_missing_flag_values() {
        assert_eq!(parse(&["--config"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--log", "--debug"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-h"]), CliAction::ShowHelp);
        assert_eq!(parse(&["--version"]), CliAction::ShowVersion);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
        assert_eq!(parse(&["-v"]), CliAction::ShowVersion);
        assert_eq!(parse(&["version"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_version_takes_precedence() {
        assert_eq!(parse(&["--help", "--version"]), CliAction::ShowVersion);
        assert_eq!(parse(&["--bogus", "--version"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_unknown_arguments() {
        assert_eq!(parse(&["--bogus"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["dance"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["run", "extra"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--debug", "--bogus"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_frames_defaults() {
        assert_eq!(
            parse(&["frames"]),
            CliAction::Frames {
                debug_enabled: false,
                config_dir: None,
                log_file: None,
                options: FramesOptions {
                    ticks: DEFAULT_FRAME_TICKS,
                    json: false,
                    speed: 0.0,
                },
            }
        );
    }

    #[test]
    fn test_parse_frames_options() {
        assert_eq!(
            parse(&["f", "--ticks", "10", "--json", "--speed", "2.5", "-d"]),
            CliAction::Frames {
                debug_enabled: true,
                config_dir: None,
                log_file: None,
                options: FramesOptions {
                    ticks: 10,
                    json: true,
                    speed: 2.5,
                },
            }
        );
        assert_eq!(
            parse(&["-n", "3", "-j", "frames"]),
            CliAction::Frames {
                debug_enabled: false,
                config_dir: None,
                log_file: None,
                options: FramesOptions {
                    ticks: 3,
                    json: true,
                    speed: 0.0,
                },
            }
        );
    }

    #[test]
    fn test_parse_frames_bad_values() {
        assert_eq!(parse(&["frames", "--ticks", "many"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["frames", "--speed", "-1"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["frames", "--speed", "inf"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_frames_flags_require_frames_command() {
        assert_eq!(parse(&["--json"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["run", "--ticks", "4"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(parse(&["help"]), CliAction::Help { command: None });
        assert_eq!(
            parse(&["h", "frames"]),
            CliAction::Help {
                command: Some("frames".to_string())
            }
        );
        assert_eq!(
            parse(&["frames", "--help"]),
            CliAction::Help {
                command: Some("frames".to_string())
            }
        );
        assert_eq!(parse(&["help", "a", "b"]), CliAction::ShowHelpDueToError);
    }
}
