//! Binary entry point: parse arguments and dispatch.
//!
//! Global setup shared by the commands that load configuration (`--config`
//! directory, `--log` file routing) happens here so each command starts from
//! the same environment. Errors are reported once, in the logger's style, and
//! turn into a non-zero exit code.

use anyhow::Result;

use showreel::args::{CliAction, ParsedArgs, display_version_info};
use showreel::commands::{frames, help};
use showreel::common::constants::EXIT_FAILURE;
use showreel::common::logger::Log;
use showreel::config;
use showreel::{Showreel, log_error_exit, log_indented};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::Run {
            debug_enabled,
            config_dir,
            log_file,
        } => with_environment(config_dir, log_file, || {
            Showreel::new(debug_enabled).run()
        }),
        CliAction::Frames {
            debug_enabled,
            config_dir,
            log_file,
            options,
        } => with_environment(config_dir, log_file, || {
            frames::run_frames_command(&options, debug_enabled)
        }),
        CliAction::Help { command } => {
            help::run_help_command(command.as_deref());
            Ok(())
        }
        CliAction::ShowHelp => {
            help::display_general_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            display_version_info();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            help::display_general_help();
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(e) = result {
        if Log::is_routed_to_file() {
            // The file logger has shut down by now
            eprintln!("showreel: {e:#}");
        } else {
            log_error_exit!("{e}");
            for cause in e.chain().skip(1) {
                log_indented!("{cause}");
            }
        }
        std::process::exit(EXIT_FAILURE);
    }
}

/// Apply `--config` and `--log`, then run `body` while file logging is active.
fn with_environment(
    config_dir: Option<String>,
    log_file: Option<String>,
    body: impl FnOnce() -> Result<()>,
) -> Result<()> {
    config::set_config_dir(config_dir)?;

    let _log_guard = match log_file {
        Some(path) => Some(Log::start_file_logging(path)?),
        None => None,
    };

    body()
}
