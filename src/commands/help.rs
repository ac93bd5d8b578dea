//! Help output for showreel and its commands.

use crate::common::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Run the help command (dispatcher)
pub fn run_help_command(command: Option<&str>) {
    match command {
        None => display_general_help(),
        Some("frames") | Some("f") => super::frames::display_help(),
        Some("run") => display_run_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {unknown}");
            display_general_help();
        }
    }
}

/// Display the full usage screen (`--help`).
pub fn display_general_help() {
    log_version!();
    log_block_start!("Usage: showreel [OPTIONS] [COMMAND]");
    log_block_start!("Commands:");
    log_indented!("run                     Open the live view (default)");
    log_indented!("frames, f               Print frames on a simulated clock");
    log_indented!("help, h [COMMAND]       Show detailed help for a command");
    log_block_start!("Options:");
    log_indented!("-c, --config <DIR>      Use <DIR>/{CONFIG_FILE_NAME} instead of the default");
    log_indented!("-d, --debug             Enable detailed debug output");
    log_indented!("-l, --log <FILE>        Write log output to <FILE>");
    log_indented!("-h, --help              Print help information");
    log_indented!("-V, --version           Print version information");
    log_block_start!("Configuration:");
    log_indented!("$XDG_CONFIG_HOME/{CONFIG_DIR_NAME}/{CONFIG_FILE_NAME}, created on first run");
    log_end!();
}

fn display_run_help() {
    log_version!();
    log_block_start!("run - Open the live view");
    log_block_start!("Usage: showreel [run] [OPTIONS]");
    log_block_start!("Keys:");
    log_indented!("left/right, h/l   Previous / next review");
    log_indented!("1-9               Jump to a review");
    log_indented!("space             Pause or resume autoplay");
    log_indented!("f                 Cycle the project filter");
    log_indented!("q, Esc, Ctrl-C    Quit");
    log_block_start!("Mouse:");
    log_indented!("Hovering the review card pauses autoplay; clicking a dot jumps to it");
    log_block_start!("Signals:");
    log_indented!("SIGHUP, SIGUSR2   Reload the configuration file");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: showreel help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("showreel help");
    log_indented!("showreel help frames");
    log_end!();
}
