//! Structured logging with box-drawing output.
//!
//! Every log line is prefixed with a pipe glyph so that a run reads as one
//! continuous block in the terminal:
//!
//! ```text
//! ┏ showreel v0.3.0 ━━╸
//! ┃
//! ┣ Loading configuration
//! ┃   Phrases: 3
//! ┣[INFO] Stage started
//! ╹
//! ```
//!
//! Output goes to stdout by default. The live terminal view owns the screen,
//! so it either disables logging with [`Log::set_enabled`] or routes it to a
//! file with [`Log::start_file_logging`].

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Set once when --log is active
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Main logging interface.
///
/// ## Conventions
///
/// - **`log_block_start!`** opens a new block: an empty `┃` line followed by
///   `┣ message`. Use it for phases such as loading config or starting a stage.
/// - **`log_decorated!`** continues a block with `┣ message`.
/// - **`log_indented!`** prints details under the current line as `┃   message`.
/// - **`log_pipe!`** prints a bare `┃` for spacing, usually before a
///   level-tagged message that starts its own block.
/// - **`log_version!`** and **`log_end!`** frame the whole run.
/// - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`,
///   `log_critical!`** print `┣[LEVEL] message` with a colored level tag.
pub struct Log;

impl Log {
    /// Enable or disable logging globally.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// True once [`start_file_logging`](Self::start_file_logging) has succeeded.
    pub fn is_routed_to_file() -> bool {
        LOG_CHANNEL.get().is_some()
    }

    /// Route all further log output to `file_path`.
    ///
    /// Lines are written by a background thread. The returned guard flushes
    /// and joins that thread when dropped.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let file = std::fs::File::create(&file_path)
            .map_err(|e| anyhow::anyhow!("Failed to create log file {file_path}: {e}"))?;
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::io::BufWriter::new(file);
            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => file.write_all(text.as_bytes())?,
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }
            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// Format one line with its glyph and hand it to the active sink.
    ///
    /// Called by the macros; `glyph` already contains any level tag.
    pub fn emit(glyph: &str, message: &str) {
        if Self::is_enabled() {
            write_output(&format!("{glyph}{message}\n"));
        }
    }
}

/// Guard for file logging that ensures a clean flush on shutdown.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        // LOG_CHANNEL stays set; the process exits right after the guard drops
    }
}

/// Remove ANSI color sequences (`ESC [ ... m`) so log files stay plain text.
pub(crate) fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Write already formatted text to the file logger or stdout.
pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

/// Log a decorated message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣ ", &format!($($arg)*))
    };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┃   ", &format!($($arg)*))
    };
}

/// Log a bare pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::common::logger::Log::emit("┃", "")
    };
}

/// Start a new block of related messages.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {{
        $crate::common::logger::Log::emit("┃", "");
        $crate::common::logger::Log::emit("┣ ", &format!($($arg)*));
    }};
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::common::logger::Log::emit(
            "┏ ",
            &format!("showreel v{} ━━╸", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::common::logger::Log::emit("╹", "")
    };
}

/// Log a warning with a yellow level tag.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[33mWARNING\x1b[0m] ", &format!($($arg)*))
    };
}

/// Log an error with a red level tag.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[31mERROR\x1b[0m] ", &format!($($arg)*))
    };
}

/// Log an error that ends the run, closing the block with a corner glyph.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {{
        $crate::common::logger::Log::emit("┃", "");
        $crate::common::logger::Log::emit("┗[\x1b[31mERROR\x1b[0m] ", &format!($($arg)*));
    }};
}

/// Log an informational message with a green level tag.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[32mINFO\x1b[0m] ", &format!($($arg)*))
    };
}

/// Log a debug message with a green level tag.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[32mDEBUG\x1b[0m] ", &format!($($arg)*))
    };
}

/// Log a critical message with a red level tag.
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[31mCRITICAL\x1b[0m] ", &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes_removes_color_sequences() {
        let colored = "┣[\x1b[33mWARNING\x1b[0m] careful";
        assert_eq!(strip_ansi_codes(colored), "┣[WARNING] careful");
    }

    #[test]
    fn test_strip_ansi_codes_keeps_lone_escape() {
        assert_eq!(strip_ansi_codes("a\x1bb"), "a\x1bb");
        assert_eq!(strip_ansi_codes("plain"), "plain");
    }
}
