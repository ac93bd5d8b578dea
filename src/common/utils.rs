//! Shared helpers: text slicing, wrapping, progress bars and terminal setup.

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{IsTerminal, stdout};
use std::path::Path;

/// Return the first `chars` Unicode scalar values of `text`.
///
/// Asking for more characters than the text holds returns the whole text.
pub fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Number of Unicode scalar values in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap. Words longer than `width` are split hard.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        while char_len(word) > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let head = char_prefix(word, width);
            lines.push(head.to_string());
            word = &word[head.len()..];
        }

        let word_len = char_len(word);
        if word_len == 0 {
            continue;
        }
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Render a fixed-width progress bar for a fraction in `[0, 1]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "━".repeat(filled), "─".repeat(width - filled))
}

/// Display a path with the home directory replaced by `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// RAII guard for the live terminal view.
///
/// Enables raw mode, switches to the alternate screen, hides the cursor and
/// captures mouse and focus events. Everything is restored when the guard drops, including
/// on early returns through `?`.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Set up the terminal. Fails when stdout is not a terminal.
    pub fn new() -> Result<Self> {
        if !stdout().is_terminal() {
            anyhow::bail!("the live view needs an interactive terminal (try `showreel frames`)");
        }

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self { active: true };
        execute!(
            stdout(),
            EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            event::EnableFocusChange
        )
        .context("failed to prepare terminal screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(
                stdout(),
                event::DisableFocusChange,
                event::DisableMouseCapture,
                cursor::Show,
                LeaveAlternateScreen
            );
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}
