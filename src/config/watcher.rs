//! Hot reload of `showreel.toml`.
//!
//! The watcher observes the config file's parent directory rather than the file
//! itself, since editors commonly save by writing a temp file and renaming it
//! over the original. Matching events are debounced and forwarded to the main
//! loop as [`SignalMessage::Reload`].

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use crate::common::constants::RELOAD_DEBOUNCE_MS;
use crate::common::utils::private_path;
use crate::io::signals::SignalMessage;

/// Watches a single configuration file and requests reloads when it changes.
pub struct ConfigWatcher {
    signal_sender: Sender<SignalMessage>,
    debug_enabled: bool,
}

impl ConfigWatcher {
    pub fn new(signal_sender: Sender<SignalMessage>, debug_enabled: bool) -> Self {
        Self {
            signal_sender,
            debug_enabled,
        }
    }

    /// Start watching `config_path` on a background thread.
    ///
    /// Does nothing when the file has no parent directory to watch.
    pub fn start(self, config_path: &Path) -> Result<()> {
        let Some(directory) = config_path.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let watched = config_path.to_path_buf();

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Starting config file watcher for hot reload:");
            log_indented!("Watching: {}", private_path(&watched));
        }

        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res
                    && matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    )
                {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", directory.display()))?;

        let signal_sender = self.signal_sender;
        let debug_enabled = self.debug_enabled;

        thread::spawn(move || {
            // The watcher stops delivering events once dropped
            let _watcher = watcher;
            let mut debounce = Debounce::new(Duration::from_millis(RELOAD_DEBOUNCE_MS));

            for event in rx {
                if !event.paths.iter().any(|path| affects_config(path, &watched)) {
                    continue;
                }
                if !debounce.ready(Instant::now()) {
                    continue;
                }

                if debug_enabled {
                    log_pipe!();
                    log_info!("Configuration file change detected");
                }

                if signal_sender.send(SignalMessage::Reload).is_err() {
                    break;
                }
            }
        });

        Ok(())
    }
}

/// True if a change at `event_path` may have altered `config_path`.
///
/// Accepts the file itself and editor temp files that share its name as a prefix
/// (`showreel.toml~`, `showreel.toml.swp`) in the same directory.
fn affects_config(event_path: &Path, config_path: &Path) -> bool {
    if event_path == config_path {
        return true;
    }
    if event_path.parent() != config_path.parent() {
        return false;
    }
    match (
        event_path.file_name().and_then(|n| n.to_str()),
        config_path.file_name().and_then(|n| n.to_str()),
    ) {
        (Some(event_name), Some(config_name)) => event_name.starts_with(config_name),
        _ => false,
    }
}

/// Drops events that arrive within `window` of the last accepted one.
struct Debounce {
    window: Duration,
    last: Option<Instant>,
}

impl Debounce {
    fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    fn ready(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last
            && now.duration_since(last) < self.window
        {
            return false;
        }
        self.last = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::mpsc::channel;
    use tempfile::tempdir;

    #[test]
    fn test_affects_config_matches_file_and_temp_names() {
        let config = PathBuf::from("/tmp/cfg/showreel.toml");
        assert!(affects_config(&config, &config));
        assert!(affects_config(Path::new("/tmp/cfg/showreel.toml~"), &config));
        assert!(affects_config(Path::new("/tmp/cfg/showreel.toml.swp"), &config));
        assert!(!affects_config(Path::new("/tmp/cfg/other.toml"), &config));
        assert!(!affects_config(Path::new("/tmp/elsewhere/showreel.toml"), &config));
    }

    #[test]
    fn test_debounce_window() {
        let mut debounce = Debounce::new(Duration::from_millis(500));
        let start = Instant::now();
        assert!(debounce.ready(start));
        assert!(!debounce.ready(start + Duration::from_millis(100)));
        assert!(debounce.ready(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_write_triggers_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("showreel.toml");
        fs::write(&path, "dwell = 1000\n").unwrap();

        let (tx, rx) = channel();
        ConfigWatcher::new(tx, false).start(&path).unwrap();

        // Give the backend a moment to register before writing
        thread::sleep(Duration::from_millis(100));
        fs::write(&path, "dwell = 2000\n").unwrap();

        let message = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(message, SignalMessage::Reload);
    }
}
