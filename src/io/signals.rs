//! Signal handling for the live view.
//!
//! SIGINT and SIGTERM request shutdown; SIGHUP and SIGUSR2 request a config
//! reload. Signals are turned into [`SignalMessage`]s on the same channel the
//! config watcher uses, so the main loop has a single inbox.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::Arc;
use std::thread;

/// Messages delivered to the main loop from background threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    /// Rebuild the stage from the configuration file.
    Reload,
    /// Stop the live view.
    Shutdown,
}

/// Signal handling state shared between threads.
pub struct SignalState {
    /// Cleared when a shutdown signal arrives
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
    /// Cloned into the config watcher
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Drain pending messages without blocking. A shutdown also clears `running`.
    pub fn drain(&self) -> Vec<SignalMessage> {
        let messages: Vec<_> = self.signal_receiver.try_iter().collect();
        if messages.contains(&SignalMessage::Shutdown) {
            self.running.store(false, Ordering::SeqCst);
        }
        messages
    }
}

/// Map a raw signal number to a message. Unknown signals map to `None`.
pub fn message_for_signal(signal: i32) -> Option<SignalMessage> {
    match signal {
        SIGINT | SIGTERM => Some(SignalMessage::Shutdown),
        SIGHUP | SIGUSR2 => Some(SignalMessage::Reload),
        _ => None,
    }
}

/// Register handlers and spawn the thread that forwards signals.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = channel::<SignalMessage>();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = Arc::clone(&running);
    let sender_clone = signal_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            let Some(message) = message_for_signal(sig) else {
                continue;
            };
            if debug_enabled {
                log_debug!("Received signal {sig}: {message:?}");
            }
            if message == SignalMessage::Shutdown {
                running_clone.store(false, Ordering::SeqCst);
            }
            if sender_clone.send(message).is_err() {
                break;
            }
        }
    });

    Ok(SignalState {
        running,
        signal_receiver,
        signal_sender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_mapping() {
        assert_eq!(message_for_signal(SIGINT), Some(SignalMessage::Shutdown));
        assert_eq!(message_for_signal(SIGTERM), Some(SignalMessage::Shutdown));
        assert_eq!(message_for_signal(SIGHUP), Some(SignalMessage::Reload));
        assert_eq!(message_for_signal(SIGUSR2), Some(SignalMessage::Reload));
        assert_eq!(message_for_signal(0), None);
    }

    #[test]
    fn test_drain_shutdown_clears_running() {
        let (signal_sender, signal_receiver) = channel();
        let state = SignalState {
            running: Arc::new(AtomicBool::new(true)),
            signal_receiver,
            signal_sender,
        };

        state.signal_sender.send(SignalMessage::Reload).unwrap();
        assert_eq!(state.drain(), vec![SignalMessage::Reload]);
        assert!(state.is_running());

        state.signal_sender.send(SignalMessage::Shutdown).unwrap();
        state.drain();
        assert!(!state.is_running());
        assert!(state.drain().is_empty());
    }
}
