//! Live terminal view: the application runner behind `showreel run`.
//!
//! `Showreel` acquires its resources in order (configuration, signal handler,
//! config watcher, terminal) and drives one [`Stage`] from a real clock. The
//! loop draws a frame, then waits for input no longer than the stage's next
//! timer deadline, so every tick lands on time without busy waiting.
//!
//! A reload (file change, SIGHUP or SIGUSR2) tears the running stage down and
//! replaces it with one built from the new file. An invalid file keeps the
//! current stage running.

use anyhow::{Context, Result};
use crossterm::{event, terminal};
use std::io::stdout;
use std::path::Path;
use std::time::Duration;

use crate::common::constants::{FRAME_INTERVAL_MS, IDLE_POLL_MS};
use crate::common::logger::Log;
use crate::common::utils::TerminalGuard;
use crate::config::{self, Config, ConfigWatcher};
use crate::io::signals::{SignalMessage, SignalState, setup_signal_handler};
use crate::render::{InputMapper, Renderer, compose};
use crate::stage::Stage;
use crate::time::{RealTimeSource, TimeSource};

/// Builder for the live view.
///
/// ```no_run
/// use showreel::Showreel;
///
/// # fn main() -> anyhow::Result<()> {
/// Showreel::new(false).run()?;
/// # Ok(())
/// # }
/// ```
pub struct Showreel {
    debug_enabled: bool,
}

impl Showreel {
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }

    /// Run until quit or a shutdown signal.
    pub fn run(self) -> Result<()> {
        log_version!();

        let config_path = config::get_config_path()?;
        let config = Config::load()?;
        if self.debug_enabled {
            config.log_config();
        }
        let mut stage = Stage::from_config(&config)?;

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        // Hot reload is optional; signals still work without it
        if let Err(e) =
            ConfigWatcher::new(signal_state.signal_sender.clone(), self.debug_enabled)
                .start(&config_path)
        {
            log_warning!("Config file watching unavailable: {e}");
        }

        log_block_start!("Starting live view");

        // Console output would corrupt the alternate screen
        let was_enabled = Log::is_enabled();
        if !Log::is_routed_to_file() {
            Log::set_enabled(false);
        }

        let result = self.live_loop(&mut stage, &signal_state, &config_path);
        stage.teardown();
        Log::set_enabled(was_enabled);

        result?;

        log_block_start!("Live view closed");
        if self.debug_enabled {
            log_indented!("Pending timers after teardown: {}", stage.pending_timers());
        }
        log_end!();
        Ok(())
    }

    fn live_loop(
        &self,
        stage: &mut Stage,
        signal_state: &SignalState,
        config_path: &Path,
    ) -> Result<()> {
        let _terminal = TerminalGuard::new()?;
        let clock = RealTimeSource::new();
        let mut renderer = Renderer::new(stdout());
        let mut input = InputMapper::new();

        stage.start(clock.now());

        while signal_state.is_running() {
            let now = clock.now();
            stage.advance_to(now);

            let (width, height) = terminal::size().context("failed to read terminal size")?;
            let frame = compose(stage, now, width, height);
            renderer.draw(&frame)?;

            for message in signal_state.drain() {
                if message == SignalMessage::Reload {
                    reload_stage(stage, config_path, clock.now(), self.debug_enabled);
                }
            }
            if !signal_state.is_running() {
                break;
            }

            let timeout = poll_timeout(
                stage.next_deadline(),
                clock.now(),
                stage.intro().is_loading(),
            );
            if event::poll(timeout).context("failed to poll terminal events")? {
                let event = event::read().context("failed to read terminal event")?;
                if let Some(control) = input.map_event(&event, &frame.layout)
                    && !stage.apply(control)
                {
                    break;
                }
            }
        }

        Ok(())
    }
}

/// How long to wait for input before the loop must run again.
///
/// Never past the next timer deadline, at most one frame while the loading
/// bar animates, and at most the idle poll so signals are noticed promptly.
pub(crate) fn poll_timeout(
    next_deadline: Option<Duration>,
    now: Duration,
    animating: bool,
) -> Duration {
    let mut timeout = Duration::from_millis(IDLE_POLL_MS);
    if let Some(deadline) = next_deadline {
        timeout = timeout.min(deadline.saturating_sub(now));
    }
    if animating {
        timeout = timeout.min(Duration::from_millis(FRAME_INTERVAL_MS));
    }
    timeout
}

/// Replace `stage` with one built from `config_path`, started at `now`.
///
/// Returns false and leaves `stage` untouched when the file fails to load.
pub(crate) fn reload_stage(
    stage: &mut Stage,
    config_path: &Path,
    now: Duration,
    debug_enabled: bool,
) -> bool {
    let fresh = config::load_from_path(config_path).and_then(|config| {
        if debug_enabled {
            config.log_config();
        }
        Stage::from_config(&config)
    });

    match fresh {
        Ok(mut fresh) => {
            stage.teardown();
            fresh.inherit_pause(stage);
            fresh.start(now);
            *stage = fresh;
            log_block_start!("Configuration reloaded");
            true
        }
        Err(e) => {
            log_warning!("Keeping current configuration: {e:#}");
            false
        }
    }
}
