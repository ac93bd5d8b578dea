//! Time source abstraction for real and simulated playback.
//!
//! The live view reads a monotonic clock. The `frames` command and the tests
//! drive the same stage with a simulated clock that either jumps instantly
//! through sleeps (fast-forward) or plays back at an accelerated rate, so a
//! minute of carousel rotation can be checked without waiting a minute.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of "now" for a timer driver.
///
/// `now()` is the elapsed time since the source was created; timer deadlines
/// are expressed on the same axis.
pub trait TimeSource {
    /// Elapsed time since the source's epoch.
    fn now(&self) -> Duration;

    /// Sleep for the specified duration (or simulate it).
    fn sleep(&self, duration: Duration);

    /// Check if this is a simulated time source.
    fn is_simulated(&self) -> bool;
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug)]
pub struct RealTimeSource {
    epoch: Instant,
}

impl RealTimeSource {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for RealTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated clock for deterministic and accelerated playback.
///
/// Two modes:
/// - Fast-forward (multiplier `0.0`): `sleep` advances the clock instantly.
/// - Accelerated (multiplier `> 0.0`): `sleep` blocks for `duration / multiplier`
///   of real time, then advances the clock by `duration`.
///
/// Single-threaded by design of the stage, so interior mutability is a `Cell`.
#[derive(Debug)]
pub struct SimulatedTimeSource {
    current: Cell<Duration>,
    multiplier: f64,
}

impl SimulatedTimeSource {
    /// Create a simulated clock starting at zero.
    ///
    /// Negative or non-finite multipliers fall back to fast-forward.
    pub fn new(multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            0.0
        };
        Self {
            current: Cell::new(Duration::ZERO),
            multiplier,
        }
    }

    /// A fast-forward clock.
    pub fn fast_forward() -> Self {
        Self::new(0.0)
    }

    pub fn is_fast_forward(&self) -> bool {
        self.multiplier == 0.0
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> Duration {
        self.current.get()
    }

    fn sleep(&self, duration: Duration) {
        if !self.is_fast_forward() {
            let real = duration.as_secs_f64() / self.multiplier;
            if real > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(real));
            }
        }
        self.current.set(self.current.get() + duration);
    }

    fn is_simulated(&self) -> bool {
        true
    }
}
