//! Loading gate shown before the page content.
//!
//! A one-shot timer lifts the gate after `duration`. The progress bar fills
//! over `fill` (shorter than the gate) and then holds full until the gate
//! lifts. A zero duration means there is no gate at all.

use std::time::Duration;

use super::{Animator, Observers, SubscriptionId};
use crate::common::constants::*;
use crate::time::{TimerId, TimerQueue};

#[derive(Debug)]
pub struct LoadingGate {
    duration: Duration,
    fill: Duration,
    started_at: Option<Duration>,
    loading: bool,
    timer: Option<TimerId>,
    observers: Observers<bool>,
}

impl LoadingGate {
    /// Create a gate. The fill time is capped at the gate duration.
    pub fn new(duration: Duration, fill: Duration) -> Self {
        Self {
            duration,
            fill: fill.min(duration),
            started_at: None,
            loading: !duration.is_zero(),
            timer: None,
            observers: Observers::new(),
        }
    }

    /// A gate that is already open.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Bar fill in `[0, 1]` at `now`. Before `start` this is 0; once open it is 1.
    pub fn progress(&self, now: Duration) -> f64 {
        if !self.loading {
            return 1.0;
        }
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if self.fill.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started_at);
        (elapsed.as_secs_f64() / self.fill.as_secs_f64()).min(1.0)
    }

    /// Subscribe to the loading flag; called once with `false` when the gate lifts.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&bool) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn open(&mut self) {
        self.loading = false;
        self.observers.notify(&false);
    }
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_LOADING_DURATION),
            Duration::from_millis(DEFAULT_LOADING_FILL),
        )
    }
}

impl Animator for LoadingGate {
    fn start(&mut self, timers: &mut TimerQueue, now: Duration) {
        if !self.loading {
            return;
        }
        self.started_at = Some(now);
        super::reschedule(&mut self.timer, timers, now, self.duration);
    }

    fn on_timer(&mut self, id: TimerId, _timers: &mut TimerQueue, _now: Duration) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        self.open();
        true
    }

    fn stop(&mut self, timers: &mut TimerQueue) {
        super::cancel(&mut self.timer, timers);
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}
