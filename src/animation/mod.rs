//! Timed display state machines and the seams they share.
//!
//! Each machine owns its state, at most one pending timer and a list of
//! observers. The [`Animator`] trait is how a driver (the [`Stage`](crate::stage::Stage))
//! starts, fires and tears them down without knowing what they animate.

pub mod carousel;
pub mod intro;
pub mod rotator;

pub use carousel::{CarouselScheduler, CarouselState, Review, ReviewList};
pub use intro::LoadingGate;
pub use rotator::{RotationScript, RotatorTiming, TextRotator, TypingMode, TypingState};

use std::fmt;
use std::time::Duration;

use crate::time::{TimerId, TimerQueue};

/// A state machine driven by timers from a shared [`TimerQueue`].
pub trait Animator {
    /// Schedule the first timer. Any timer still pending from an earlier run is cancelled first.
    fn start(&mut self, timers: &mut TimerQueue, now: Duration);

    /// Handle a fired timer. Returns false when `id` is not this animator's timer.
    fn on_timer(&mut self, id: TimerId, timers: &mut TimerQueue, now: Duration) -> bool;

    /// Cancel the pending timer, if any. Safe to call repeatedly.
    fn stop(&mut self, timers: &mut TimerQueue);

    /// Whether a timer is pending.
    fn is_running(&self) -> bool;
}

/// Cancel `slot`'s timer (if any) and schedule a replacement `delay` after `now`.
///
/// Keeps the one-pending-timer rule in a single place.
pub(crate) fn reschedule(
    slot: &mut Option<TimerId>,
    timers: &mut TimerQueue,
    now: Duration,
    delay: Duration,
) {
    cancel(slot, timers);
    *slot = Some(timers.schedule_after(now, delay));
}

pub(crate) fn cancel(slot: &mut Option<TimerId>, timers: &mut TimerQueue) {
    if let Some(id) = slot.take() {
        timers.cancel(id);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered change callbacks for one state machine.
///
/// Callbacks run synchronously, in subscription order, after every change.
pub struct Observers<T: ?Sized> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T: ?Sized> Observers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, value: &T) {
        for (_, callback) in &mut self.callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_observers_notify_in_order_and_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<str> = Observers::new();

        let first = {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |text: &str| seen.borrow_mut().push(format!("a:{text}")))
        };
        {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |text: &str| seen.borrow_mut().push(format!("b:{text}")));
        }

        observers.notify("x");
        assert!(observers.unsubscribe(first));
        assert!(!observers.unsubscribe(first));
        observers.notify("y");

        assert_eq!(*seen.borrow(), vec!["a:x", "b:x", "b:y"]);
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_reschedule_keeps_single_pending_timer() {
        let mut timers = TimerQueue::new();
        let mut slot = None;

        reschedule(&mut slot, &mut timers, Duration::ZERO, Duration::from_millis(10));
        reschedule(&mut slot, &mut timers, Duration::ZERO, Duration::from_millis(20));
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(20)));

        cancel(&mut slot, &mut timers);
        cancel(&mut slot, &mut timers);
        assert_eq!(timers.pending(), 0);
        assert!(slot.is_none());
    }
}
