//! Single-threaded timer queue.
//!
//! Owners schedule deadlines and keep the returned [`TimerId`]. A driver pops
//! due timers in deadline order and hands each id back to whoever owns it.
//! Cancelling removes the id from the live set; its heap entry is discarded
//! lazily the next time it reaches the top, so a cancelled timer never fires.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

use crate::common::constants::MINIMUM_TIMER_DELAY_MS;

/// Handle for one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered queue of pending timers.
///
/// Deadlines are offsets from the driving [`TimeSource`](super::source::TimeSource)'s
/// epoch. Timers sharing a deadline fire in the order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    live: HashSet<u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer at an absolute deadline.
    pub fn schedule(&mut self, deadline: Duration) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Reverse((deadline, id)));
        self.live.insert(id);
        TimerId(id)
    }

    /// Schedule a timer `delay` after `now`.
    ///
    /// The delay is floored at one millisecond so a driver that keeps firing
    /// due timers always makes progress.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration) -> TimerId {
        let floor = Duration::from_millis(MINIMUM_TIMER_DELAY_MS);
        self.schedule(now + delay.max(floor))
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id.0)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id.0)
    }

    /// Number of timers that are still going to fire.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Deadline of the earliest live timer.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.prune();
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerId> {
        self.prune();
        let due = matches!(self.heap.peek(), Some(Reverse((deadline, _))) if *deadline <= now);
        if !due {
            return None;
        }
        let Reverse((_, id)) = self.heap.pop()?;
        self.live.remove(&id);
        Some(TimerId(id))
    }

    /// Drop cancelled entries sitting at the top of the heap.
    fn prune(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek() {
            if self.live.contains(id) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(ms(50));
        let early = timers.schedule(ms(10));

        assert_eq!(timers.pop_due(ms(5)), None);
        assert_eq!(timers.pop_due(ms(100)), Some(early));
        assert_eq!(timers.pop_due(ms(100)), Some(late));
        assert_eq!(timers.pop_due(ms(100)), None);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(ms(10));
        let second = timers.schedule(ms(10));

        assert_eq!(timers.pop_due(ms(10)), Some(first));
        assert_eq!(timers.pop_due(ms(10)), Some(second));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let cancelled = timers.schedule(ms(10));
        let kept = timers.schedule(ms(20));

        assert!(timers.cancel(cancelled));
        assert!(!timers.cancel(cancelled));
        assert!(!timers.is_pending(cancelled));
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.next_deadline(), Some(ms(20)));
        assert_eq!(timers.pop_due(ms(100)), Some(kept));
        assert_eq!(timers.pop_due(ms(100)), None);
    }

    #[test]
    fn test_schedule_after_floors_zero_delay() {
        let mut timers = TimerQueue::new();
        timers.schedule_after(ms(100), Duration::ZERO);

        assert_eq!(timers.next_deadline(), Some(ms(101)));
        assert_eq!(timers.pop_due(ms(100)), None);
    }

    #[test]
    fn test_empty_queue_has_no_deadline() {
        let mut timers = TimerQueue::new();
        assert_eq!(timers.next_deadline(), None);
        assert_eq!(timers.pop_due(Duration::MAX), None);
    }
}
