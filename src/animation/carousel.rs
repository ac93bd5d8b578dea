//! Autoplay review carousel.
//!
//! A fixed-interval timer advances the active review. The timer keeps
//! running while the carousel is paused; paused ticks are no-ops, so resuming
//! never produces a burst of catch-up advances and the next advance lands on
//! the next interval boundary. Manual navigation does not touch the timer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Animator, Observers, SubscriptionId};
use crate::common::constants::*;
use crate::error::AnimationError;
use crate::time::{TimerId, TimerQueue};

/// One client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub quote: String,
    pub rating: u8,
}

impl Review {
    pub fn new(author: impl Into<String>, quote: impl Into<String>, rating: u8) -> Self {
        Self {
            author: author.into(),
            quote: quote.into(),
            rating,
        }
    }
}

/// Ordered, non-empty list of reviews with ratings in 1..=5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewList {
    reviews: Vec<Review>,
}

impl ReviewList {
    pub fn new(reviews: Vec<Review>) -> Result<Self, AnimationError> {
        if reviews.is_empty() {
            return Err(AnimationError::EmptyReviewList);
        }
        if let Some((index, review)) = reviews
            .iter()
            .enumerate()
            .find(|(_, r)| !(MINIMUM_RATING..=MAXIMUM_RATING).contains(&r.rating))
        {
            return Err(AnimationError::InvalidRating {
                index,
                rating: review.rating,
            });
        }
        Ok(Self { reviews })
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Always false for a constructed list; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Review> {
        self.reviews.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.reviews.iter()
    }
}

impl Default for ReviewList {
    fn default() -> Self {
        Self {
            reviews: DEFAULT_REVIEWS
                .iter()
                .map(|(author, quote, rating)| Review::new(*author, *quote, *rating))
                .collect(),
        }
    }
}

/// Observable carousel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub active_index: usize,
    pub paused: bool,
}

/// The review carousel state machine.
#[derive(Debug)]
pub struct CarouselScheduler {
    reviews: ReviewList,
    interval: Duration,
    state: CarouselState,
    timer: Option<TimerId>,
    observers: Observers<CarouselState>,
}

impl CarouselScheduler {
    pub fn new(reviews: ReviewList, interval: Duration) -> Result<Self, AnimationError> {
        if interval.is_zero() {
            return Err(AnimationError::ZeroInterval {
                name: "autoplay_interval",
            });
        }
        Ok(Self {
            reviews,
            interval,
            state: CarouselState {
                active_index: 0,
                paused: false,
            },
            timer: None,
            observers: Observers::new(),
        })
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reviews(&self) -> &ReviewList {
        &self.reviews
    }

    pub fn active_review(&self) -> &Review {
        &self.reviews.reviews[self.state.active_index]
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CarouselState) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Autoplay step. Advances once unless paused; returns whether it advanced.
    pub fn tick(&mut self) -> bool {
        if self.state.paused {
            return false;
        }
        let next = (self.state.active_index + 1) % self.reviews.len();
        self.select(next);
        true
    }

    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    /// Set the pause flag; observers are notified only on an actual change.
    pub fn set_paused(&mut self, paused: bool) {
        if self.state.paused != paused {
            self.state.paused = paused;
            let state = self.state;
            self.observers.notify(&state);
        }
    }

    /// Jump to `index`. Out-of-range indices are rejected and leave the state unchanged.
    pub fn go_to(&mut self, index: usize) -> Result<(), AnimationError> {
        let len = self.reviews.len();
        if index >= len {
            return Err(AnimationError::IndexOutOfRange { index, len });
        }
        self.select(index);
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let next = (self.state.active_index + 1) % self.reviews.len();
        self.select(next);
    }

    pub fn prev(&mut self) {
        let len = self.reviews.len();
        let prev = (self.state.active_index + len - 1) % len;
        self.select(prev);
    }

    fn select(&mut self, index: usize) {
        self.state.active_index = index;
        let state = self.state;
        self.observers.notify(&state);
    }
}

impl Animator for CarouselScheduler {
    fn start(&mut self, timers: &mut TimerQueue, now: Duration) {
        super::reschedule(&mut self.timer, timers, now, self.interval);
    }

    fn on_timer(&mut self, id: TimerId, timers: &mut TimerQueue, now: Duration) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        self.tick();
        super::reschedule(&mut self.timer, timers, now, self.interval);
        true
    }

    fn stop(&mut self, timers: &mut TimerQueue) {
        super::cancel(&mut self.timer, timers);
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn carousel(len: usize) -> CarouselScheduler {
        let reviews = (0..len)
            .map(|i| Review::new(format!("author {i}"), format!("quote {i}"), 5))
            .collect();
        CarouselScheduler::new(ReviewList::new(reviews).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_empty_review_list_fails_fast() {
        assert_eq!(
            ReviewList::new(Vec::new()),
            Err(AnimationError::EmptyReviewList)
        );
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let reviews = vec![Review::new("a", "q", 5), Review::new("b", "q", 6)];
        assert_eq!(
            ReviewList::new(reviews),
            Err(AnimationError::InvalidRating {
                index: 1,
                rating: 6
            })
        );
        assert!(ReviewList::new(vec![Review::new("a", "q", 0)]).is_err());
    }

    #[test]
    fn test_default_reviews_are_valid() {
        let defaults = ReviewList::default();
        assert_eq!(ReviewList::new(defaults.iter().cloned().collect()), Ok(defaults));
    }

    #[test]
    fn test_tick_sequence_wraps() {
        let mut carousel = carousel(3);
        let mut indices = vec![carousel.active_index()];
        for _ in 0..6 {
            carousel.tick();
            indices.push(carousel.active_index());
        }
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_prev_and_next_wrap_for_two() {
        let mut carousel = carousel(2);
        carousel.prev();
        assert_eq!(carousel.active_index(), 1);
        carousel.next();
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_single_review_stays_put() {
        let mut carousel = carousel(1);
        carousel.next();
        carousel.prev();
        carousel.tick();
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_paused_ticks_are_noops() {
        let mut carousel = carousel(3);
        carousel.pause();
        for _ in 0..10 {
            assert!(!carousel.tick());
        }
        assert_eq!(carousel.active_index(), 0);

        carousel.resume();
        assert!(carousel.tick());
        assert_eq!(carousel.active_index(), 1);
    }

    #[test]
    fn test_go_to_bounds() {
        let mut carousel = carousel(3);
        carousel.go_to(2).unwrap();
        assert_eq!(carousel.active_index(), 2);

        assert_eq!(
            carousel.go_to(3),
            Err(AnimationError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(carousel.go_to(usize::MAX).is_err());
        assert_eq!(carousel.active_index(), 2);
    }

    #[test]
    fn test_manual_navigation_works_while_paused() {
        let mut carousel = carousel(3);
        carousel.pause();
        carousel.next();
        assert_eq!(carousel.active_index(), 1);
        assert!(carousel.is_paused());
    }

    #[test]
    fn test_observers_see_changes_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut carousel = carousel(2);
        {
            let seen = Rc::clone(&seen);
            carousel.subscribe(move |state| seen.borrow_mut().push(*state));
        }

        carousel.pause();
        carousel.pause();
        carousel.tick();
        carousel.resume();
        carousel.next();

        assert_eq!(
            *seen.borrow(),
            vec![
                CarouselState {
                    active_index: 0,
                    paused: true
                },
                CarouselState {
                    active_index: 0,
                    paused: false
                },
                CarouselState {
                    active_index: 1,
                    paused: false
                },
            ]
        );
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let result = CarouselScheduler::new(ReviewList::default(), Duration::ZERO);
        assert!(matches!(
            result,
            Err(AnimationError::ZeroInterval {
                name: "autoplay_interval"
            })
        ));
    }

    #[test]
    fn test_timer_keeps_cadence_through_pause() {
        let mut timers = TimerQueue::new();
        let mut carousel = carousel(3);
        carousel.start(&mut timers, Duration::ZERO);

        carousel.pause();
        let id = timers.pop_due(Duration::from_secs(5)).unwrap();
        assert!(carousel.on_timer(id, &mut timers, Duration::from_secs(5)));
        assert_eq!(carousel.active_index(), 0);
        assert_eq!(timers.next_deadline(), Some(Duration::from_secs(10)));

        carousel.resume();
        assert_eq!(timers.pop_due(Duration::from_secs(7)), None);
        let id = timers.pop_due(Duration::from_secs(10)).unwrap();
        carousel.on_timer(id, &mut timers, Duration::from_secs(10));
        assert_eq!(carousel.active_index(), 1);

        carousel.stop(&mut timers);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_go_to_does_not_restart_interval() {
        let mut timers = TimerQueue::new();
        let mut carousel = carousel(3);
        carousel.start(&mut timers, Duration::ZERO);

        carousel.go_to(2).unwrap();
        assert_eq!(timers.next_deadline(), Some(Duration::from_secs(5)));
        assert_eq!(timers.pending(), 1);
    }
}
