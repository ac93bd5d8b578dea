//! The stage: one rendered view and everything it animates.
//!
//! A `Stage` owns its timer queue and every state machine on screen. It is
//! the only place timers are fired and the only place they are torn down:
//! [`Stage::teardown`] stops every animator, and `Drop` calls it again so a
//! stage can never outlive its timers.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::animation::{Animator, CarouselScheduler, LoadingGate, TextRotator};
use crate::config::Config;
use crate::projects::ProjectShelf;
use crate::time::TimerQueue;

/// User input the stage understands, already decoded from terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
    GoTo(usize),
    TogglePause,
    /// Pointer entered (`true`) or left (`false`) the review card.
    Hover(bool),
    CycleFilter,
    Quit,
}

#[derive(Debug)]
pub struct Stage {
    timers: TimerQueue,
    caption: TextRotator,
    reviews: CarouselScheduler,
    intro: LoadingGate,
    shelf: ProjectShelf,
    pause_on_hover: bool,
    paused_by_user: bool,
    hovering: bool,
    started: bool,
}

impl Stage {
    pub fn new(
        caption: TextRotator,
        reviews: CarouselScheduler,
        intro: LoadingGate,
        shelf: ProjectShelf,
    ) -> Self {
        Self {
            timers: TimerQueue::new(),
            caption,
            reviews,
            intro,
            shelf,
            pause_on_hover: true,
            paused_by_user: false,
            hovering: false,
            started: false,
        }
    }

    /// Build a stage from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let caption = TextRotator::new(
            config.rotation_script().context("invalid caption phrases")?,
            config.rotator_timing().context("invalid caption timing")?,
        );
        let reviews = CarouselScheduler::new(
            config.review_list().context("invalid reviews")?,
            config.autoplay_interval(),
        )
        .context("invalid carousel timing")?;
        let intro = LoadingGate::new(config.loading_duration(), config.loading_fill());
        let shelf = ProjectShelf::new(config.projects());

        let mut stage = Self::new(caption, reviews, intro, shelf);
        stage.pause_on_hover = config.pause_on_hover();
        Ok(stage)
    }

    /// Start every animator with `now` as the reference instant.
    pub fn start(&mut self, now: Duration) {
        self.caption.start(&mut self.timers, now);
        self.reviews.start(&mut self.timers, now);
        self.intro.start(&mut self.timers, now);
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Fire every timer due at or before `now`, in deadline order.
    ///
    /// Each timer fires once with `now` as its firing instant, so a driver that
    /// wakes up late does not replay the ticks it missed.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(id) = self.timers.pop_due(now) {
            let handled = self.caption.on_timer(id, &mut self.timers, now)
                || self.reviews.on_timer(id, &mut self.timers, now)
                || self.intro.on_timer(id, &mut self.timers, now);
            if handled {
                fired += 1;
            }
        }
        fired
    }

    /// Advance exactly to the next deadline. Returns that instant, or `None` when idle.
    pub fn step(&mut self) -> Option<Duration> {
        let deadline = self.timers.next_deadline()?;
        self.advance_to(deadline);
        Some(deadline)
    }

    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Apply one control. Returns false for [`Control::Quit`].
    pub fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Prev => self.reviews.prev(),
            Control::Next => self.reviews.next(),
            Control::GoTo(index) => {
                if let Err(e) = self.reviews.go_to(index) {
                    log_debug!("Ignoring jump: {e}");
                }
            }
            Control::TogglePause => {
                self.paused_by_user = !self.paused_by_user;
                self.sync_pause();
            }
            Control::Hover(inside) => {
                self.hovering = inside;
                self.sync_pause();
            }
            Control::CycleFilter => {
                self.shelf.cycle_filter();
            }
            Control::Quit => return false,
        }
        true
    }

    /// Take over the pause and hover state of the stage this one replaces.
    pub fn inherit_pause(&mut self, previous: &Stage) {
        self.paused_by_user = previous.paused_by_user;
        self.hovering = previous.hovering;
        self.sync_pause();
    }

    pub fn is_paused_by_user(&self) -> bool {
        self.paused_by_user
    }

    // The user's pause and the hover pause are independent; either one holds the carousel
    fn sync_pause(&mut self) {
        let paused = self.paused_by_user || (self.pause_on_hover && self.hovering);
        self.reviews.set_paused(paused);
    }

    /// Cancel every pending timer. Idempotent.
    pub fn teardown(&mut self) {
        self.caption.stop(&mut self.timers);
        self.reviews.stop(&mut self.timers);
        self.intro.stop(&mut self.timers);
        self.started = false;
    }

    pub fn caption(&self) -> &TextRotator {
        &self.caption
    }

    pub fn caption_mut(&mut self) -> &mut TextRotator {
        &mut self.caption
    }

    pub fn reviews(&self) -> &CarouselScheduler {
        &self.reviews
    }

    pub fn reviews_mut(&mut self) -> &mut CarouselScheduler {
        &mut self.reviews
    }

    pub fn intro(&self) -> &LoadingGate {
        &self.intro
    }

    pub fn intro_mut(&mut self) -> &mut LoadingGate {
        &mut self.intro
    }

    pub fn shelf(&self) -> &ProjectShelf {
        &self.shelf
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Review, ReviewList, RotationScript, RotatorTiming};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn stage() -> Stage {
        let caption = TextRotator::new(
            RotationScript::new(["Hi"]).unwrap(),
            RotatorTiming::new(ms(60), ms(30), ms(2000)).unwrap(),
        );
        let reviews = CarouselScheduler::new(
            ReviewList::new(vec![
                Review::new("A", "a", 5),
                Review::new("B", "b", 4),
                Review::new("C", "c", 3),
            ])
            .unwrap(),
            ms(5000),
        )
        .unwrap();
        Stage::new(caption, reviews, LoadingGate::disabled(), ProjectShelf::default())
    }

    #[test]
    fn test_start_schedules_one_timer_per_animator() {
        let mut stage = stage();
        stage.start(ms(0));
        assert_eq!(stage.pending_timers(), 2);
        assert_eq!(stage.next_deadline(), Some(ms(60)));
    }

    #[test]
    fn test_step_fires_earliest_deadline() {
        let mut stage = stage();
        stage.start(ms(0));

        assert_eq!(stage.step(), Some(ms(60)));
        assert_eq!(stage.caption().current_text(), "H");
        assert_eq!(stage.step(), Some(ms(120)));
        assert_eq!(stage.caption().current_text(), "Hi");
        assert_eq!(stage.pending_timers(), 2);
    }

    #[test]
    fn test_late_advance_does_not_replay_missed_ticks() {
        let mut stage = stage();
        stage.start(ms(0));

        let fired = stage.advance_to(ms(16_000));
        assert_eq!(fired, 2);
        assert_eq!(stage.reviews().active_index(), 1);
        assert_eq!(stage.caption().current_text(), "H");
    }

    #[test]
    fn test_teardown_leaves_no_timers_and_is_idempotent() {
        let mut stage = stage();
        stage.start(ms(0));
        stage.step();

        stage.teardown();
        assert_eq!(stage.pending_timers(), 0);
        assert_eq!(stage.next_deadline(), None);
        stage.teardown();
        assert_eq!(stage.step(), None);
    }

    #[test]
    fn test_hover_pauses_and_resumes() {
        let mut stage = stage();
        assert!(stage.apply(Control::Hover(true)));
        assert!(stage.reviews().is_paused());
        stage.apply(Control::Hover(false));
        assert!(!stage.reviews().is_paused());
    }

    #[test]
    fn test_hover_is_ignored_when_disabled() {
        let mut stage = stage();
        stage.pause_on_hover = false;
        stage.apply(Control::Hover(true));
        assert!(!stage.reviews().is_paused());
        stage.apply(Control::TogglePause);
        stage.apply(Control::Hover(false));
        assert!(stage.reviews().is_paused());
    }

    #[test]
    fn test_inherit_pause_carries_both_flags() {
        let mut old = stage();
        old.apply(Control::TogglePause);
        old.apply(Control::Hover(true));

        let mut fresh = stage();
        fresh.inherit_pause(&old);
        assert!(fresh.is_paused_by_user());
        assert!(fresh.reviews().is_paused());

        // Leaving the card keeps the carried-over manual pause
        fresh.apply(Control::Hover(false));
        assert!(fresh.reviews().is_paused());
        fresh.apply(Control::TogglePause);
        assert!(!fresh.reviews().is_paused());
    }

    #[test]
    fn test_controls_navigate() {
        let mut stage = stage();
        stage.apply(Control::Prev);
        assert_eq!(stage.reviews().active_index(), 2);
        stage.apply(Control::GoTo(7));
        assert_eq!(stage.reviews().active_index(), 2);
        stage.apply(Control::GoTo(0));
        stage.apply(Control::Next);
        assert_eq!(stage.reviews().active_index(), 1);
        stage.apply(Control::TogglePause);
        assert!(stage.reviews().is_paused());
        assert!(!stage.apply(Control::Quit));
    }
}
