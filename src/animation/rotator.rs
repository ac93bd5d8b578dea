//! Typing caption: types a phrase, holds it, deletes it, moves to the next.
//!
//! The cycle per phrase is
//!
//! ```text
//! Growing ──(full length)──▶ PausedFull ──(dwell)──▶ Shrinking ──(empty)──▶ Growing (next phrase)
//! ```
//!
//! Each tick performs exactly one transition and returns the delay until the
//! next tick: the type interval while growing, the dwell while paused and the
//! delete interval while shrinking. A phrase of length zero grows and shrinks
//! in zero ticks, so it still costs one dwell and then the script moves on.

use std::time::Duration;

use super::{Animator, Observers, SubscriptionId};
use crate::common::constants::*;
use crate::common::utils::{char_len, char_prefix};
use crate::error::AnimationError;
use crate::time::{TimerId, TimerQueue};

/// Ordered, non-empty list of phrases to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationScript {
    phrases: Vec<String>,
    lengths: Vec<usize>,
}

impl RotationScript {
    /// Build a script. Fails with [`AnimationError::EmptyScript`] when no phrases are given.
    pub fn new<I, S>(phrases: I) -> Result<Self, AnimationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(AnimationError::EmptyScript);
        }
        let lengths = phrases.iter().map(|p| char_len(p)).collect();
        Ok(Self { phrases, lengths })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always false for a constructed script; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Length of phrase `index` in characters.
    fn char_len(&self, index: usize) -> usize {
        self.lengths[index]
    }
}

impl Default for RotationScript {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            lengths: DEFAULT_PHRASES.iter().map(|p| char_len(p)).collect(),
        }
    }
}

/// Phase of the typing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingMode {
    Growing,
    PausedFull,
    Shrinking,
}

/// Snapshot of the rotator's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingState {
    pub script_index: usize,
    pub cursor_length: usize,
    pub mode: TypingMode,
}

/// Tick cadence for each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatorTiming {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub dwell: Duration,
}

impl RotatorTiming {
    /// Build a timing, rejecting zero intervals.
    pub fn new(
        type_interval: Duration,
        delete_interval: Duration,
        dwell: Duration,
    ) -> Result<Self, AnimationError> {
        if type_interval.is_zero() {
            return Err(AnimationError::ZeroInterval {
                name: "type_interval",
            });
        }
        if delete_interval.is_zero() {
            return Err(AnimationError::ZeroInterval {
                name: "delete_interval",
            });
        }
        if dwell.is_zero() {
            return Err(AnimationError::ZeroInterval { name: "dwell" });
        }
        Ok(Self {
            type_interval,
            delete_interval,
            dwell,
        })
    }

    /// Delay before the tick that leaves `mode`.
    pub fn delay_for(&self, mode: TypingMode) -> Duration {
        match mode {
            TypingMode::Growing => self.type_interval,
            TypingMode::PausedFull => self.dwell,
            TypingMode::Shrinking => self.delete_interval,
        }
    }
}

impl Default for RotatorTiming {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(DEFAULT_TYPE_INTERVAL),
            delete_interval: Duration::from_millis(DEFAULT_DELETE_INTERVAL),
            dwell: Duration::from_millis(DEFAULT_DWELL),
        }
    }
}

/// The typing caption state machine.
///
/// Pull the current frame with [`current_text`](Self::current_text) or
/// register a callback with [`subscribe`](Self::subscribe); callbacks receive
/// the text after every tick.
#[derive(Debug)]
pub struct TextRotator {
    script: RotationScript,
    timing: RotatorTiming,
    state: TypingState,
    timer: Option<TimerId>,
    observers: Observers<str>,
}

impl TextRotator {
    pub fn new(script: RotationScript, timing: RotatorTiming) -> Self {
        let mut rotator = Self {
            script,
            timing,
            state: TypingState {
                script_index: 0,
                cursor_length: 0,
                mode: TypingMode::Growing,
            },
            timer: None,
            observers: Observers::new(),
        };
        rotator.settle();
        rotator
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn script(&self) -> &RotationScript {
        &self.script
    }

    pub fn timing(&self) -> RotatorTiming {
        self.timing
    }

    /// The phrase currently being typed or deleted, in full.
    pub fn current_phrase(&self) -> &str {
        &self.script.phrases[self.state.script_index]
    }

    /// Text to display right now: the first `cursor_length` characters of the current phrase.
    pub fn current_text(&self) -> &str {
        char_prefix(self.current_phrase(), self.state.cursor_length)
    }

    /// Delay until the next tick from the current state.
    pub fn next_delay(&self) -> Duration {
        self.timing.delay_for(self.state.mode)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&str) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Perform one transition, notify observers, and return the delay until the next tick.
    pub fn advance(&mut self) -> Duration {
        let full = self.script.char_len(self.state.script_index);

        match self.state.mode {
            TypingMode::Growing => {
                self.state.cursor_length = (self.state.cursor_length + 1).min(full);
                self.settle();
            }
            TypingMode::PausedFull => {
                self.state.mode = TypingMode::Shrinking;
                if self.state.cursor_length == 0 {
                    self.next_phrase();
                }
            }
            TypingMode::Shrinking => {
                self.state.cursor_length = self.state.cursor_length.saturating_sub(1);
                if self.state.cursor_length == 0 {
                    self.next_phrase();
                }
            }
        }

        let text = char_prefix(
            &self.script.phrases[self.state.script_index],
            self.state.cursor_length,
        );
        self.observers.notify(text);

        self.next_delay()
    }

    fn next_phrase(&mut self) {
        self.state.script_index = (self.state.script_index + 1) % self.script.len();
        self.state.cursor_length = 0;
        self.state.mode = TypingMode::Growing;
        self.settle();
    }

    /// Leave Growing as soon as the phrase is fully shown (immediately for an empty phrase).
    fn settle(&mut self) {
        if self.state.mode == TypingMode::Growing
            && self.state.cursor_length >= self.script.char_len(self.state.script_index)
        {
            self.state.mode = TypingMode::PausedFull;
        }
    }
}

impl Animator for TextRotator {
    fn start(&mut self, timers: &mut TimerQueue, now: Duration) {
        let delay = self.next_delay();
        super::reschedule(&mut self.timer, timers, now, delay);
    }

    fn on_timer(&mut self, id: TimerId, timers: &mut TimerQueue, now: Duration) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        let delay = self.advance();
        super::reschedule(&mut self.timer, timers, now, delay);
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

    fn unit_timing() -> RotatorTiming {
        let tick = Duration::from_millis(1);
        RotatorTiming::new(tick, tick, tick).unwrap()
    }

    fn rotator(phrases: &[&str]) -> TextRotator {
        TextRotator::new(
            RotationScript::new(phrases.iter().copied()).unwrap(),
            unit_timing(),
        )
    }

    #[test]
    fn test_empty_script_is_rejected() {
        let result = RotationScript::new(Vec::<String>::new());
        assert_eq!(result, Err(AnimationError::EmptyScript));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let tick = Duration::from_millis(1);
        assert_eq!(
            RotatorTiming::new(Duration::ZERO, tick, tick),
            Err(AnimationError::ZeroInterval {
                name: "type_interval"
            })
        );
        assert!(RotatorTiming::new(tick, tick, Duration::ZERO).is_err());
    }

    #[test]
    fn test_initial_state() {
        let rotator = rotator(&["Hi"]);
        assert_eq!(
            rotator.state(),
            TypingState {
                script_index: 0,
                cursor_length: 0,
                mode: TypingMode::Growing,
            }
        );
        assert_eq!(rotator.current_text(), "");
    }

    #[test]
    fn test_hi_go_frame_sequence() {
        let mut rotator = rotator(&["Hi", "Go"]);
        let mut frames = vec![rotator.current_text().to_string()];
        for _ in 0..11 {
            rotator.advance();
            frames.push(rotator.current_text().to_string());
        }

        assert_eq!(
            frames,
            vec!["", "H", "Hi", "Hi", "H", "", "G", "Go", "Go", "G", "", "H"]
        );
    }

    #[test]
    fn test_delays_follow_mode() {
        let timing = RotatorTiming::new(
            Duration::from_millis(60),
            Duration::from_millis(30),
            Duration::from_millis(2000),
        )
        .unwrap();
        let mut rotator = TextRotator::new(RotationScript::new(["ab"]).unwrap(), timing);

        assert_eq!(rotator.next_delay(), Duration::from_millis(60));
        assert_eq!(rotator.advance(), Duration::from_millis(60)); // "a"
        assert_eq!(rotator.advance(), Duration::from_millis(2000)); // "ab", paused
        assert_eq!(rotator.advance(), Duration::from_millis(30)); // dwell over
        assert_eq!(rotator.advance(), Duration::from_millis(30)); // "a"
        assert_eq!(rotator.advance(), Duration::from_millis(60)); // "", next phrase
    }

    #[test]
    fn test_empty_phrase_dwells_then_advances() {
        let mut rotator = rotator(&["", "A"]);
        assert_eq!(rotator.state().mode, TypingMode::PausedFull);
        assert_eq!(rotator.current_text(), "");

        rotator.advance();
        assert_eq!(rotator.state().script_index, 1);
        assert_eq!(rotator.state().mode, TypingMode::Growing);

        rotator.advance();
        assert_eq!(rotator.current_text(), "A");
        assert_eq!(rotator.state().mode, TypingMode::PausedFull);
    }

    #[test]
    fn test_all_empty_script_never_spins() {
        let mut rotator = rotator(&["", ""]);
        for expected in [1, 0, 1, 0] {
            rotator.advance();
            assert_eq!(rotator.state().script_index, expected);
            assert_eq!(rotator.state().mode, TypingMode::PausedFull);
        }
    }

    #[test]
    fn test_multibyte_phrase_is_typed_per_character() {
        let mut rotator = rotator(&["né"]);
        rotator.advance();
        assert_eq!(rotator.current_text(), "n");
        rotator.advance();
        assert_eq!(rotator.current_text(), "né");
    }

    #[test]
    fn test_observers_receive_every_frame() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rotator = rotator(&["ok"]);
        let id = {
            let seen = Rc::clone(&seen);
            rotator.subscribe(move |text| seen.borrow_mut().push(text.to_string()))
        };

        rotator.advance();
        rotator.advance();
        assert!(rotator.unsubscribe(id));
        rotator.advance();

        assert_eq!(*seen.borrow(), vec!["o", "ok"]);
    }

    #[test]
    fn test_timer_lifecycle() {
        let mut timers = TimerQueue::new();
        let mut rotator = rotator(&["Hi"]);

        rotator.start(&mut timers, Duration::ZERO);
        rotator.start(&mut timers, Duration::ZERO);
        assert_eq!(timers.pending(), 1);
        assert!(rotator.is_running());

        let id = timers.pop_due(Duration::from_millis(1)).unwrap();
        assert!(rotator.on_timer(id, &mut timers, Duration::from_millis(1)));
        assert_eq!(rotator.current_text(), "H");
        assert_eq!(timers.pending(), 1);

        rotator.stop(&mut timers);
        rotator.stop(&mut timers);
        assert_eq!(timers.pending(), 0);
        assert!(!rotator.is_running());
    }

    #[test]
    fn test_foreign_timer_is_ignored() {
        let mut timers = TimerQueue::new();
        let mut rotator = rotator(&["Hi"]);
        rotator.start(&mut timers, Duration::ZERO);
        let foreign = timers.schedule(Duration::ZERO);

        assert!(!rotator.on_timer(foreign, &mut timers, Duration::ZERO));
        assert_eq!(rotator.current_text(), "");
    }
}
