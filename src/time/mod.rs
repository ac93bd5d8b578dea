//! Clocks and the timer queue that drive every animation.

pub mod source;
pub mod timers;

pub use source::{RealTimeSource, SimulatedTimeSource, TimeSource};
pub use timers::{TimerId, TimerQueue};
