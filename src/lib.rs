//! # Showreel Library
//!
//! Internal library for the showreel binary: the animated pieces of a
//! portfolio landing page (typing caption, autoplay review carousel, loading
//! gate, project shelf) driven by a single-threaded timer queue and played
//! in the terminal.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Showreel` runs the live view with resource management
//! - **Animation**: `animation` holds the state machines and the `Animator` trait
//! - **Stage**: `stage` owns one view's timers and machines, and tears them down
//! - **Time**: `time` provides the timer queue and real/simulated clocks
//! - **Configuration**: `config` for TOML-based settings with hot-reload
//! - **Rendering**: `render` composes frames and decodes terminal input
//! - **Commands**: `commands` for one-shot CLI commands (`frames`, `help`)
//! - **Infrastructure**: signal handling, logging and utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

// Public API modules
pub mod animation;
pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod projects;
pub mod render;
pub mod stage;
pub mod time;

// Internal modules
mod showreel;

// Re-export for binary
pub use error::AnimationError;
pub use showreel::Showreel;
pub use stage::{Control, Stage};
