//! Configuration for showreel: caption phrases, review content, timings and projects.
//!
//! ## Configuration Sources
//!
//! The configuration file is `showreel.toml`, looked up in:
//! 1. the directory passed with `--config <dir>`, if any
//! 2. `$XDG_CONFIG_HOME/showreel/showreel.toml` (via `dirs::config_dir`)
//!
//! A commented default file is written on first load.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Caption]
//! phrases = ["Crafting robust and scalable web applications.", "..."]
//! type_interval = 60       # Milliseconds per typed character (1-1000)
//! delete_interval = 30     # Milliseconds per deleted character (1-1000)
//! dwell = 2000             # Milliseconds a full phrase stays on screen (1-60000)
//!
//! #[Reviews]
//! autoplay_interval = 5000 # Milliseconds between automatic advances (500-120000)
//! pause_on_hover = true    # Pause autoplay while the pointer is over the card
//!
//! #[Loading]
//! loading_duration = 2000  # Milliseconds before the page is revealed (0 = no loading screen)
//!
//! [[reviews]]
//! author = "BBM Agency"
//! quote = "..."
//! rating = 5               # Stars (1-5)
//!
//! [[projects]]
//! title = "Shop"
//! tech_stack = ["React", "Node.js"]
//! live_url = "https://example.com"
//! display_order = 1
//! ```
//!
//! Every field is optional. Missing fields fall back to the defaults in
//! `common::constants`; present fields are validated on load and a bad value
//! fails with a message naming the field.

pub mod builder;
pub mod loading;
pub mod validation;
pub mod watcher;

use serde::Deserialize;
use std::time::Duration;

use crate::animation::{Review, ReviewList, RotationScript, RotatorTiming};
use crate::common::constants::*;
use crate::error::AnimationError;
use crate::projects::Project;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};
pub use watcher::ConfigWatcher;

/// Settings loaded from `showreel.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Phrases for the typing caption, in display order.
    pub phrases: Option<Vec<String>>,
    pub type_interval: Option<u64>,   // ms per typed character
    pub delete_interval: Option<u64>, // ms per deleted character
    pub dwell: Option<u64>,           // ms at full length

    pub autoplay_interval: Option<u64>, // ms between carousel advances
    /// Pause the carousel while the pointer is over the review card.
    pub pause_on_hover: Option<bool>,

    /// How long the loading screen stays up, in milliseconds. 0 disables it.
    pub loading_duration: Option<u64>,

    pub reviews: Option<Vec<Review>>,
    pub projects: Option<Vec<Project>>,
}

impl Config {
    /// Caption phrases, or the default script when none are configured.
    pub fn rotation_script(&self) -> Result<RotationScript, AnimationError> {
        match &self.phrases {
            Some(phrases) => RotationScript::new(phrases.iter().cloned()),
            None => Ok(RotationScript::default()),
        }
    }

    pub fn rotator_timing(&self) -> Result<RotatorTiming, AnimationError> {
        RotatorTiming::new(
            Duration::from_millis(self.type_interval.unwrap_or(DEFAULT_TYPE_INTERVAL)),
            Duration::from_millis(self.delete_interval.unwrap_or(DEFAULT_DELETE_INTERVAL)),
            Duration::from_millis(self.dwell.unwrap_or(DEFAULT_DWELL)),
        )
    }

    /// Configured reviews, or the built-in testimonials when none are configured.
    pub fn review_list(&self) -> Result<ReviewList, AnimationError> {
        match &self.reviews {
            Some(reviews) => ReviewList::new(reviews.clone()),
            None => Ok(ReviewList::default()),
        }
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval.unwrap_or(DEFAULT_AUTOPLAY_INTERVAL))
    }

    pub fn pause_on_hover(&self) -> bool {
        self.pause_on_hover.unwrap_or(DEFAULT_PAUSE_ON_HOVER)
    }

    pub fn loading_duration(&self) -> Duration {
        Duration::from_millis(self.loading_duration.unwrap_or(DEFAULT_LOADING_DURATION))
    }

    /// Bar fill time: the default ratio (1500 of 2000 ms) applied to the configured duration.
    pub fn loading_fill(&self) -> Duration {
        let duration = self.loading_duration();
        duration.mul_f64(DEFAULT_LOADING_FILL as f64 / DEFAULT_LOADING_DURATION as f64)
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.clone().unwrap_or_default()
    }

    /// Load configuration from the standard location.
    pub fn load() -> anyhow::Result<Self> {
        loading::load()
    }

    /// Log the effective configuration in the block style used at startup.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");

        let phrases = self.phrases.as_ref().map_or(DEFAULT_PHRASES.len(), Vec::len);
        log_indented!("Caption phrases: {phrases}");
        log_indented!(
            "Typing: {}ms per character, deleting: {}ms, dwell: {}ms",
            self.type_interval.unwrap_or(DEFAULT_TYPE_INTERVAL),
            self.delete_interval.unwrap_or(DEFAULT_DELETE_INTERVAL),
            self.dwell.unwrap_or(DEFAULT_DWELL)
        );

        let reviews = self.reviews.as_ref().map_or(DEFAULT_REVIEWS.len(), Vec::len);
        log_indented!(
            "Reviews: {reviews}, autoplay every {}ms{}",
            self.autoplay_interval.unwrap_or(DEFAULT_AUTOPLAY_INTERVAL),
            if self.pause_on_hover() {
                ", paused on hover"
            } else {
                ""
            }
        );

        match self.loading_duration.unwrap_or(DEFAULT_LOADING_DURATION) {
            0 => log_indented!("Loading screen: disabled"),
            ms => log_indented!("Loading screen: {ms}ms"),
        }

        log_indented!(
            "Projects: {}",
            self.projects.as_ref().map_or(0, Vec::len)
        );
    }
}
