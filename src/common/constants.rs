//! Application-wide constants: defaults, validation limits and exit codes.
//!
//! All durations are milliseconds unless the name says otherwise.

// # Caption (typing rotator) defaults

/// Phrases shown by the hero caption when the config does not list any.
pub const DEFAULT_PHRASES: &[&str] = &[
    "Crafting robust and scalable web applications.",
    "Building with MongoDB, Express, React & Node.js.",
    "Turning ideas into production-ready code.",
];

pub const DEFAULT_TYPE_INTERVAL: u64 = 60;
pub const DEFAULT_DELETE_INTERVAL: u64 = 30;
pub const DEFAULT_DWELL: u64 = 2000;

pub const MINIMUM_CHAR_INTERVAL: u64 = 1;
pub const MAXIMUM_CHAR_INTERVAL: u64 = 1000;
pub const MINIMUM_DWELL: u64 = 1;
pub const MAXIMUM_DWELL: u64 = 60_000;

// # Review carousel defaults

pub const DEFAULT_AUTOPLAY_INTERVAL: u64 = 5000;
pub const DEFAULT_PAUSE_ON_HOVER: bool = true;

pub const MINIMUM_AUTOPLAY_INTERVAL: u64 = 500;
pub const MAXIMUM_AUTOPLAY_INTERVAL: u64 = 120_000;

pub const MINIMUM_RATING: u8 = 1;
pub const MAXIMUM_RATING: u8 = 5;

/// (author, quote, rating) triples used when the config has no `[[reviews]]`.
pub const DEFAULT_REVIEWS: &[(&str, &str, u8)] = &[
    (
        "Mortgage Broker Client",
        "Arafat built a stunning, high-converting website for our mortgage brokerage. The site is fast, professional, and our lead generation has increased significantly since launch. Exceptional work!",
        5,
    ),
    (
        "BBM Agency",
        "Arafat delivered a polished, modern website for our agency that perfectly captures our brand identity. His technical expertise and creative vision made the entire process seamless. Highly recommended!",
        5,
    ),
];

// # Loading gate defaults

pub const DEFAULT_LOADING_DURATION: u64 = 2000;
/// The progress bar fills faster than the gate lifts, leaving a short full-bar hold.
pub const DEFAULT_LOADING_FILL: u64 = 1500;
pub const MAXIMUM_LOADING_DURATION: u64 = 10_000;

// # Projects

/// Link shown for projects without a usable URL.
pub const FALLBACK_LINK: &str = "/404";
pub const PLACEHOLDER_LINK: &str = "#";

// # Timer driver

/// Smallest delay the timer queue will schedule, so a zero interval can never spin.
pub const MINIMUM_TIMER_DELAY_MS: u64 = 1;

/// Redraw cadence while something animates continuously (loading bar).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Longest the live view waits for input when no timer is pending.
pub const IDLE_POLL_MS: u64 = 250;

/// Debounce for config file change events.
pub const RELOAD_DEBOUNCE_MS: u64 = 500;

// # Frames command

pub const DEFAULT_FRAME_TICKS: usize = 64;

// # Exit codes

pub const EXIT_FAILURE: i32 = 1;

// # Config file

pub const CONFIG_DIR_NAME: &str = "showreel";
pub const CONFIG_FILE_NAME: &str = "showreel.toml";
