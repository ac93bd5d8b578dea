//! Default configuration file generation.
//!
//! The generated file lists every setting with its default and a short
//! comment, grouped under `#[Section]` headers, followed by the default
//! review tables and a commented project example.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;

/// Write a commented default configuration to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    let phrases = DEFAULT_PHRASES
        .iter()
        .map(|p| toml_string(p))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = ConfigBuilder::new()
        .add_section("Caption")
        .add_setting(
            "phrases",
            &format!("[{phrases}]"),
            "Phrases typed by the hero caption, in order",
        )
        .add_setting(
            "type_interval",
            &DEFAULT_TYPE_INTERVAL.to_string(),
            &format!(
                "Milliseconds per typed character ({MINIMUM_CHAR_INTERVAL}-{MAXIMUM_CHAR_INTERVAL})"
            ),
        )
        .add_setting(
            "delete_interval",
            &DEFAULT_DELETE_INTERVAL.to_string(),
            &format!(
                "Milliseconds per deleted character ({MINIMUM_CHAR_INTERVAL}-{MAXIMUM_CHAR_INTERVAL})"
            ),
        )
        .add_setting(
            "dwell",
            &DEFAULT_DWELL.to_string(),
            &format!(
                "Milliseconds a full phrase stays on screen ({MINIMUM_DWELL}-{MAXIMUM_DWELL})"
            ),
        )
        .add_section("Reviews")
        .add_setting(
            "autoplay_interval",
            &DEFAULT_AUTOPLAY_INTERVAL.to_string(),
            &format!(
                "Milliseconds between automatic advances ({MINIMUM_AUTOPLAY_INTERVAL}-{MAXIMUM_AUTOPLAY_INTERVAL})"
            ),
        )
        .add_setting(
            "pause_on_hover",
            &DEFAULT_PAUSE_ON_HOVER.to_string(),
            "Pause autoplay while the pointer is over the review card",
        )
        .add_section("Loading")
        .add_setting(
            "loading_duration",
            &DEFAULT_LOADING_DURATION.to_string(),
            &format!(
                "Milliseconds before the page is revealed (0-{MAXIMUM_LOADING_DURATION} | 0 = no loading screen)"
            ),
        );

    for (author, quote, rating) in DEFAULT_REVIEWS {
        builder = builder.add_table(
            "reviews",
            &[
                ("author", toml_string(author)),
                ("quote", toml_string(quote)),
                ("rating", rating.to_string()),
            ],
        );
    }

    builder
        .add_comment_block(&[
            "[[projects]]",
            "title = \"Storefront\"",
            "description = \"Full stack shop with cart and checkout\"",
            "tech_stack = [\"React\", \"Node.js\", \"MongoDB\"]",
            "live_url = \"https://example.com\"",
            "github_url = \"#\"",
            "display_order = 1",
        ])
        .build()
}

/// Quote a string as a TOML string value.
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Builder for a commented TOML file with aligned inline comments.
struct ConfigBuilder {
    lines: Vec<Line>,
}

enum Line {
    Section(String),
    Setting {
        key: String,
        value: String,
        comment: String,
    },
    Raw(String),
}

impl ConfigBuilder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.lines.push(Line::Section(title.to_string()));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.lines.push(Line::Setting {
            key: key.to_string(),
            value: value.to_string(),
            comment: comment.to_string(),
        });
        self
    }

    /// Append an array-of-tables entry (`[[name]]`).
    fn add_table(mut self, name: &str, fields: &[(&str, String)]) -> Self {
        self.lines.push(Line::Raw(String::new()));
        self.lines.push(Line::Raw(format!("[[{name}]]")));
        for (key, value) in fields {
            self.lines.push(Line::Raw(format!("{key} = {value}")));
        }
        self
    }

    fn add_comment_block(mut self, lines: &[&str]) -> Self {
        self.lines.push(Line::Raw(String::new()));
        for line in lines {
            self.lines.push(Line::Raw(format!("# {line}")));
        }
        self
    }

    fn build(self) -> String {
        // Comments line up one column past the longest `key = value` among short settings
        let width = self
            .lines
            .iter()
            .filter_map(|line| match line {
                Line::Setting { key, value, .. } if value.len() <= 24 => {
                    Some(key.len() + 3 + value.len())
                }
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Section(title) => {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(&format!("#[{title}]\n"));
                }
                Line::Setting {
                    key,
                    value,
                    comment,
                } => {
                    let pair = format!("{key} = {value}");
                    if pair.len() > width {
                        out.push_str(&format!("# {comment}\n{pair}\n"));
                    } else {
                        out.push_str(&format!("{pair:<width$} # {comment}\n"));
                    }
                }
                Line::Raw(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loading::parse_config;
    use crate::config::validation::validate_config;

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config = parse_config(&default_config_content()).unwrap();
        validate_config(&config).unwrap();

        assert_eq!(config.type_interval, Some(DEFAULT_TYPE_INTERVAL));
        assert_eq!(config.dwell, Some(DEFAULT_DWELL));
        assert_eq!(config.autoplay_interval, Some(DEFAULT_AUTOPLAY_INTERVAL));
        assert_eq!(
            config.phrases.as_ref().map(Vec::len),
            Some(DEFAULT_PHRASES.len())
        );
        assert_eq!(
            config.reviews.as_ref().map(Vec::len),
            Some(DEFAULT_REVIEWS.len())
        );
        assert!(config.projects.is_none());
    }

    #[test]
    fn test_toml_string_round_trips_quotes() {
        let original = "say \"hi\" and it's fine";
        let parsed: toml::Table =
            toml::from_str(&format!("x = {}", toml_string(original))).unwrap();
        assert_eq!(parsed["x"].as_str(), Some(original));
    }

    #[test]
    fn test_short_settings_share_comment_column() {
        let content = ConfigBuilder::new()
            .add_section("S")
            .add_setting("a", "1", "first")
            .add_setting("long_key", "22", "second")
            .build();

        assert_eq!(content, "#[S]\na = 1         # first\nlong_key = 22 # second\n");
    }
}
