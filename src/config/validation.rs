//! Configuration validation.
//!
//! Rejects values the animators cannot run with (empty lists, zero or absurd
//! intervals, ratings outside the star range) before a stage is built, so the
//! error names the offending field instead of surfacing mid-animation.

use anyhow::Result;
use std::ops::RangeInclusive;

use super::Config;
use crate::common::constants::*;

/// Validate every configured field.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(phrases) = &config.phrases
        && phrases.is_empty()
    {
        anyhow::bail!("phrases must contain at least one phrase");
    }

    validate_range(
        config.type_interval,
        "type_interval",
        MINIMUM_CHAR_INTERVAL..=MAXIMUM_CHAR_INTERVAL,
    )?;
    validate_range(
        config.delete_interval,
        "delete_interval",
        MINIMUM_CHAR_INTERVAL..=MAXIMUM_CHAR_INTERVAL,
    )?;
    validate_range(config.dwell, "dwell", MINIMUM_DWELL..=MAXIMUM_DWELL)?;
    validate_range(
        config.autoplay_interval,
        "autoplay_interval",
        MINIMUM_AUTOPLAY_INTERVAL..=MAXIMUM_AUTOPLAY_INTERVAL,
    )?;
    validate_range(
        config.loading_duration,
        "loading_duration",
        0..=MAXIMUM_LOADING_DURATION,
    )?;

    if let Some(reviews) = &config.reviews {
        if reviews.is_empty() {
            anyhow::bail!("reviews must contain at least one review when set");
        }
        for (index, review) in reviews.iter().enumerate() {
            if review.author.trim().is_empty() {
                anyhow::bail!("review {} has an empty author", index + 1);
            }
            if !(MINIMUM_RATING..=MAXIMUM_RATING).contains(&review.rating) {
                anyhow::bail!(
                    "review {} rating ({}) must be between {} and {} stars",
                    index + 1,
                    review.rating,
                    MINIMUM_RATING,
                    MAXIMUM_RATING
                );
            }
        }
    }

    if let Some(projects) = &config.projects {
        for (index, project) in projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                anyhow::bail!("project {} has an empty title", index + 1);
            }
        }
    }

    Ok(())
}

/// Millisecond value check shared by every timing field.
fn validate_range(value: Option<u64>, name: &str, range: RangeInclusive<u64>) -> Result<()> {
    if let Some(ms) = value
        && !range.contains(&ms)
    {
        anyhow::bail!(
            "{} ({} ms) must be between {} and {} milliseconds",
            name,
            ms,
            range.start(),
            range.end()
        );
    }
    Ok(())
}
