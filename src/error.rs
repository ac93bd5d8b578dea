//! Errors raised by the animation core.
//!
//! Construction errors are configuration mistakes and are fatal for the
//! affected view. `IndexOutOfRange` is returned to the caller of a navigation
//! call and never mutates state.

use std::fmt;

/// Error type for the typing rotator and the review carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A rotation script with no phrases.
    EmptyScript,
    /// A review list with no reviews.
    EmptyReviewList,
    /// A review whose star rating is outside 1..=5.
    InvalidRating { index: usize, rating: u8 },
    /// A timing value of zero where a positive interval is required.
    ZeroInterval { name: &'static str },
    /// A jump to an index past the end of the review list.
    IndexOutOfRange { index: usize, len: usize },
}

impl AnimationError {
    /// Whether this error comes from bad construction input rather than a bad call.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, AnimationError::IndexOutOfRange { .. })
    }
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationError::EmptyScript => {
                write!(f, "rotation script must contain at least one phrase")
            }
            AnimationError::EmptyReviewList => {
                write!(f, "review list must contain at least one review")
            }
            AnimationError::InvalidRating { index, rating } => write!(
                f,
                "review {} has rating {rating}, expected 1 to 5 stars",
                index + 1
            ),
            AnimationError::ZeroInterval { name } => {
                write!(f, "{name} must be greater than zero")
            }
            AnimationError::IndexOutOfRange { index, len } => {
                write!(f, "review index {index} is out of range (0..{len})")
            }
        }
    }
}

impl std::error::Error for AnimationError {}
