//! Command-line command handlers for showreel.
//!
//! The live view is the default command and lives in `crate::showreel`; the
//! one-shot commands are implemented here, one per submodule.

pub mod frames;
pub mod help;
