//! Builder API for constructing wrappers.
//!
//! Configuration problems are programmer errors and are reported
//! synchronously from `build`, all of them at once.

pub mod button;
pub mod error;

pub use button::MagicButtonBuilder;
pub use error::{ConfigError, ConfigErrors};
