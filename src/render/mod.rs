//! Rendering collaborators of the lifecycle engine.
//!
//! - [`styles`]: one-time registration of the icon keyframes
//! - [`icons`]: status to icon fragment mapping
//! - [`geometry`]: first-activation measurement of the wrapped element
//! - [`adapter`]: status + geometry to [`View`]
//!
//! These are thin and mostly pure; the hazards live in [`crate::effects`].

pub mod adapter;
pub mod geometry;
pub mod icons;
pub mod styles;

pub use adapter::{render, SizeLock, View};
pub use geometry::CapturedGeometry;
pub use icons::{IconFragment, IconSet, IconSize};
