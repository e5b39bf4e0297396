//! Status icons.
//!
//! Maps a non-idle [`Status`] plus the effective color and size to an
//! [`IconFragment`]: a sized container, a glyph and the animation bound to
//! that status. Stateless and deterministic.

use super::styles::{POP, SHAKE, SPIN};
use crate::core::Status;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon edge length: a pixel count or any CSS length.
///
/// Deserializes from either a JSON number or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconSize {
    Px(f64),
    Css(String),
}

impl IconSize {
    /// Pixel value, if this is a pixel size.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(px) => Some(*px),
            Self::Css(_) => None,
        }
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Css(css) => f.write_str(css),
        }
    }
}

impl From<f64> for IconSize {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<u32> for IconSize {
    fn from(px: u32) -> Self {
        Self::Px(f64::from(px))
    }
}

impl From<&str> for IconSize {
    fn from(css: &str) -> Self {
        Self::Css(css.to_string())
    }
}

impl From<String> for IconSize {
    fn from(css: String) -> Self {
        Self::Css(css)
    }
}

/// Glyph drawn inside the icon container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// Open ring, rotated while pending.
    Spinner,
    Check,
    Cross,
}

/// CSS animation applied to an icon container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Animation {
    /// Keyframes name registered by [`super::styles`].
    pub name: &'static str,
    /// Everything after the name in the `animation` shorthand.
    pub timing: &'static str,
}

impl Animation {
    pub const SPIN: Self = Self {
        name: SPIN,
        timing: "0.9s linear infinite",
    };
    pub const POP: Self = Self {
        name: POP,
        timing: "0.3s cubic-bezier(0.22,1,0.36,1) forwards",
    };
    pub const SHAKE: Self = Self {
        name: SHAKE,
        timing: "0.4s ease",
    };

    /// Value for the CSS `animation` property.
    pub fn css(&self) -> String {
        format!("{} {}", self.name, self.timing)
    }
}

/// A renderable icon: container size, color, glyph and animation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IconFragment {
    /// Stable key so hosts can diff icon swaps.
    pub key: &'static str,
    pub glyph: Glyph,
    pub color: String,
    pub size: IconSize,
    pub animation: Animation,
}

impl IconFragment {
    /// Inline style of the container, in declaration order.
    pub fn container_style(&self) -> Vec<(&'static str, String)> {
        let dim = self.size.to_string();
        vec![
            ("width", dim.clone()),
            ("height", dim),
            ("display", "inline-flex".to_string()),
            ("align-items", "center".to_string()),
            ("justify-content", "center".to_string()),
            ("line-height", "0".to_string()),
            ("flex-shrink", "0".to_string()),
            ("animation", self.animation.css()),
        ]
    }
}

type Binding = (&'static str, Glyph, Animation);

const PENDING: Binding = ("loader", Glyph::Spinner, Animation::SPIN);
const SUCCESS: Binding = ("success", Glyph::Check, Animation::POP);
const FAILURE: Binding = ("failure", Glyph::Cross, Animation::SHAKE);

fn fragment((key, glyph, animation): Binding, color: &str, size: &IconSize) -> IconFragment {
    IconFragment {
        key,
        glyph,
        color: color.to_string(),
        size: size.clone(),
        animation,
    }
}

/// Resolve the icon for `status`. Idle has no icon.
///
/// # Example
///
/// ```rust
/// use magic_button::core::Status;
/// use magic_button::render::icons::{resolve_icon, Glyph, IconSize};
///
/// let icon = resolve_icon(Status::Success, "#fff", &IconSize::Px(18.0)).unwrap();
/// assert_eq!(icon.glyph, Glyph::Check);
/// assert_eq!(icon.animation.name, "mb-pop");
/// assert_eq!(icon.size.to_string(), "18px");
///
/// assert!(resolve_icon(Status::Idle, "#fff", &IconSize::Px(18.0)).is_none());
/// ```
pub fn resolve_icon(status: Status, color: &str, size: &IconSize) -> Option<IconFragment> {
    let binding = match status {
        Status::Idle => return None,
        Status::Pending => PENDING,
        Status::Success => SUCCESS,
        Status::Failure => FAILURE,
    };
    Some(fragment(binding, color, size))
}

/// Icons for every non-idle status, built for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct IconSet {
    pending: IconFragment,
    success: IconFragment,
    failure: IconFragment,
}

impl IconSet {
    pub fn new(color: &str, size: &IconSize) -> Self {
        Self {
            pending: fragment(PENDING, color, size),
            success: fragment(SUCCESS, color, size),
            failure: fragment(FAILURE, color, size),
        }
    }

    /// Icon for `status`, `None` for idle.
    pub fn get(&self, status: Status) -> Option<&IconFragment> {
        match status {
            Status::Idle => None,
            Status::Pending => Some(&self.pending),
            Status::Success => Some(&self.success),
            Status::Failure => Some(&self.failure),
        }
    }
}
