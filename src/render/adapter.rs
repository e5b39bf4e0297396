//! Turn the current status and geometry into a [`View`] for the host.

use super::geometry::CapturedGeometry;
use super::icons::{IconFragment, IconSet, IconSize};
use crate::config::IconOverrides;
use crate::core::Status;
use serde::Serialize;

/// Icon color when neither an override nor a measurement is available.
pub const DEFAULT_ICON_COLOR: &str = "currentColor";

/// Icon edge in pixels when neither an override nor a measurement is
/// available.
pub const DEFAULT_ICON_SIZE: f64 = 16.0;

/// Width and height the element is pinned to while not idle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SizeLock {
    pub width: f64,
    pub height: f64,
}

/// What the host should show for the wrapped element.
///
/// An idle view means "render the element exactly as supplied". Any other
/// view replaces the label with `icon`, centers it, and pins the element to
/// `size_lock` when geometry has been captured.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct View {
    pub status: Status,
    pub size_lock: Option<SizeLock>,
    pub icon: Option<IconFragment>,
}

impl View {
    /// The unmodified element.
    pub fn original() -> Self {
        Self {
            status: Status::Idle,
            size_lock: None,
            icon: None,
        }
    }

    /// True when the element should render exactly as supplied.
    pub fn is_original(&self) -> bool {
        self.status == Status::Idle
    }

    /// Inline style to merge over the element's own style, in order.
    ///
    /// Empty for the idle view.
    pub fn style(&self) -> Vec<(&'static str, String)> {
        if self.is_original() {
            return Vec::new();
        }
        let mut style = Vec::with_capacity(5);
        if let Some(lock) = self.size_lock {
            style.push(("width", format!("{}px", lock.width)));
            style.push(("height", format!("{}px", lock.height)));
        }
        style.push(("display", "inline-flex".to_string()));
        style.push(("align-items", "center".to_string()));
        style.push(("justify-content", "center".to_string()));
        style
    }
}

/// Color the icon is drawn in: override, then measured color, then
/// `currentColor`.
pub fn effective_icon_color(
    overrides: &IconOverrides,
    geometry: Option<&CapturedGeometry>,
) -> String {
    overrides
        .color
        .clone()
        .or_else(|| geometry.map(|g| g.color.clone()))
        .unwrap_or_else(|| DEFAULT_ICON_COLOR.to_string())
}

/// Icon size: override, then measured icon size, then 16px.
///
/// # Example
///
/// ```rust
/// use magic_button::config::IconOverrides;
/// use magic_button::render::adapter::effective_icon_size;
/// use magic_button::render::icons::IconSize;
///
/// assert_eq!(effective_icon_size(&IconOverrides::default(), None), IconSize::Px(16.0));
///
/// let overrides = IconOverrides { size: Some(IconSize::from("2em")), ..Default::default() };
/// assert_eq!(effective_icon_size(&overrides, None), IconSize::from("2em"));
/// ```
pub fn effective_icon_size(
    overrides: &IconOverrides,
    geometry: Option<&CapturedGeometry>,
) -> IconSize {
    overrides
        .size
        .clone()
        .or_else(|| geometry.map(|g| IconSize::Px(g.icon_size)))
        .unwrap_or(IconSize::Px(DEFAULT_ICON_SIZE))
}

/// Build the view for `status`.
///
/// Icons are rebuilt on every call rather than cached.
pub fn render(
    status: Status,
    geometry: Option<&CapturedGeometry>,
    overrides: &IconOverrides,
) -> View {
    if !status.has_icon() {
        return View::original();
    }
    let color = effective_icon_color(overrides, geometry);
    let size = effective_icon_size(overrides, geometry);
    let icons = IconSet::new(&color, &size);
    View {
        status,
        size_lock: geometry.map(|g| SizeLock {
            width: g.width,
            height: g.height,
        }),
        icon: icons.get(status).cloned(),
    }
}
