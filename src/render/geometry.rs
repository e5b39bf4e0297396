//! Element geometry captured on first activation.
//!
//! The wrapper measures its element once, right before the first pending
//! frame, and keeps the result for the rest of its life. The box is never
//! remeasured: if the element resizes after capture, the size lock and icon
//! size keep the first measurement.

use crate::host::{BoxMetrics, Element, MeasureError};
use serde::{Deserialize, Serialize};

/// Text color used when the element reports none.
pub const DEFAULT_TEXT_COLOR: &str = "#000";

/// Size and color of the wrapped element at first activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapturedGeometry {
    /// Border-box width in pixels.
    pub width: f64,
    /// Border-box height in pixels.
    pub height: f64,
    /// Largest square that fits in the content box.
    pub icon_size: f64,
    /// Computed text color.
    pub color: String,
}

impl CapturedGeometry {
    /// Derive geometry from raw metrics.
    ///
    /// `icon_size` is the smaller content-box dimension, clamped at zero when
    /// padding exceeds the box.
    ///
    /// # Example
    ///
    /// ```rust
    /// use magic_button::host::{BoxMetrics, Insets};
    /// use magic_button::render::geometry::CapturedGeometry;
    ///
    /// let metrics = BoxMetrics {
    ///     width: 120.0,
    ///     height: 40.0,
    ///     padding: Insets::symmetric(8.0, 16.0),
    ///     color: Some("rgb(255, 255, 255)".into()),
    /// };
    /// let geometry = CapturedGeometry::from_metrics(&metrics).unwrap();
    /// assert_eq!(geometry.icon_size, 24.0);
    /// ```
    pub fn from_metrics(metrics: &BoxMetrics) -> Result<Self, MeasureError> {
        let finite = [
            metrics.width,
            metrics.height,
            metrics.padding.top,
            metrics.padding.right,
            metrics.padding.bottom,
            metrics.padding.left,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(MeasureError::NonFinite {
                width: metrics.width,
                height: metrics.height,
            });
        }

        let content_height = metrics.height - metrics.padding.vertical();
        let content_width = metrics.width - metrics.padding.horizontal();
        let color = metrics
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_TEXT_COLOR)
            .to_string();

        Ok(Self {
            width: metrics.width,
            height: metrics.height,
            icon_size: content_height.min(content_width).max(0.0),
            color,
        })
    }
}

/// Measure `element` and derive its geometry.
///
/// The caller is responsible for invoking this at most once per wrapper.
pub fn capture_once<E: Element + ?Sized>(element: &E) -> Result<CapturedGeometry, MeasureError> {
    let metrics = element.measure()?;
    CapturedGeometry::from_metrics(&metrics)
}
