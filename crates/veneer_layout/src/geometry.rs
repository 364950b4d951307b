//! Geometry sampler
//!
//! Pure functions from measured viewport/content/track metrics to thumb
//! size and offset. Every formula guards its denominator: content that fits
//! the viewport (or a viewport that has not been laid out yet) is the
//! "axis not scrollable" case, never a division by zero.

use serde::{Deserialize, Serialize};

/// Where the content extent of an axis is read from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentExtentSource {
    /// The viewport's native scroll extent (scrollWidth/scrollHeight)
    #[default]
    NativeOverflow,
    /// The box size of the inner content measurement node
    MeasuredContent,
}

/// Measured inputs for one axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisMetrics {
    /// Visible viewport length (clientHeight/clientWidth)
    pub visible: f32,
    /// Total content length
    pub extent: f32,
    /// Current scroll offset (scrollTop/scrollLeft)
    pub offset: f32,
    /// Track length, `None` while the track is not attached
    pub track_length: Option<f32>,
}

/// Derived thumb geometry for one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGeometry {
    /// Whether content overflows on this axis (track rendered)
    pub scrollable: bool,
    /// Visible fraction of the content, in (0, 1]
    pub thumb_ratio: f32,
    /// Track length in pixels (0 while detached)
    pub track_length: f32,
    /// Thumb length in pixels
    pub thumb_length: f32,
    /// Thumb offset from the track start in pixels
    pub thumb_offset: f32,
}

impl AxisGeometry {
    /// Geometry of an axis whose content fits: no track, full-size thumb
    pub const HIDDEN: AxisGeometry = AxisGeometry {
        scrollable: false,
        thumb_ratio: 1.0,
        track_length: 0.0,
        thumb_length: 0.0,
        thumb_offset: 0.0,
    };
}

impl Default for AxisGeometry {
    fn default() -> Self {
        Self::HIDDEN
    }
}

fn usable(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Maximum scroll offset, `extent - visible`, or 0 if nothing overflows
pub fn scroll_range(visible: f32, extent: f32) -> f32 {
    if !usable(visible) || !usable(extent) {
        return 0.0;
    }
    (extent - visible).max(0.0)
}

/// Visible fraction of the content: `visible / extent`, 1 when content fits
pub fn thumb_size_ratio(visible: f32, extent: f32) -> f32 {
    if !usable(visible) || !usable(extent) || visible <= 0.0 || extent <= visible {
        return 1.0;
    }
    visible / extent
}

/// Thumb offset in pixels:
/// `(track - thumb) * offset / (extent - visible)`, clamped to the track
pub fn thumb_offset(
    track_length: f32,
    thumb_length: f32,
    offset: f32,
    visible: f32,
    extent: f32,
) -> f32 {
    let range = scroll_range(visible, extent);
    let travel = (track_length - thumb_length).max(0.0);
    if range <= 0.0 || !travel.is_finite() || !offset.is_finite() {
        return 0.0;
    }
    (travel * (offset / range)).clamp(0.0, travel)
}

/// Sample one axis
pub fn sample_axis(metrics: &AxisMetrics) -> AxisGeometry {
    let thumb_ratio = thumb_size_ratio(metrics.visible, metrics.extent);
    if thumb_ratio >= 1.0 {
        return AxisGeometry::HIDDEN;
    }

    let track_length = metrics
        .track_length
        .filter(|length| usable(*length))
        .unwrap_or(0.0);
    let thumb_length = thumb_ratio * track_length;

    AxisGeometry {
        scrollable: true,
        thumb_ratio,
        track_length,
        thumb_length,
        thumb_offset: thumb_offset(
            track_length,
            thumb_length,
            metrics.offset,
            metrics.visible,
            metrics.extent,
        ),
    }
}
