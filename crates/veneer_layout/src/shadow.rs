//! Edge shadows
//!
//! Opacity of the "more content this way" gradients at the start and end
//! of an axis. Opacity grows linearly with the distance still scrollable
//! towards that edge and saturates once it exceeds the sensitivity
//! threshold.

use crate::geometry::scroll_range;

/// Default sensitivity threshold in pixels
pub const DEFAULT_SHADOW_THRESHOLD: f32 = 50.0;

/// Opacity for a shadow `distance` pixels away from its edge
///
/// `clamp(distance / threshold, 0, 1)`; a non-positive threshold behaves
/// as a step at zero.
pub fn shadow_opacity(distance: f32, threshold: f32) -> f32 {
    if !distance.is_finite() || distance <= 0.0 {
        return 0.0;
    }
    if !(threshold.is_finite() && threshold > 0.0) {
        return 1.0;
    }
    (distance / threshold).clamp(0.0, 1.0)
}

/// Shadow opacities for both edges of one axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeShadows {
    /// Top (vertical) or left (horizontal) edge
    pub start: f32,
    /// Bottom (vertical) or right (horizontal) edge
    pub end: f32,
}

impl EdgeShadows {
    pub const NONE: EdgeShadows = EdgeShadows {
        start: 0.0,
        end: 0.0,
    };

    /// Shadows for a scroll offset within `[0, extent - visible]`
    pub fn from_scroll(offset: f32, visible: f32, extent: f32, threshold: f32) -> Self {
        let remaining = scroll_range(visible, extent) - offset;
        Self {
            start: shadow_opacity(offset, threshold),
            end: shadow_opacity(remaining, threshold),
        }
    }
}

/// Inset applied to the end-edge shadow so it sits above (or beside) a
/// visible cross-axis track instead of under it
pub fn end_shadow_inset(cross_track_visible: bool, track_thickness: f32) -> f32 {
    if cross_track_visible && track_thickness.is_finite() {
        track_thickness.max(0.0)
    } else {
        0.0
    }
}
