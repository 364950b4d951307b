//! Pointer-drag controller
//!
//! Converts a pointer position on a track into an absolute scroll offset.
//! Each move recomputes the target from the pointer coordinate rather than
//! accumulating deltas, so missed or coalesced pointer events cannot make
//! the thumb drift away from the pointer.

use serde::{Deserialize, Serialize};
use veneer_core::geometry::{Axis, Point, Rect};

use crate::geometry::scroll_range;

/// Which part of the thumb lands under the pointer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbAnchor {
    /// Thumb center follows the pointer
    #[default]
    Center,
    /// Thumb leading edge follows the pointer
    LeadingEdge,
}

/// Scroll offset that puts the thumb's anchor under `pointer`
///
/// `fraction = (pointer - track_start) / track_length`;
/// `Center` yields `fraction * extent - visible / 2` (half a thumb length
/// converted to content units), `LeadingEdge` yields `fraction * extent`.
/// The result is clamped to `[0, extent - visible]`. Returns `None` for a
/// detached or zero-length track.
pub fn pointer_to_scroll_offset(
    pointer: f32,
    track_start: f32,
    track_length: f32,
    visible: f32,
    extent: f32,
    anchor: ThumbAnchor,
) -> Option<f32> {
    if !(track_length.is_finite() && track_length > 0.0) || !pointer.is_finite() {
        return None;
    }

    let fraction = (pointer - track_start) / track_length;
    let target = match anchor {
        ThumbAnchor::Center => fraction * extent - visible / 2.0,
        ThumbAnchor::LeadingEdge => fraction * extent,
    };
    if !target.is_finite() {
        return None;
    }

    Some(target.clamp(0.0, scroll_range(visible, extent)))
}

/// An active drag on one track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub axis: Axis,
    /// Last pointer position accepted by the session
    pub last_pointer: Point,
}

/// Owns the (single) drag session
///
/// Sessions are exclusive: while one axis drags, presses and moves for the
/// other axis are ignored until the session ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn active_axis(&self) -> Option<Axis> {
        self.session.map(|session| session.axis)
    }

    pub fn is_active(&self, axis: Axis) -> bool {
        self.active_axis() == Some(axis)
    }

    /// Start a session on `axis`
    ///
    /// Returns false (and leaves the current session untouched) if another
    /// session is already active.
    pub fn begin(&mut self, axis: Axis, pointer: Point) -> bool {
        match self.session {
            Some(session) if session.axis != axis => false,
            _ => {
                self.session = Some(DragSession {
                    axis,
                    last_pointer: pointer,
                });
                true
            }
        }
    }

    /// Accept a pointer move for the active session
    ///
    /// Moves past the track's start or end along the drag axis are
    /// rejected (`None`) so the thumb stops at the track boundary; straying
    /// sideways across the track is fine. Returns the axis to update.
    pub fn track_move(&mut self, pointer: Point, track: &Rect) -> Option<Axis> {
        let session = self.session.as_mut()?;
        if !track.spans(session.axis, pointer.along(session.axis)) {
            return None;
        }
        session.last_pointer = pointer;
        Some(session.axis)
    }

    /// End the session, returning the axis that was dragging
    pub fn end(&mut self) -> Option<Axis> {
        self.session.take().map(|session| session.axis)
    }
}
