//! Render description
//!
//! The one-way output of a scroll area. Nothing here is read back by the
//! overlay logic; a host turns it into DOM attributes, draw calls or
//! whatever its toolkit needs.

use indexmap::IndexMap;
use smallvec::SmallVec;
use veneer_core::geometry::{Axis, AxisPair};

use crate::config::ScrollAreaConfig;
use crate::overlay::OverlayState;
use crate::shadow::end_shadow_inset;

/// Class names emitted on the wrapper and tracks
pub mod class_names {
    pub const WRAPPER: &str = "scroll-area";
    pub const VERTICAL_VISIBLE: &str = "scroll-area--vertical-visible";
    pub const HORIZONTAL_VISIBLE: &str = "scroll-area--horizontal-visible";
    pub const TRACK: &str = "track";
    pub const TRACK_SCROLLING: &str = "track--scrolling";
}

/// Generic container attributes passed through onto the wrapper
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollAreaProps {
    pub classes: Vec<String>,
    pub attributes: IndexMap<String, String>,
}

impl ScrollAreaProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Track and thumb of one scrollable axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackRender {
    pub axis: Axis,
    /// Thumb length as a percentage of the track, in (0, 100)
    pub thumb_size_percent: f32,
    /// Thumb offset from the track start in pixels
    pub thumb_offset_px: f32,
    /// Bars currently revealed
    pub revealed: bool,
}

impl TrackRender {
    pub fn class_names(&self) -> SmallVec<[&'static str; 2]> {
        let mut classes = SmallVec::new();
        classes.push(class_names::TRACK);
        if self.revealed {
            classes.push(class_names::TRACK_SCROLLING);
        }
        classes
    }
}

/// One edge-shadow indicator
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShadowRender {
    pub opacity: f32,
    /// Offset from the viewport edge, clearing a visible cross-axis track
    pub inset: f32,
}

/// Everything a host needs to draw the overlay
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollAreaRender {
    /// Wrapper classes: pass-through classes first
    pub classes: Vec<String>,
    pub attributes: IndexMap<String, String>,
    /// Present only for scrollable axes
    pub tracks: AxisPair<Option<TrackRender>>,
    pub top_shadow: ShadowRender,
    pub bottom_shadow: ShadowRender,
    /// Generation of the state this was built from
    pub generation: u64,
}

impl ScrollAreaRender {
    pub fn build(state: &OverlayState, props: &ScrollAreaProps, config: &ScrollAreaConfig) -> Self {
        let revealed = config
            .visibility
            .for_device(state.device())
            .resolve(state.visibility());

        let tracks = AxisPair::from_fn(|axis| {
            let geometry = state.axis(axis);
            geometry.scrollable.then(|| TrackRender {
                axis,
                thumb_size_percent: geometry.thumb_ratio * 100.0,
                thumb_offset_px: geometry.thumb_offset,
                revealed,
            })
        });

        let mut classes = props.classes.clone();
        classes.push(class_names::WRAPPER.to_string());
        if tracks.vertical.is_some() {
            classes.push(class_names::VERTICAL_VISIBLE.to_string());
        }
        if tracks.horizontal.is_some() {
            classes.push(class_names::HORIZONTAL_VISIBLE.to_string());
        }

        let shadows = state.shadows(Axis::Vertical);
        Self {
            classes,
            attributes: props.attributes.clone(),
            top_shadow: ShadowRender {
                opacity: shadows.start,
                inset: 0.0,
            },
            bottom_shadow: ShadowRender {
                opacity: shadows.end,
                inset: end_shadow_inset(tracks.horizontal.is_some(), config.track_thickness),
            },
            tracks,
            generation: state.generation(),
        }
    }

    pub fn track(&self, axis: Axis) -> Option<&TrackRender> {
        self.tracks[axis].as_ref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
