//! Bar visibility policy
//!
//! `BarVisibility` is the auto-hide state machine. Scrolling, resizing and
//! dragging reveal the bars; the auto-hide timer hides them again, except
//! while a drag holds them open. `ScrollbarVisibility` chooses, per device
//! class, whether the machine is consulted at all.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use veneer_core::fsm::{EventId, StateTransitions};

use crate::responsive::DeviceClass;

/// Default auto-hide delay
pub const DEFAULT_AUTO_HIDE_DELAY: Duration = Duration::from_millis(1_500);

/// Events driving `BarVisibility`
pub mod visibility_events {
    use veneer_core::fsm::EventId;

    /// Scroll, resize or other activity
    pub const REVEAL: EventId = 1;
    /// Auto-hide timer elapsed with no new trigger
    pub const HIDE_ELAPSED: EventId = 2;
    /// Drag session started on a track
    pub const DRAG_START: EventId = 3;
    /// Drag session ended
    pub const DRAG_END: EventId = 4;
}

/// Auto-hide state machine for the bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BarVisibility {
    /// No recent activity
    #[default]
    Hidden,
    /// Recent activity; the auto-hide countdown is running
    Revealed,
    /// A drag session holds the bars revealed
    Dragging,
}

impl BarVisibility {
    pub fn is_revealed(&self) -> bool {
        !matches!(self, BarVisibility::Hidden)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, BarVisibility::Dragging)
    }
}

impl StateTransitions for BarVisibility {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use visibility_events::*;
        match (self, event) {
            (BarVisibility::Hidden, REVEAL) => Some(BarVisibility::Revealed),
            (BarVisibility::Revealed, HIDE_ELAPSED) => Some(BarVisibility::Hidden),
            (BarVisibility::Hidden | BarVisibility::Revealed, DRAG_START) => {
                Some(BarVisibility::Dragging)
            }
            (BarVisibility::Dragging, DRAG_END) => Some(BarVisibility::Revealed),
            _ => None,
        }
    }
}

/// Scrollbar visibility modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollbarVisibility {
    /// Always show the bars of scrollable axes
    Always,
    /// Show on activity, hide after the auto-hide delay
    #[default]
    Auto,
    /// Never show the bars (content still scrollable)
    Never,
}

impl ScrollbarVisibility {
    /// Whether bars are shown for a given machine state
    pub fn resolve(self, state: BarVisibility) -> bool {
        match self {
            ScrollbarVisibility::Always => true,
            ScrollbarVisibility::Never => false,
            ScrollbarVisibility::Auto => state.is_revealed(),
        }
    }
}

/// Visibility mode per device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityByDevice {
    pub mobile: ScrollbarVisibility,
    pub tablet: ScrollbarVisibility,
    pub desktop: ScrollbarVisibility,
}

impl VisibilityByDevice {
    /// Same mode on every device class
    pub const fn uniform(mode: ScrollbarVisibility) -> Self {
        Self {
            mobile: mode,
            tablet: mode,
            desktop: mode,
        }
    }

    pub fn for_device(&self, device: DeviceClass) -> ScrollbarVisibility {
        match device {
            DeviceClass::Mobile => self.mobile,
            DeviceClass::Tablet => self.tablet,
            DeviceClass::Desktop => self.desktop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::visibility_events::*;
    use super::*;

    #[test]
    fn test_reveal_then_hide() {
        let mut state = BarVisibility::Hidden;

        assert!(state.send(REVEAL));
        assert!(state.is_revealed());

        // Re-reveal keeps the state; the timer restart happens elsewhere
        assert!(!state.send(REVEAL));

        assert!(state.send(HIDE_ELAPSED));
        assert_eq!(state, BarVisibility::Hidden);
    }

    #[test]
    fn test_drag_holds_revealed() {
        let mut state = BarVisibility::Revealed;

        assert!(state.send(DRAG_START));
        assert!(!state.send(HIDE_ELAPSED));
        assert!(!state.send(REVEAL));
        assert!(state.is_revealed());

        assert!(state.send(DRAG_END));
        assert_eq!(state, BarVisibility::Revealed);
    }

    #[test]
    fn test_drag_from_hidden() {
        let mut state = BarVisibility::Hidden;
        assert!(state.send(DRAG_START));
        assert!(state.is_dragging());
    }

    #[test]
    fn test_mode_resolution() {
        assert!(ScrollbarVisibility::Always.resolve(BarVisibility::Hidden));
        assert!(!ScrollbarVisibility::Never.resolve(BarVisibility::Dragging));
        assert!(ScrollbarVisibility::Auto.resolve(BarVisibility::Revealed));
        assert!(!ScrollbarVisibility::Auto.resolve(BarVisibility::Hidden));
    }

    #[test]
    fn test_mode_per_device() {
        let modes = VisibilityByDevice {
            mobile: ScrollbarVisibility::Never,
            ..VisibilityByDevice::uniform(ScrollbarVisibility::Always)
        };
        assert_eq!(
            modes.for_device(DeviceClass::Mobile),
            ScrollbarVisibility::Never
        );
        assert_eq!(
            modes.for_device(DeviceClass::Desktop),
            ScrollbarVisibility::Always
        );
    }
}
