//! Overlay state record
//!
//! All derived values of one scroll area live in a single `OverlayState`.
//! Writers go through the guarded setters, which report whether anything
//! changed and bump `generation` only then, so a renderer can compare
//! generations and skip redundant work.

use veneer_core::fsm::{EventId, StateTransitions};
use veneer_core::geometry::{Axis, AxisPair};

use crate::geometry::AxisGeometry;
use crate::responsive::DeviceClass;
use crate::shadow::EdgeShadows;
use crate::visibility::BarVisibility;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayState {
    axes: AxisPair<AxisGeometry>,
    shadows: AxisPair<EdgeShadows>,
    visibility: BarVisibility,
    device: DeviceClass,
    generation: u64,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self, axis: Axis) -> &AxisGeometry {
        &self.axes[axis]
    }

    pub fn axes(&self) -> &AxisPair<AxisGeometry> {
        &self.axes
    }

    pub fn shadows(&self, axis: Axis) -> EdgeShadows {
        self.shadows[axis]
    }

    pub fn visibility(&self) -> BarVisibility {
        self.visibility
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Incremented on every genuine change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_axis(&mut self, axis: Axis, geometry: AxisGeometry) -> bool {
        if self.axes[axis] == geometry {
            return false;
        }
        self.axes[axis] = geometry;
        self.bump()
    }

    pub fn set_shadows(&mut self, axis: Axis, shadows: EdgeShadows) -> bool {
        if self.shadows[axis] == shadows {
            return false;
        }
        self.shadows[axis] = shadows;
        self.bump()
    }

    pub fn set_device(&mut self, device: DeviceClass) -> bool {
        if self.device == device {
            return false;
        }
        self.device = device;
        self.bump()
    }

    /// Feed an event to the visibility machine
    pub fn send_visibility(&mut self, event: EventId) -> bool {
        if self.visibility.send(event) {
            self.bump()
        } else {
            false
        }
    }

    fn bump(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        true
    }
}
