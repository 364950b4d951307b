//! Veneer Scroll Area
//!
//! A synthetic scrollbar overlay for a native scroll container. The
//! platform keeps doing the actual scrolling; this crate mirrors its state
//! into custom tracks and thumbs and adds what native bars lack:
//!
//! - **Auto-hide**: Bars reveal on activity and hide after a debounced delay
//! - **Drag to scroll**: Pressing a track jumps the thumb under the pointer,
//!   dragging positions it absolutely
//! - **Edge shadows**: Opacity tracks the distance still scrollable towards
//!   each edge
//!
//! The crate is headless. Hosts implement [`ScrollHost`] to expose
//! measurements, forward events to [`ScrollArea`], and draw the
//! [`ScrollAreaRender`] it produces.

pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod host;
pub mod observer;
pub mod overlay;
pub mod render;
pub mod responsive;
pub mod scenario;
pub mod shadow;
pub mod visibility;
pub mod widgets;

pub use config::ScrollAreaConfig;
pub use drag::{DragController, DragSession, ThumbAnchor};
pub use error::{ConfigError, ScenarioError};
pub use geometry::{AxisGeometry, AxisMetrics, ContentExtentSource};
pub use host::{MemoryHost, ScrollHost, ViewportMetrics};
pub use observer::BoxObserver;
pub use overlay::OverlayState;
pub use render::{ScrollAreaProps, ScrollAreaRender, ShadowRender, TrackRender};
pub use responsive::DeviceClass;
pub use scenario::{Scenario, ScenarioReport, ScenarioRunner, ScenarioStep};
pub use shadow::EdgeShadows;
pub use visibility::{BarVisibility, ScrollbarVisibility, VisibilityByDevice};
pub use widgets::ScrollArea;

/// Common imports for hosts
pub mod prelude {
    pub use crate::config::ScrollAreaConfig;
    pub use crate::drag::ThumbAnchor;
    pub use crate::geometry::ContentExtentSource;
    pub use crate::host::{MemoryHost, ScrollHost, ViewportMetrics};
    pub use crate::render::{ScrollAreaProps, ScrollAreaRender, TrackRender};
    pub use crate::visibility::{ScrollbarVisibility, VisibilityByDevice};
    pub use crate::widgets::ScrollArea;
}
