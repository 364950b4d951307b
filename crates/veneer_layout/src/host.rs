//! Host abstraction
//!
//! The overlay never owns the scroll container. A host (browser binding,
//! native toolkit, test harness) exposes measurements and accepts scroll
//! offset writes through `ScrollHost`. Every read is optional: elements
//! attach asynchronously relative to component creation, and a `None`
//! makes the caller skip the update until the next event.

use veneer_core::geometry::{Axis, Point, Rect, Size};

/// Scroll state of the viewport element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMetrics {
    /// Visible size (clientWidth/clientHeight)
    pub client: Size,
    /// Native scrollable size (scrollWidth/scrollHeight)
    pub scroll_extent: Size,
    /// Current scroll offset (scrollLeft/scrollTop)
    pub scroll_offset: Point,
}

impl ViewportMetrics {
    pub fn offset(&self, axis: Axis) -> f32 {
        self.scroll_offset.along(axis)
    }
}

/// Platform surface the scroll area reads from and writes to
pub trait ScrollHost: Send {
    /// Viewport metrics, `None` before the viewport is attached
    fn viewport(&self) -> Option<ViewportMetrics>;

    /// Box size of the content measurement node, `None` if not attached
    fn content_box(&self) -> Option<Size>;

    /// Bounding rectangle of a track in window coordinates, `None` if the
    /// track is not rendered
    fn track_rect(&self, axis: Axis) -> Option<Rect>;

    /// Write the viewport scroll offset on one axis
    ///
    /// Hosts clamp to `[0, extent - client]` the way native scroll
    /// containers do. Implementations must not call back into the scroll
    /// area from here; the scroll area mirrors its own writes.
    fn set_scroll_offset(&mut self, axis: Axis, offset: f32);
}

/// Default track thickness for `MemoryHost`
pub const DEFAULT_TRACK_THICKNESS: f32 = 8.0;

/// In-memory scroll container
///
/// Behaves like a native overflow container: the scroll extent is the
/// larger of content and viewport, offsets are clamped, and a track is
/// present along the right (vertical) or bottom (horizontal) edge only
/// while its axis overflows.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    viewport: Option<Rect>,
    content: Option<Size>,
    scroll: Point,
    track_thickness: f32,
    tracks_attached: bool,
}

impl MemoryHost {
    /// Viewport at `viewport` (window coordinates) scrolling `content`
    pub fn new(viewport: Rect, content: Size) -> Self {
        Self {
            viewport: Some(viewport),
            content: Some(content),
            scroll: Point::ZERO,
            track_thickness: DEFAULT_TRACK_THICKNESS,
            tracks_attached: true,
        }
    }

    /// A host whose elements are not attached yet
    pub fn detached() -> Self {
        Self {
            viewport: None,
            content: None,
            scroll: Point::ZERO,
            track_thickness: DEFAULT_TRACK_THICKNESS,
            tracks_attached: false,
        }
    }

    pub fn with_track_thickness(mut self, thickness: f32) -> Self {
        self.track_thickness = thickness;
        self
    }

    /// Attach (or move/resize) the viewport element
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
        self.clamp_scroll();
    }

    /// Attach (or resize) the content measurement node
    pub fn set_content(&mut self, content: Size) {
        self.content = Some(content);
        self.clamp_scroll();
    }

    /// Attach or detach both track elements
    pub fn set_tracks_attached(&mut self, attached: bool) {
        self.tracks_attached = attached;
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn client(&self) -> Option<Size> {
        self.viewport.map(|rect| rect.size)
    }

    fn extent(&self, client: Size) -> Size {
        let content = self.content.unwrap_or(client);
        Size::new(
            content.width.max(client.width),
            content.height.max(client.height),
        )
    }

    fn max_offset(&self, axis: Axis) -> f32 {
        match self.client() {
            Some(client) => (self.extent(client).along(axis) - client.along(axis)).max(0.0),
            None => 0.0,
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll = Point::new(
            self.scroll.x.clamp(0.0, self.max_offset(Axis::Horizontal)),
            self.scroll.y.clamp(0.0, self.max_offset(Axis::Vertical)),
        );
    }
}

impl ScrollHost for MemoryHost {
    fn viewport(&self) -> Option<ViewportMetrics> {
        let client = self.client()?;
        Some(ViewportMetrics {
            client,
            scroll_extent: self.extent(client),
            scroll_offset: self.scroll,
        })
    }

    fn content_box(&self) -> Option<Size> {
        self.content
    }

    fn track_rect(&self, axis: Axis) -> Option<Rect> {
        let viewport = self.viewport?;
        if !self.tracks_attached || self.max_offset(axis) <= 0.0 {
            return None;
        }

        let thickness = self.track_thickness;
        Some(match axis {
            Axis::Vertical => Rect::new(
                viewport.x() + viewport.width() - thickness,
                viewport.y(),
                thickness,
                viewport.height(),
            ),
            Axis::Horizontal => Rect::new(
                viewport.x(),
                viewport.y() + viewport.height() - thickness,
                viewport.width(),
                thickness,
            ),
        })
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f32) {
        if !offset.is_finite() {
            return;
        }
        let clamped = offset.clamp(0.0, self.max_offset(axis));
        match axis {
            Axis::Vertical => self.scroll.y = clamped,
            Axis::Horizontal => self.scroll.x = clamped,
        }
    }
}
