//! Scroll area overlay
//!
//! `ScrollArea` keeps a synthetic scrollbar overlay in sync with a native
//! scroll container exposed through [`ScrollHost`]. It wires the geometry
//! sampler, the scroll-state mirror, the pointer-drag controller and the
//! visibility/shadow policy together around one [`OverlayState`].
//!
//! Data only flows one way: host measurements and events go in, a
//! [`ScrollAreaRender`] comes out. Scroll writes made during a drag are
//! mirrored exactly like native scrolls, so the overlay never reads back
//! its own output.
//!
//! # Example
//!
//! ```
//! use veneer_animation::ManualClock;
//! use veneer_core::geometry::{Axis, Point, Rect, Size};
//! use veneer_layout::prelude::*;
//!
//! let host = MemoryHost::new(Rect::new(0.0, 0.0, 300.0, 300.0), Size::new(300.0, 900.0));
//! let clock = ManualClock::shared();
//! let area = ScrollArea::new(host, ScrollAreaConfig::default(), clock.clone());
//! area.mount();
//!
//! // Press the middle of the vertical track: the thumb centers under the pointer
//! area.on_track_pointer_down(Axis::Vertical, Point::new(296.0, 150.0));
//! area.on_pointer_up();
//! assert_eq!(area.with_host(|host| host.scroll_offset().y), 300.0);
//!
//! clock.advance_millis(1_500);
//! area.tick();
//! assert!(!area.is_revealed());
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use veneer_animation::{Debounce, SharedClock, Timestamp, TimerScheduler};
use veneer_core::events::{event_types, Event, EventData, EventDispatcher, Subscription};
use veneer_core::geometry::{Axis, Point, Size};

use crate::config::ScrollAreaConfig;
use crate::drag::{pointer_to_scroll_offset, DragController};
use crate::geometry::{sample_axis, AxisMetrics, ContentExtentSource};
use crate::host::{ScrollHost, ViewportMetrics};
use crate::observer::BoxObserver;
use crate::overlay::OverlayState;
use crate::render::{ScrollAreaProps, ScrollAreaRender};
use crate::responsive::device_class_for_width;
use crate::shadow::EdgeShadows;
use crate::visibility::visibility_events::{DRAG_END, DRAG_START, HIDE_ELAPSED, REVEAL};

/// Timers owned by a scroll area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OverlayTimer {
    AutoHide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Window-scope listeners held for the duration of a drag
struct DragListeners {
    _pointer_move: Subscription,
    _pointer_up: Subscription,
}

struct ScrollAreaInner<H> {
    host: H,
    config: ScrollAreaConfig,
    props: ScrollAreaProps,
    clock: SharedClock,
    lifecycle: Lifecycle,
    state: OverlayState,
    drag: DragController,
    observer: BoxObserver,
    timers: TimerScheduler<OverlayTimer>,
    auto_hide: Debounce,
    dispatcher: Option<EventDispatcher>,
    window_resize: Option<Subscription>,
    drag_listeners: Option<DragListeners>,
}

impl<H: ScrollHost> ScrollAreaInner<H> {
    fn is_live(&self) -> bool {
        self.lifecycle != Lifecycle::Unmounted
    }

    fn extent(&self, viewport: &ViewportMetrics, axis: Axis) -> Option<f32> {
        match self.config.content_extent {
            ContentExtentSource::NativeOverflow => Some(viewport.scroll_extent.along(axis)),
            ContentExtentSource::MeasuredContent => {
                self.host.content_box().map(|size| size.along(axis))
            }
        }
    }

    /// Re-sample geometry and shadows from the host
    ///
    /// Returns false without touching state when an element is detached.
    fn refresh(&mut self) -> bool {
        let Some(viewport) = self.host.viewport() else {
            tracing::trace!("viewport not attached, skipping refresh");
            return false;
        };

        for axis in Axis::ALL {
            let Some(extent) = self.extent(&viewport, axis) else {
                tracing::trace!("content box not attached, skipping refresh");
                return false;
            };
            let metrics = AxisMetrics {
                visible: viewport.client.along(axis),
                extent,
                offset: viewport.offset(axis),
                track_length: self.host.track_rect(axis).map(|rect| rect.length(axis)),
            };

            let geometry = sample_axis(&metrics);
            let shadows = if geometry.scrollable {
                EdgeShadows::from_scroll(
                    metrics.offset,
                    metrics.visible,
                    metrics.extent,
                    self.config.shadow_threshold,
                )
            } else {
                EdgeShadows::NONE
            };

            self.state.set_axis(axis, geometry);
            self.state.set_shadows(axis, shadows);
        }

        tracing::trace!(generation = self.state.generation(), "overlay refreshed");
        true
    }

    /// Reveal the bars and restart the auto-hide countdown
    fn reveal(&mut self) {
        self.state.send_visibility(REVEAL);
        if !self.state.visibility().is_dragging() {
            let now = self.clock.now();
            self.auto_hide.trigger(&mut self.timers, now, OverlayTimer::AutoHide);
        }
    }

    fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        if let Some(content) = self.host.content_box() {
            self.observer.observe(content);
        }
        self.refresh();
        tracing::debug!(
            vertical = self.state.axis(Axis::Vertical).scrollable,
            horizontal = self.state.axis(Axis::Horizontal).scrollable,
            "scroll area mounted"
        );
    }

    fn on_scroll(&mut self) {
        if !self.is_live() {
            return;
        }
        self.refresh();
        self.reveal();
    }

    fn on_window_resize(&mut self, width: f32, _height: f32) {
        if !self.is_live() {
            return;
        }
        self.state.set_device(device_class_for_width(width));
        self.refresh();
        self.reveal();
    }

    fn on_content_resize(&mut self, size: Size) {
        if !self.is_live() || !self.observer.observe(size) {
            return;
        }
        tracing::trace!(width = size.width, height = size.height, "content resized");
        self.refresh();
        self.reveal();
    }

    /// Write the scroll offset that puts the thumb under `pointer`, then
    /// mirror the resulting native scroll
    fn scroll_to_pointer(&mut self, axis: Axis, pointer: Point) {
        let Some(track) = self.host.track_rect(axis) else {
            tracing::trace!(?axis, "track not attached, skipping drag update");
            return;
        };
        let Some(viewport) = self.host.viewport() else {
            return;
        };
        let Some(extent) = self.extent(&viewport, axis) else {
            return;
        };

        let Some(target) = pointer_to_scroll_offset(
            pointer.along(axis),
            track.start(axis),
            track.length(axis),
            viewport.client.along(axis),
            extent,
            self.config.thumb_anchor,
        ) else {
            return;
        };

        self.host.set_scroll_offset(axis, target);
        self.on_scroll();
    }

    fn begin_drag(&mut self, axis: Axis, pointer: Point) -> bool {
        if !self.is_live() || self.host.track_rect(axis).is_none() {
            return false;
        }
        if !self.drag.begin(axis, pointer) {
            return false;
        }
        self.state.send_visibility(DRAG_START);
        self.auto_hide.cancel(&mut self.timers);
        tracing::debug!(?axis, x = pointer.x, y = pointer.y, "drag session started");

        self.scroll_to_pointer(axis, pointer);
        true
    }

    fn drag_to(&mut self, pointer: Point) {
        if !self.is_live() {
            return;
        }
        let Some(axis) = self.drag.active_axis() else {
            return;
        };
        let Some(track) = self.host.track_rect(axis) else {
            return;
        };
        if self.drag.track_move(pointer, &track).is_none() {
            tracing::trace!(?axis, "pointer outside track, ignoring move");
            return;
        }
        self.scroll_to_pointer(axis, pointer);
    }

    fn end_drag(&mut self) -> bool {
        let released = self.drag_listeners.take().is_some();
        let Some(axis) = self.drag.end() else {
            return released;
        };
        self.state.send_visibility(DRAG_END);
        self.reveal();
        tracing::debug!(?axis, "drag session ended");
        true
    }

    fn tick(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let mut changed = false;
        for (id, timer) in self.timers.drain_expired(self.clock.now()) {
            match timer {
                OverlayTimer::AutoHide => {
                    if self.auto_hide.acknowledge(id) {
                        changed |= self.state.send_visibility(HIDE_ELAPSED);
                    }
                }
            }
        }
        changed
    }

    fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.drag.end();
        self.drag_listeners = None;
        self.window_resize = None;
        self.dispatcher = None;
        self.timers.clear();
        self.auto_hide.reset();
        self.observer.disconnect();
        tracing::debug!("scroll area unmounted");
    }
}

/// Synthetic scrollbar overlay over a native scroll container
///
/// Cloning yields another handle to the same scroll area. Listeners
/// registered on an [`EventDispatcher`] only hold weak references, so
/// dropping the last handle releases them.
pub struct ScrollArea<H: ScrollHost + 'static> {
    inner: Arc<Mutex<ScrollAreaInner<H>>>,
}

impl<H: ScrollHost + 'static> Clone for ScrollArea<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: ScrollHost + 'static> ScrollArea<H> {
    pub fn new(host: H, config: ScrollAreaConfig, clock: SharedClock) -> Self {
        let auto_hide = Debounce::new(config.auto_hide_delay());
        Self {
            inner: Arc::new(Mutex::new(ScrollAreaInner {
                host,
                config,
                props: ScrollAreaProps::default(),
                clock,
                lifecycle: Lifecycle::Created,
                state: OverlayState::new(),
                drag: DragController::new(),
                observer: BoxObserver::new(),
                timers: TimerScheduler::new(),
                auto_hide,
                dispatcher: None,
                window_resize: None,
                drag_listeners: None,
            })),
        }
    }

    /// Add a pass-through class to the wrapper
    pub fn class(self, class: impl Into<String>) -> Self {
        self.inner.lock().props.classes.push(class.into());
        self
    }

    /// Add a pass-through attribute to the wrapper
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner
            .lock()
            .props
            .attributes
            .insert(name.into(), value.into());
        self
    }

    pub fn props(self, props: ScrollAreaProps) -> Self {
        self.inner.lock().props = props;
        self
    }

    /// Initial geometry sample; does not reveal the bars
    pub fn mount(&self) {
        self.inner.lock().mount();
    }

    /// Subscribe to window-scope events
    ///
    /// Window resizes are handled for the lifetime of the scroll area; drag
    /// sessions started afterwards receive pointer moves and releases from
    /// `dispatcher` wherever the pointer is.
    pub fn attach(&self, dispatcher: &EventDispatcher) {
        let mut inner = self.inner.lock();
        if !inner.is_live() {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        inner.window_resize = Some(dispatcher.subscribe(event_types::RESIZE, move |event| {
            if let EventData::Resize { width, height } = event.data {
                with_live(&weak, |inner| inner.on_window_resize(width, height));
            }
        }));
        inner.dispatcher = Some(dispatcher.clone());
        tracing::debug!("scroll area attached to dispatcher");
    }

    /// Native scroll event on the viewport
    pub fn on_scroll(&self) {
        self.inner.lock().on_scroll();
    }

    pub fn on_window_resize(&self, width: f32, height: f32) {
        self.inner.lock().on_window_resize(width, height);
    }

    /// Box-size notification for the content measurement node
    pub fn on_content_resize(&self, size: Size) {
        self.inner.lock().on_content_resize(size);
    }

    /// Pointer pressed on a track
    ///
    /// Jumps the scroll position so the thumb lands under the pointer and
    /// starts a drag session. Returns false if another axis is already
    /// dragging.
    pub fn on_track_pointer_down(&self, axis: Axis, pointer: Point) -> bool {
        let mut inner = self.inner.lock();
        if !inner.begin_drag(axis, pointer) {
            return false;
        }

        if let Some(dispatcher) = inner.dispatcher.clone() {
            inner.drag_listeners = Some(self.subscribe_drag(&dispatcher));
            tracing::debug!("drag listeners acquired");
        }
        true
    }

    fn subscribe_drag(&self, dispatcher: &EventDispatcher) -> DragListeners {
        let pointer_move = {
            let weak = Arc::downgrade(&self.inner);
            dispatcher.subscribe(event_types::POINTER_MOVE, move |event: &Event| {
                if let EventData::Pointer { x, y, .. } = event.data {
                    with_live(&weak, |inner| inner.drag_to(Point::new(x, y)));
                }
            })
        };
        let pointer_up = {
            let weak = Arc::downgrade(&self.inner);
            dispatcher.subscribe(event_types::POINTER_UP, move |_event: &Event| {
                with_live(&weak, |inner| {
                    inner.end_drag();
                });
            })
        };

        DragListeners {
            _pointer_move: pointer_move,
            _pointer_up: pointer_up,
        }
    }

    /// Pointer moved anywhere in the window
    ///
    /// Moves past either end of the track along the drag axis are ignored,
    /// so a fast drag off the end leaves the thumb at the last in-track
    /// position rather than snapping it to the edge.
    pub fn on_pointer_move(&self, pointer: Point) {
        self.inner.lock().drag_to(pointer);
    }

    /// Pointer released anywhere in the window; ends the drag session
    pub fn on_pointer_up(&self) {
        if self.inner.lock().end_drag() {
            tracing::trace!("drag listeners released");
        }
    }

    /// Fire expired timers; returns true if the overlay state changed
    pub fn tick(&self) -> bool {
        self.inner.lock().tick()
    }

    /// When `tick` next has work to do
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.inner.lock().timers.next_deadline()
    }

    /// Tear down listeners and timers; every handler is a no-op afterwards
    pub fn unmount(&self) {
        self.inner.lock().unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lock().lifecycle == Lifecycle::Mounted
    }

    pub fn render(&self) -> ScrollAreaRender {
        let inner = self.inner.lock();
        ScrollAreaRender::build(&inner.state, &inner.props, &inner.config)
    }

    pub fn state(&self) -> OverlayState {
        self.inner.lock().state
    }

    pub fn config(&self) -> ScrollAreaConfig {
        self.inner.lock().config.clone()
    }

    /// Whether bars are shown under the current device's visibility mode
    pub fn is_revealed(&self) -> bool {
        let inner = self.inner.lock();
        inner
            .config
            .visibility
            .for_device(inner.state.device())
            .resolve(inner.state.visibility())
    }

    pub fn drag_axis(&self) -> Option<Axis> {
        self.inner.lock().drag.active_axis()
    }

    /// Access the host, e.g. to apply a native scroll before `on_scroll`
    ///
    /// `f` runs with the scroll area locked. It must not call back into
    /// this `ScrollArea` (or a clone of it) nor dispatch on the attached
    /// dispatcher, or it deadlocks.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.lock().host)
    }
}

fn with_live<H: ScrollHost>(
    weak: &Weak<Mutex<ScrollAreaInner<H>>>,
    f: impl FnOnce(&mut ScrollAreaInner<H>),
) {
    if let Some(inner) = weak.upgrade() {
        f(&mut inner.lock());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::visibility::BarVisibility;
    use veneer_animation::ManualClock;
    use veneer_core::geometry::Rect;

    fn area() -> (ScrollArea<MemoryHost>, Arc<ManualClock>) {
        let host = MemoryHost::new(Rect::new(0.0, 0.0, 300.0, 300.0), Size::new(300.0, 900.0));
        let clock = ManualClock::shared();
        let area = ScrollArea::new(host, ScrollAreaConfig::default(), clock.clone());
        area.mount();
        (area, clock)
    }

    fn scroll_to(area: &ScrollArea<MemoryHost>, offset: f32) {
        area.with_host(|host| host.set_scroll_offset(Axis::Vertical, offset));
        area.on_scroll();
    }

    #[test]
    fn test_mount_samples_without_revealing() {
        let (area, _clock) = area();
        let state = area.state();

        assert!(state.axis(Axis::Vertical).scrollable);
        assert!(!state.axis(Axis::Horizontal).scrollable);
        assert_eq!(state.visibility(), BarVisibility::Hidden);
        assert!(area.next_deadline().is_none());
    }

    #[test]
    fn test_scroll_mirrors_offset_and_reveals() {
        let (area, _clock) = area();
        scroll_to(&area, 300.0);

        let vertical = *area.state().axis(Axis::Vertical);
        assert!((vertical.thumb_length - 100.0).abs() < 1e-3);
        assert!((vertical.thumb_offset - 100.0).abs() < 1e-3);
        assert!(area.is_revealed());
    }

    #[test]
    fn test_detached_host_is_a_no_op() {
        let area = ScrollArea::new(
            MemoryHost::detached(),
            ScrollAreaConfig::default(),
            ManualClock::shared(),
        );
        area.mount();
        area.on_scroll();
        assert!(!area.on_track_pointer_down(Axis::Vertical, Point::new(0.0, 0.0)));
        assert_eq!(area.drag_axis(), None);
        assert!(!area.state().axis(Axis::Vertical).scrollable);
    }

    #[test]
    fn test_track_not_yet_attached() {
        let (area, _clock) = area();
        area.with_host(|host| host.set_tracks_attached(false));
        scroll_to(&area, 300.0);

        assert!(!area.on_track_pointer_down(Axis::Vertical, Point::new(296.0, 150.0)));
        assert_eq!(area.drag_axis(), None);
        let vertical = *area.state().axis(Axis::Vertical);
        assert!(vertical.scrollable);
        assert_eq!(vertical.thumb_length, 0.0);
        assert_eq!(vertical.thumb_offset, 0.0);

        area.with_host(|host| host.set_tracks_attached(true));
        area.on_scroll();
        let vertical = *area.state().axis(Axis::Vertical);
        assert!((vertical.thumb_length - 100.0).abs() < 1e-3);
        assert!((vertical.thumb_offset - 100.0).abs() < 1e-3);
        assert!(area.on_track_pointer_down(Axis::Vertical, Point::new(296.0, 150.0)));
    }

    #[test]
    fn test_fast_drag_off_the_end_keeps_last_position() {
        let (area, _clock) = area();
        area.on_track_pointer_down(Axis::Vertical, Point::new(296.0, 150.0));
        area.on_pointer_move(Point::new(296.0, 200.0));
        area.on_pointer_move(Point::new(296.0, 400.0));
        area.on_pointer_up();

        assert!((area.with_host(|host| host.scroll_offset().y) - 450.0).abs() < 1e-3);
        assert!((area.state().axis(Axis::Vertical).thumb_offset - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_content_resize_filters_jitter() {
        let (area, _clock) = area();
        let generation = area.state().generation();

        area.on_content_resize(Size::new(300.2, 900.0));
        assert_eq!(area.state().generation(), generation);
        assert!(!area.is_revealed());

        area.with_host(|host| host.set_content(Size::new(300.0, 1_200.0)));
        area.on_content_resize(Size::new(300.0, 1_200.0));
        assert!((area.state().axis(Axis::Vertical).thumb_ratio - 0.25).abs() < 1e-6);
        assert!(area.is_revealed());
    }

    #[test]
    fn test_auto_hide_after_delay() {
        let (area, clock) = area();
        scroll_to(&area, 100.0);

        clock.advance_millis(1_499);
        assert!(!area.tick());
        assert!(area.is_revealed());

        clock.advance_millis(1);
        assert!(area.tick());
        assert!(!area.is_revealed());
    }

    #[test]
    fn test_drag_holds_bars_open() {
        let (area, clock) = area();
        assert!(area.on_track_pointer_down(Axis::Vertical, Point::new(296.0, 150.0)));
        assert_eq!(area.state().visibility(), BarVisibility::Dragging);

        clock.advance_millis(10_000);
        area.tick();
        assert!(area.is_revealed());

        area.on_pointer_up();
        assert_eq!(area.state().visibility(), BarVisibility::Revealed);
        clock.advance_millis(1_500);
        area.tick();
        assert!(!area.is_revealed());
    }

    #[test]
    fn test_unmount_silences_handlers() {
        let (area, clock) = area();
        scroll_to(&area, 100.0);
        area.unmount();

        let before = area.state();
        scroll_to(&area, 400.0);
        area.on_window_resize(500.0, 500.0);
        assert!(!area.on_track_pointer_down(Axis::Vertical, Point::new(296.0, 20.0)));
        clock.advance_millis(5_000);
        assert!(!area.tick());
        assert_eq!(area.state(), before);
        assert!(!area.is_mounted());
    }
}
