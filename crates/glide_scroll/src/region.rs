//! Scroll region records
//!
//! One record per viewport element. The runtime owns them in a slot map and
//! hands out [`RegionId`]s as handles.

use std::fmt;

use glide_animation::TaskHandle;
use glide_core::{Axis, EventEmitter, Point, Rect, Size};
use slotmap::new_key_type;

use crate::gesture::{GestureState, GestureTracker};
use crate::host::{ElementId, LayoutQuery, StyleSink};
use crate::policy::ScrollPolicy;
use crate::scrollbar::ScrollbarGeometry;

new_key_type! {
    /// Handle to a scroll region
    pub struct RegionId;
}

/// A viewport element whose first child is translated to scroll
pub struct ScrollRegion {
    pub(crate) element: ElementId,
    pub(crate) content: ElementId,
    pub(crate) policy: ScrollPolicy,
    pub(crate) viewport_rect: Rect,
    pub(crate) content_size: Size,
    /// Logical content translation; the glide target while a release runs
    pub(crate) offset: Point,
    pub(crate) tracker: GestureTracker,
    pub(crate) scrollbars: ScrollbarGeometry,
    pub(crate) release: Option<TaskHandle>,
    pub(crate) emitter: EventEmitter,
}

impl ScrollRegion {
    pub(crate) fn new(element: ElementId, content: ElementId, policy: ScrollPolicy) -> Self {
        let scrollbars = ScrollbarGeometry::for_policy(&policy);
        Self {
            element,
            content,
            policy,
            viewport_rect: Rect::default(),
            content_size: Size::default(),
            offset: Point::ZERO,
            tracker: GestureTracker::new(),
            scrollbars,
            release: None,
            emitter: EventEmitter::new(),
        }
    }

    /// Re-read viewport and content boxes from the host
    pub(crate) fn measure<H: LayoutQuery + ?Sized>(&mut self, host: &H) {
        self.viewport_rect = host.measure(self.element);
        self.content_size = host.measure(self.content).size();
    }

    /// Refresh thumb lengths and positions from the stored geometry
    pub(crate) fn sync_scrollbars(&mut self, offset: Point) {
        let viewport = self.viewport_size();
        self.scrollbars.resize(viewport, self.content_size);
        self.scrollbars.reposition(offset, viewport, self.content_size);
    }

    /// Send every thumb to the host
    pub(crate) fn push_thumbs<H: StyleSink + ?Sized>(&self, host: &mut H) {
        for (axis, thumb) in self.scrollbars.thumbs() {
            host.update_thumb(self.element, axis, thumb);
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn content(&self) -> ElementId {
        self.content
    }

    pub fn policy(&self) -> &ScrollPolicy {
        &self.policy
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_rect.size()
    }

    /// Viewport box as of the last measurement
    pub fn viewport_rect(&self) -> Rect {
        self.viewport_rect
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Content translation (0 at the top/left, negative when scrolled)
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Scroll position, positive when scrolled down/right
    pub fn scroll_position(&self) -> Point {
        Point::new(-self.offset.x, -self.offset.y)
    }

    pub fn gesture_state(&self) -> GestureState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn scrollbars(&self) -> &ScrollbarGeometry {
        &self.scrollbars
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_active()
    }

    /// A release glide or scrollbar fade is running
    pub fn is_animating(&self) -> bool {
        self.release.as_ref().is_some_and(TaskHandle::is_active)
    }

    /// Scrollable range `(lower, upper)` on `axis`
    pub fn bounds(&self, axis: Axis) -> (f32, f32) {
        crate::momentum::scroll_bounds(
            self.viewport_size().extent(axis),
            self.content_size.extent(axis),
        )
    }
}

impl fmt::Debug for ScrollRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollRegion")
            .field("element", &self.element)
            .field("content", &self.content)
            .field("offset", &self.offset)
            .field("state", &self.tracker.state())
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}
