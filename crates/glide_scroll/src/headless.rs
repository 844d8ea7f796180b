//! In-memory host for tests and tools
//!
//! `HeadlessHost` keeps a small element tree with fixed boxes and records
//! every style write the runtime makes, so scroll behavior can be driven and
//! inspected without a real UI:
//!
//! ```rust
//! use glide_core::{Point, Rect};
//! use glide_scroll::{Environment, HeadlessHost, ScrollPolicy, ScrollRuntime};
//!
//! let mut host = HeadlessHost::new();
//! let viewport = host.add_root(Rect::new(0.0, 0.0, 400.0, 300.0));
//! host.add_child(viewport, Rect::new(0.0, 0.0, 400.0, 1000.0));
//!
//! let mut runtime = ScrollRuntime::new(host, Environment::touch());
//! let region = runtime.create(viewport, ScrollPolicy::vertical()).unwrap();
//! assert_eq!(runtime.offset(region), Some(Point::ZERO));
//! ```

use glide_core::{Axis, Point, Rect};
use rustc_hash::FxHashMap;

use crate::host::{ElementId, ElementTree, FrameRequester, LayoutQuery, StyleSink, TransitionRule};
use crate::scrollbar::Thumb;

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rect: Rect,
    skip_marker: bool,
    form_control: bool,
    translation: Point,
    transition: Option<TransitionRule>,
}

/// Host backed by an in-memory tree
#[derive(Debug, Default)]
pub struct HeadlessHost {
    nodes: FxHashMap<ElementId, Node>,
    thumbs: FxHashMap<(ElementId, Axis), Thumb>,
    attached: Vec<ElementId>,
    next_id: u64,
    frame_pending: bool,
    frames_requested: u64,
    translation_writes: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.nodes.insert(
            id,
            Node {
                parent,
                rect,
                ..Default::default()
            },
        );
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.push(id);
        }
        id
    }

    /// Add a parentless element
    pub fn add_root(&mut self, rect: Rect) -> ElementId {
        self.insert(None, rect)
    }

    /// Append a child to `parent`
    pub fn add_child(&mut self, parent: ElementId, rect: Rect) -> ElementId {
        self.insert(Some(parent), rect)
    }

    /// Change an element's box, as a layout pass would
    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.rect = rect;
        }
    }

    pub fn set_skip_marker(&mut self, element: ElementId, skip: bool) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.skip_marker = skip;
        }
    }

    pub fn set_form_control(&mut self, element: ElementId, form_control: bool) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.form_control = form_control;
        }
    }

    /// Last translation written to `element`
    pub fn translation(&self, element: ElementId) -> Point {
        self.nodes
            .get(&element)
            .map_or(Point::ZERO, |node| node.translation)
    }

    /// Transition currently installed on `element`
    pub fn transition(&self, element: ElementId) -> Option<TransitionRule> {
        self.nodes.get(&element).and_then(|node| node.transition)
    }

    /// Last thumb drawn for `viewport` on `axis`
    pub fn thumb(&self, viewport: ElementId, axis: Axis) -> Option<Thumb> {
        self.thumbs.get(&(viewport, axis)).copied()
    }

    /// Viewports currently attached to a region
    pub fn attached(&self) -> &[ElementId] {
        &self.attached
    }

    /// Whether a frame request is outstanding
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Consume the outstanding frame request, as a display loop would
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Number of translation writes so far
    pub fn translation_writes(&self) -> u64 {
        self.translation_writes
    }
}

impl ElementTree for HeadlessHost {
    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|node| node.parent)
    }

    fn first_child(&self, element: ElementId) -> Option<ElementId> {
        self.nodes
            .get(&element)
            .and_then(|node| node.children.first().copied())
    }

    fn has_skip_marker(&self, element: ElementId) -> bool {
        self.nodes.get(&element).is_some_and(|node| node.skip_marker)
    }

    fn is_form_control(&self, element: ElementId) -> bool {
        self.nodes.get(&element).is_some_and(|node| node.form_control)
    }
}

impl LayoutQuery for HeadlessHost {
    fn measure(&self, element: ElementId) -> Rect {
        self.nodes
            .get(&element)
            .map_or_else(Rect::default, |node| node.rect)
    }
}

impl StyleSink for HeadlessHost {
    fn set_translation(&mut self, element: ElementId, offset: Point) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.translation = offset;
            self.translation_writes += 1;
        }
    }

    fn set_transition(&mut self, element: ElementId, rule: Option<TransitionRule>) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.transition = rule;
        }
    }

    fn update_thumb(&mut self, viewport: ElementId, axis: Axis, thumb: &Thumb) {
        self.thumbs.insert((viewport, axis), *thumb);
    }

    fn attach(&mut self, viewport: ElementId, _content: ElementId) {
        self.attached.push(viewport);
    }

    fn detach(&mut self, viewport: ElementId) {
        self.attached.retain(|el| *el != viewport);
        self.thumbs.retain(|(el, _), _| *el != viewport);
    }
}

impl FrameRequester for HeadlessHost {
    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.frames_requested += 1;
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }
}
