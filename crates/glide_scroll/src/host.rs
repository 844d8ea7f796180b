//! Host integration seams
//!
//! The engine never touches a real UI tree. Everything it needs from the
//! host, whether reading structure, measuring boxes, writing styles, or
//! scheduling frames, goes through the traits here. A type that implements
//! all four is a [`Host`].

use std::fmt;

use glide_animation::Easing;
use glide_core::{Axis, Point, Rect};

use crate::error::{Result, ScrollError};
use crate::scrollbar::Thumb;

/// Opaque handle to a host element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Read access to the element tree
pub trait ElementTree {
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// The element a scroll region translates
    fn first_child(&self, element: ElementId) -> Option<ElementId>;

    /// Elements that opt their subtree out of scroll gestures
    fn has_skip_marker(&self, element: ElementId) -> bool;

    /// Text inputs and other controls that keep their own pointer handling
    fn is_form_control(&self, _element: ElementId) -> bool {
        false
    }
}

/// Layout measurement
pub trait LayoutQuery {
    /// Box of the element in the pointer coordinate space
    fn measure(&self, element: ElementId) -> Rect;
}

/// A transition the host applies to the content translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    /// Seconds
    pub duration: f32,
    pub easing: Easing,
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transform {}s {}", self.duration, self.easing)
    }
}

/// Style writes
pub trait StyleSink {
    /// Translate the content element by `offset`
    fn set_translation(&mut self, element: ElementId, offset: Point);

    /// Install or clear the transition used for the next translation
    fn set_transition(&mut self, element: ElementId, rule: Option<TransitionRule>);

    /// Draw the thumb of `viewport`'s scrollbar on `axis`
    fn update_thumb(&mut self, viewport: ElementId, axis: Axis, thumb: &Thumb);

    /// A region was created on `viewport`; route its pointer events here
    fn attach(&mut self, _viewport: ElementId, _content: ElementId) {}

    /// The region on `viewport` was destroyed; drop any thumbs and listeners
    fn detach(&mut self, _viewport: ElementId) {}
}

/// Display refresh scheduling
pub trait FrameRequester {
    /// Ask for one `on_frame` call at the next refresh
    fn request_frame(&mut self);

    /// Withdraw a pending frame request
    fn cancel_frame(&mut self) {}
}

/// Everything the runtime needs from its environment
pub trait Host: ElementTree + LayoutQuery + StyleSink + FrameRequester {}

impl<T> Host for T where T: ElementTree + LayoutQuery + StyleSink + FrameRequester {}

/// Which pointer events the runtime listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Touch,
    Mouse,
}

/// Pointer hardware the host reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputCapabilities {
    pub touch: bool,
    pub mouse: bool,
}

/// Process-wide settings resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub input: InputSource,
}

impl Environment {
    /// Prefer touch when the host has it, fall back to mouse
    pub fn resolve(capabilities: InputCapabilities) -> Result<Self> {
        let input = if capabilities.touch {
            InputSource::Touch
        } else if capabilities.mouse {
            InputSource::Mouse
        } else {
            return Err(ScrollError::NoPointerInput);
        };
        tracing::debug!(?input, "resolved pointer input");
        Ok(Self { input })
    }

    pub fn touch() -> Self {
        Self {
            input: InputSource::Touch,
        }
    }

    pub fn mouse() -> Self {
        Self {
            input: InputSource::Mouse,
        }
    }
}

/// A pointer sample delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub source: InputSource,
    /// Innermost element under the pointer
    pub target: ElementId,
    pub position: Point,
    /// Host clock in seconds
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn new(source: InputSource, target: ElementId, position: Point, timestamp: f64) -> Self {
        Self {
            source,
            target,
            position,
            timestamp,
        }
    }
}

/// What the host should do with a pointer event after the runtime saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the event through untouched
    Continue,
    /// Suppress the host's default action (native scroll, text selection)
    PreventDefault,
    /// Suppress the default action and stop propagation
    Stop,
}
