//! Scrollbar thumb geometry
//!
//! Thumbs are proportional: the thumb's share of the track equals the
//! viewport's share of the content. Positions are measured along the track
//! from its start, so they grow as the content offset goes negative.

use glide_core::{Axis, Point, Size};

use crate::policy::ScrollPolicy;

/// Opacity of a thumb at rest
pub const FULL_OPACITY: f32 = 1.0;

/// Thumb length for a track as long as the viewport
pub fn thumb_length(viewport: f32, content: f32) -> f32 {
    if content <= 0.0 {
        return 0.0;
    }
    viewport.min(content) / content * viewport
}

/// Thumb position along the track for a content offset
pub fn thumb_position(offset: f32, viewport: f32, content: f32) -> f32 {
    if content <= 0.0 {
        return 0.0;
    }
    (-offset / content) * viewport
}

/// One scrollbar thumb as the host should draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub length: f32,
    pub position: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl Default for Thumb {
    fn default() -> Self {
        Self {
            length: 0.0,
            position: 0.0,
            opacity: FULL_OPACITY,
            visible: false,
        }
    }
}

/// Thumbs of one region, `None` on axes that have no scrollbar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollbarGeometry {
    pub x: Option<Thumb>,
    pub y: Option<Thumb>,
}

impl ScrollbarGeometry {
    /// Thumbs for every enabled axis unless the policy hides them
    pub fn for_policy(policy: &ScrollPolicy) -> Self {
        if policy.hide_scrollbars {
            return Self::default();
        }
        Self {
            x: policy.scroll_x.then(Thumb::default),
            y: policy.scroll_y.then(Thumb::default),
        }
    }

    pub fn thumb(&self, axis: Axis) -> Option<&Thumb> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }

    fn thumb_mut(&mut self, axis: Axis) -> Option<&mut Thumb> {
        match axis {
            Axis::X => self.x.as_mut(),
            Axis::Y => self.y.as_mut(),
        }
    }

    /// Present thumbs with their axis
    pub fn thumbs(&self) -> impl Iterator<Item = (Axis, &Thumb)> {
        Axis::BOTH
            .into_iter()
            .filter_map(move |axis| self.thumb(axis).map(|thumb| (axis, thumb)))
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Recompute thumb lengths after the viewport or content changed size
    pub fn resize(&mut self, viewport: Size, content: Size) {
        for axis in Axis::BOTH {
            if let Some(thumb) = self.thumb_mut(axis) {
                thumb.length = thumb_length(viewport.extent(axis), content.extent(axis));
            }
        }
    }

    /// Move thumbs to follow a content offset
    pub fn reposition(&mut self, offset: Point, viewport: Size, content: Size) {
        for axis in Axis::BOTH {
            if let Some(thumb) = self.thumb_mut(axis) {
                thumb.position =
                    thumb_position(offset.get(axis), viewport.extent(axis), content.extent(axis));
            }
        }
    }

    /// Show the thumb on one axis at full opacity
    pub fn show(&mut self, axis: Axis) {
        if let Some(thumb) = self.thumb_mut(axis) {
            thumb.visible = true;
            thumb.opacity = FULL_OPACITY;
        }
    }

    /// Current opacity, taken from the first present thumb
    pub fn opacity(&self) -> f32 {
        self.thumbs()
            .next()
            .map_or(FULL_OPACITY, |(_, thumb)| thumb.opacity)
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        for axis in Axis::BOTH {
            if let Some(thumb) = self.thumb_mut(axis) {
                thumb.opacity = opacity;
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.thumbs().any(|(_, thumb)| thumb.visible)
    }

    /// Hide every thumb and restore full opacity for the next reveal
    pub fn hide(&mut self) {
        for axis in Axis::BOTH {
            if let Some(thumb) = self.thumb_mut(axis) {
                thumb.visible = false;
                thumb.opacity = FULL_OPACITY;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumb_length() {
        assert_eq!(thumb_length(300.0, 1000.0), 90.0);
        // Content that fits fills the track
        assert_eq!(thumb_length(300.0, 200.0), 300.0);
        assert_eq!(thumb_length(300.0, 0.0), 0.0);
    }

    #[test]
    fn test_thumb_position() {
        assert_eq!(thumb_position(0.0, 300.0, 1000.0), 0.0);
        assert_eq!(thumb_position(-500.0, 300.0, 1000.0), 150.0);
        assert_eq!(thumb_position(-500.0, 300.0, 0.0), 0.0);
    }

    #[test]
    fn test_policy_controls_thumbs() {
        let vertical = ScrollbarGeometry::for_policy(&ScrollPolicy::vertical());
        assert!(vertical.x.is_none());
        assert!(vertical.y.is_some());

        let hidden = ScrollbarGeometry::for_policy(&ScrollPolicy {
            hide_scrollbars: true,
            ..ScrollPolicy::both()
        });
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_resize_and_reposition() {
        let mut bars = ScrollbarGeometry::for_policy(&ScrollPolicy::both());
        let viewport = Size::new(400.0, 300.0);
        let content = Size::new(800.0, 1000.0);

        bars.resize(viewport, content);
        bars.reposition(Point::new(-200.0, -500.0), viewport, content);

        let x = bars.thumb(Axis::X).unwrap();
        assert_eq!(x.length, 200.0);
        assert_eq!(x.position, 100.0);
        let y = bars.thumb(Axis::Y).unwrap();
        assert_eq!(y.length, 90.0);
        assert_eq!(y.position, 150.0);
    }

    #[test]
    fn test_show_fade_hide() {
        let mut bars = ScrollbarGeometry::for_policy(&ScrollPolicy::vertical());
        assert!(!bars.is_visible());

        bars.show(Axis::Y);
        // No thumb on x; showing it is a no-op
        bars.show(Axis::X);
        assert!(bars.is_visible());

        bars.set_opacity(0.25);
        assert_eq!(bars.opacity(), 0.25);

        bars.hide();
        assert!(!bars.is_visible());
        assert_eq!(bars.opacity(), FULL_OPACITY);
    }
}
