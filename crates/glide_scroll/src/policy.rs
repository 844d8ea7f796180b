//! Per-region scroll policy
//!
//! Policies are plain data. They can be built in code from the presets below
//! or loaded from a TOML table, where every field is optional:
//!
//! ```toml
//! friction = 0.2
//! scroll_x = true
//! bounce = false
//! timing_function = "cubic-bezier(0.1, 0.57, 0.1, 1)"
//! ```

use std::fs;
use std::path::Path;

use glide_animation::Easing;
use glide_core::Axis;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollError};

/// Physics knobs handed to the momentum solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumParams {
    /// Divides the drag duration to get the glide duration
    pub friction: f32,
    /// Upper bound on the glide duration in seconds
    pub total_max_time: f32,
    /// Quantize the landing offset to whole viewports
    pub paging: bool,
    /// Quantize the landing offset to this many pixels (0 disables)
    pub snap: f32,
}

/// Scroll configuration for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollPolicy {
    /// Glide duration = drag duration / friction (default: 0.2)
    pub friction: f32,
    /// Maximum glide duration in seconds (default: 1.0)
    pub total_max_time: f32,
    /// Land on whole viewport pages (default: false)
    pub paging: bool,
    /// Land on multiples of this many pixels, 0 disables (default: 0)
    pub snap: f32,
    /// Scroll horizontally (default: false)
    pub scroll_x: bool,
    /// Scroll vertically (default: true)
    pub scroll_y: bool,
    /// Allow dragging past the edges (default: true)
    pub bounce: bool,
    /// Squared pointer travel before a press becomes a drag (default: 10)
    pub min_drag_distance: f32,
    /// Lock each drag to its dominant axis (default: true)
    pub axis_lock: bool,
    /// Easing of the release glide (default: ease-out)
    pub timing_function: Easing,
    /// Seconds the scrollbars take to fade after a glide (default: 1.0)
    pub fade_out_duration: f32,
    /// Respond to pointer input at all (default: true)
    pub gestures_enabled: bool,
    /// Never show scrollbar thumbs (default: false)
    pub hide_scrollbars: bool,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            friction: 0.2,
            total_max_time: 1.0,
            paging: false,
            snap: 0.0,
            scroll_x: false,
            scroll_y: true,
            bounce: true,
            min_drag_distance: 10.0,
            axis_lock: true,
            timing_function: Easing::EaseOut,
            fade_out_duration: 1.0,
            gestures_enabled: true,
            hide_scrollbars: false,
        }
    }
}

impl ScrollPolicy {
    /// Vertical-only scrolling (the default)
    pub fn vertical() -> Self {
        Self::default()
    }

    /// Horizontal-only scrolling
    pub fn horizontal() -> Self {
        Self {
            scroll_x: true,
            scroll_y: false,
            ..Default::default()
        }
    }

    /// Free scrolling on both axes
    pub fn both() -> Self {
        Self {
            scroll_x: true,
            scroll_y: true,
            ..Default::default()
        }
    }

    /// Disable dragging past the edges
    pub fn no_bounce(mut self) -> Self {
        self.bounce = false;
        self
    }

    /// Land on whole viewport pages
    pub fn paged(mut self) -> Self {
        self.paging = true;
        self
    }

    /// Land on multiples of `step` pixels
    pub fn snapped(mut self, step: f32) -> Self {
        self.snap = step;
        self
    }

    /// Whether the region scrolls along `axis`
    pub fn scrolls(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.scroll_x,
            Axis::Y => self.scroll_y,
        }
    }

    /// Enabled axes, x first
    pub fn axes(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::BOTH.into_iter().filter(|axis| self.scrolls(*axis))
    }

    pub fn momentum(&self) -> MomentumParams {
        MomentumParams {
            friction: self.friction,
            total_max_time: self.total_max_time,
            paging: self.paging,
            snap: self.snap,
        }
    }

    /// Reject values the solver cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.friction.is_finite() && self.friction > 0.0) {
            return Err(ScrollError::InvalidPolicy(format!(
                "friction must be positive, got {}",
                self.friction
            )));
        }
        if !(self.total_max_time.is_finite() && self.total_max_time >= 0.0) {
            return Err(ScrollError::InvalidPolicy(format!(
                "total_max_time must be non-negative, got {}",
                self.total_max_time
            )));
        }
        if !(self.snap.is_finite() && self.snap >= 0.0) {
            return Err(ScrollError::InvalidPolicy(format!(
                "snap must be non-negative, got {}",
                self.snap
            )));
        }
        if !(self.min_drag_distance.is_finite() && self.min_drag_distance >= 0.0) {
            return Err(ScrollError::InvalidPolicy(format!(
                "min_drag_distance must be non-negative, got {}",
                self.min_drag_distance
            )));
        }
        if !(self.fade_out_duration.is_finite() && self.fade_out_duration >= 0.0) {
            return Err(ScrollError::InvalidPolicy(format!(
                "fade_out_duration must be non-negative, got {}",
                self.fade_out_duration
            )));
        }
        Ok(())
    }

    /// Parse and validate a policy from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let policy: Self = toml::from_str(source)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read, parse and validate a policy file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| ScrollError::PolicyRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = ScrollPolicy::default();
        assert_eq!(policy.friction, 0.2);
        assert_eq!(policy.total_max_time, 1.0);
        assert!(policy.scroll_y && !policy.scroll_x);
        assert!(policy.bounce);
        assert_eq!(policy.min_drag_distance, 10.0);
        assert_eq!(policy.timing_function, Easing::EaseOut);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let policy = ScrollPolicy::horizontal().no_bounce().paged();
        assert_eq!(policy.axes().collect::<Vec<_>>(), vec![Axis::X]);
        assert!(!policy.bounce);
        assert!(policy.paging);

        let both = ScrollPolicy::both().snapped(50.0);
        assert_eq!(both.axes().count(), 2);
        assert_eq!(both.momentum().snap, 50.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let policy = ScrollPolicy::from_toml_str(
            r#"
            scroll_x = true
            bounce = false
            timing_function = "cubic-bezier(0.1, 0.57, 0.1, 1)"
            "#,
        )
        .unwrap();

        assert!(policy.scroll_x);
        assert!(policy.scroll_y);
        assert!(!policy.bounce);
        assert_eq!(policy.friction, 0.2);
        assert_eq!(
            policy.timing_function,
            Easing::CubicBezier(0.1, 0.57, 0.1, 1.0)
        );
    }

    #[test]
    fn test_load_reports_missing_file() {
        let path = Path::new("/nonexistent/glide/policy.toml");
        let err = ScrollPolicy::load(path).unwrap_err();
        assert!(matches!(&err, ScrollError::PolicyRead { path: p, .. } if p == path));
        assert!(err.to_string().contains("policy.toml"));
    }

    #[test]
    fn test_toml_round_trip() {
        let policy = ScrollPolicy::both().snapped(25.0);
        let text = policy.to_toml_string().unwrap();
        assert!(text.contains("timing_function = \"ease-out\""));
        assert_eq!(ScrollPolicy::from_toml_str(&text).unwrap(), policy);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ScrollPolicy::from_toml_str("friction = 0.0"),
            Err(ScrollError::InvalidPolicy(_))
        ));
        assert!(matches!(
            ScrollPolicy::from_toml_str("snap = -5.0"),
            Err(ScrollError::InvalidPolicy(_))
        ));
        assert!(matches!(
            ScrollPolicy::from_toml_str("frction = 0.3"),
            Err(ScrollError::PolicyParse(_))
        ));
        assert!(matches!(
            ScrollPolicy::from_toml_str("timing_function = \"wobble\""),
            Err(ScrollError::PolicyParse(_))
        ));
    }
}
