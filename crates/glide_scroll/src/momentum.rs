//! Momentum solver
//!
//! Turns one axis of a finished drag into a landing offset and a glide
//! duration. Offsets are content translations: 0 at the top/left edge,
//! negative as the content moves up/left, bounded below by
//! `-(content - viewport)`.

use crate::policy::MomentumParams;

/// Drags slower than this many seconds are treated as this long
pub const MAX_DRAG_TIME: f32 = 2.0;

/// Floor on the drag duration so a same-timestamp release stays finite
pub const MIN_DRAG_TIME: f32 = 0.001;

/// Where a glide lands and how long it takes to get there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    pub final_offset: f32,
    /// Seconds
    pub duration: f32,
}

/// Scrollable offset range `(lower, upper)` for one axis
///
/// `upper` is always 0. Content that fits inside the viewport cannot scroll,
/// so both bounds are 0.
pub fn scroll_bounds(viewport: f32, content: f32) -> (f32, f32) {
    let overflow = content - viewport;
    if overflow > 0.0 {
        (-overflow, 0.0)
    } else {
        (0.0, 0.0)
    }
}

/// Clamp an offset into the scrollable range
pub fn clamp_offset(offset: f32, viewport: f32, content: f32) -> f32 {
    let (lower, upper) = scroll_bounds(viewport, content);
    if offset < lower {
        lower
    } else if offset > upper {
        upper
    } else {
        offset
    }
}

/// Clamp a drag duration into `[MIN_DRAG_TIME, MAX_DRAG_TIME]`
pub fn drag_time(seconds: f32) -> f32 {
    if seconds.is_nan() {
        return MIN_DRAG_TIME;
    }
    seconds.clamp(MIN_DRAG_TIME, MAX_DRAG_TIME)
}

/// Solve one axis of a release.
///
/// `start` and `end` are the pointer coordinates at drag start and at the
/// last sample, `current` the content offset at release and `elapsed` the
/// drag duration in seconds.
pub fn solve(
    params: &MomentumParams,
    start: f32,
    end: f32,
    current: f32,
    elapsed: f32,
    viewport: f32,
    content: f32,
) -> Momentum {
    let velocity = (start - end) / elapsed;
    let mut duration = elapsed / params.friction;
    let raw = current - velocity * duration;

    let mut landing = raw;
    if params.paging && viewport > 0.0 {
        // Never page further than one viewport from where the drag let go
        landing = landing.clamp(current - viewport, current + viewport);
        landing = round_to_multiple(landing, viewport);
    } else if params.snap > 0.0 {
        landing = round_to_multiple(landing, params.snap);
    }

    let final_offset = clamp_offset(landing, viewport, content);

    // Shorten the glide in proportion to the distance the clamp removed
    if final_offset != raw {
        let intended = (start - raw).abs();
        if intended > f32::EPSILON {
            duration *= (start - final_offset).abs() / intended;
        }
    }

    Momentum {
        final_offset,
        // f32::min also discards a NaN duration
        duration: params.total_max_time.min(duration),
    }
}

/// Round half-up to the nearest multiple of `step`
fn round_to_multiple(value: f32, step: f32) -> f32 {
    (value / step + 0.5).floor() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> MomentumParams {
        MomentumParams {
            friction: 0.2,
            total_max_time: 1.0,
            paging: false,
            snap: 0.0,
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(scroll_bounds(300.0, 1000.0), (-700.0, 0.0));
        assert_eq!(scroll_bounds(300.0, 300.0), (0.0, 0.0));
        assert_eq!(scroll_bounds(300.0, 100.0), (0.0, 0.0));
        assert_eq!(clamp_offset(-900.0, 300.0, 1000.0), -700.0);
        assert_eq!(clamp_offset(40.0, 300.0, 1000.0), 0.0);
        assert_eq!(clamp_offset(-120.0, 300.0, 1000.0), -120.0);
    }

    #[test]
    fn test_drag_time_is_clamped() {
        assert_eq!(drag_time(0.0), MIN_DRAG_TIME);
        assert_eq!(drag_time(5.0), MAX_DRAG_TIME);
        assert_eq!(drag_time(0.3), 0.3);
        assert_eq!(drag_time(f32::NAN), MIN_DRAG_TIME);
    }

    #[test]
    fn test_fling_inside_bounds() {
        // 100px up in 0.2s: 500px/s for 1s
        let m = solve(&params(), 500.0, 400.0, -100.0, 0.2, 300.0, 1000.0);
        assert!((m.final_offset + 600.0).abs() < 1e-2);
        assert!((m.duration - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fling_past_edge_is_clamped_and_shortened() {
        let m = solve(&params(), 500.0, 400.0, -400.0, 0.2, 300.0, 1000.0);
        // Raw landing is -900, clamped to -700
        assert_eq!(m.final_offset, -700.0);
        // 1.0 * |500 - (-700)| / |500 - (-900)|
        let expected = 1200.0 / 1400.0;
        assert!((m.duration - expected).abs() < 1e-3);
    }

    #[test]
    fn test_duration_is_capped() {
        let slow = MomentumParams {
            total_max_time: 0.5,
            ..params()
        };
        let m = solve(&slow, 500.0, 490.0, -100.0, 1.0, 300.0, 1000.0);
        assert_eq!(m.duration, 0.5);
    }

    #[test]
    fn test_paging_limits_to_one_page() {
        let paged = MomentumParams {
            paging: true,
            ..params()
        };
        // A hard fling would travel 2500px; paging stops it one page away
        let m = solve(&paged, 800.0, 300.0, -300.0, 0.2, 300.0, 3000.0);
        assert_eq!(m.final_offset, -600.0);
    }

    #[test]
    fn test_paging_rounds_to_nearest_page() {
        let paged = MomentumParams {
            paging: true,
            ..params()
        };
        // Raw landing -140 rounds to page 0; -160 rounds to page -1
        let m = solve(&paged, 428.0, 400.0, 0.0, 0.2, 300.0, 3000.0);
        assert_eq!(m.final_offset, 0.0);
        let m = solve(&paged, 432.0, 400.0, 0.0, 0.2, 300.0, 3000.0);
        assert_eq!(m.final_offset, -300.0);
    }

    #[test]
    fn test_snap_quantizes_landing() {
        let snapped = MomentumParams {
            snap: 50.0,
            ..params()
        };
        // Raw landing -130 snaps to -150 (half-up: -2.6 + 0.5 floors to -3)
        let m = solve(&snapped, 426.0, 400.0, 0.0, 0.2, 300.0, 3000.0);
        assert_eq!(m.final_offset, -150.0);
    }

    #[test]
    fn test_zero_velocity_stays_put() {
        let m = solve(&params(), 400.0, 400.0, -250.0, 0.3, 300.0, 1000.0);
        assert_eq!(m.final_offset, -250.0);
        assert_eq!(m.duration, 1.0);
    }

    #[test]
    fn test_content_smaller_than_viewport_lands_at_zero() {
        let m = solve(&params(), 500.0, 100.0, 0.0, 0.1, 300.0, 200.0);
        assert_eq!(m.final_offset, 0.0);
        assert!(m.duration.is_finite());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_multiple(25.0, 50.0), 50.0);
        assert_eq!(round_to_multiple(-25.0, 50.0), 0.0);
        assert_eq!(round_to_multiple(-26.0, 50.0), -50.0);
    }

    proptest! {
        #[test]
        fn prop_landing_within_bounds_and_duration_capped(
            start in -5000.0f32..5000.0,
            end in -5000.0f32..5000.0,
            position in 0.0f32..1.0,
            elapsed in MIN_DRAG_TIME..MAX_DRAG_TIME,
            viewport in 1.0f32..2000.0,
            content in 0.0f32..10000.0,
            friction in 0.05f32..2.0,
            total_max_time in 0.0f32..3.0,
            paging in any::<bool>(),
            snap in prop_oneof![Just(0.0f32), 1.0f32..200.0],
        ) {
            let (lower, upper) = scroll_bounds(viewport, content);
            let current = lower * position;
            let params = MomentumParams { friction, total_max_time, paging, snap };

            let m = solve(&params, start, end, current, elapsed, viewport, content);

            prop_assert!(m.final_offset >= lower && m.final_offset <= upper);
            prop_assert!(m.duration <= total_max_time);
            prop_assert!(m.duration >= 0.0);
        }

        #[test]
        fn prop_snap_lands_on_multiple_or_edge(
            delta in -400.0f32..400.0,
            pages in 2u32..20,
            snap in prop_oneof![Just(10.0f32), Just(25.0f32), Just(50.0f32)],
        ) {
            let viewport = 300.0;
            let content = viewport + pages as f32 * 100.0;
            let params = MomentumParams { snap, ..params() };
            let (lower, _) = scroll_bounds(viewport, content);

            let m = solve(&params, 400.0 + delta, 400.0, lower / 2.0, 0.2, viewport, content);

            let steps = m.final_offset / snap;
            let on_grid = (steps - steps.round()).abs() < 1e-3;
            prop_assert!(on_grid || m.final_offset == lower || m.final_offset == 0.0);
        }
    }
}
