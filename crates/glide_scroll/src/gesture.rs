//! Drag gesture tracking
//!
//! A press starts a [`DragSession`]. Early samples only accumulate squared
//! travel until it passes the policy's threshold; after that every sample
//! moves the content. On release the session is either a tap (too little
//! effective travel) or handed to the momentum solver per axis.
//!
//! The tracker is pure bookkeeping: it returns what should happen and the
//! runtime applies it to the host.

use glide_core::events::{event_types, EventType};
use glide_core::{Axis, Point, Size, StateMachine, StateTransitions};

use crate::momentum::{self, Momentum};
use crate::policy::ScrollPolicy;

/// Phase of a region's pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pressed, travel still under the drag threshold
    PreThreshold,
    /// Content follows the pointer
    Dragging,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        use GestureState::*;

        match (self, event) {
            (Idle, POINTER_DOWN) => Some(PreThreshold),
            (PreThreshold, DRAG_THRESHOLD) => Some(Dragging),
            (PreThreshold | Dragging, POINTER_UP) => Some(Idle),
            (PreThreshold | Dragging, DRAG_CANCEL) => Some(Idle),
            _ => None,
        }
    }
}

/// Bookkeeping for one press-drag-release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_cursor: Point,
    /// Last sample that moved the content
    pub last_cursor: Point,
    pub start_offset: Point,
    /// Host clock in seconds
    pub start_time: f64,
    /// Squared travel accumulated before the threshold
    pub drag_distance: f32,
    /// Squared travel accumulated while moving the content
    pub effective_drag_distance: f32,
    pub locked_axis: Option<Axis>,
}

impl DragSession {
    pub fn new(cursor: Point, offset: Point, time: f64) -> Self {
        Self {
            start_cursor: cursor,
            last_cursor: cursor,
            start_offset: offset,
            start_time: time,
            drag_distance: 0.0,
            effective_drag_distance: 0.0,
            locked_axis: None,
        }
    }
}

/// Effect of a pointer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// No session is open
    Ignored,
    /// Counted toward the threshold; content stays put
    Absorbed,
    /// Content should move to `offset`
    Moved { offset: Point, axes: [bool; 2] },
}

impl DragUpdate {
    /// Whether the sample moved content on `axis`
    pub fn moved(&self, axis: Axis) -> bool {
        match self {
            DragUpdate::Moved { axes, .. } => axes[axis_index(axis)],
            _ => false,
        }
    }
}

/// Per-axis solution of a release
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Release {
    pub x: Option<Momentum>,
    pub y: Option<Momentum>,
}

impl Release {
    pub fn axis(&self, axis: Axis) -> Option<&Momentum> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }

    /// Landing offset; axes without a solution keep `current`
    pub fn target(&self, current: Point) -> Point {
        Point::new(
            self.x.map_or(current.x, |m| m.final_offset),
            self.y.map_or(current.y, |m| m.final_offset),
        )
    }

    /// Longest duration over the solved axes
    pub fn duration(&self) -> f32 {
        self.x
            .iter()
            .chain(self.y.iter())
            .map(|m| m.duration)
            .fold(0.0, f32::max)
    }

    /// Scroll position to report when the glide settles
    ///
    /// Positive when scrolled down/right, 0 on axes without a solution.
    pub fn resting_position(&self) -> Point {
        Point::new(
            self.x.map_or(0.0, |m| -m.final_offset),
            self.y.map_or(0.0, |m| -m.final_offset),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// No session was open
    Ignored,
    /// Too little travel; treat as a click
    Tap,
    Release(Release),
}

/// Gesture state plus the open session of one region
#[derive(Debug, Default)]
pub struct GestureTracker {
    state: StateMachine<GestureState>,
    session: Option<DragSession>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state.current()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// A session is open
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session at `cursor` with the content resting at `offset`
    pub fn begin(&mut self, cursor: Point, offset: Point, time: f64) {
        if self.session.is_some() {
            self.cancel();
        }
        self.state.send(event_types::POINTER_DOWN);
        self.session = Some(DragSession::new(cursor, offset, time));
        tracing::trace!(x = cursor.x, y = cursor.y, "drag session opened");
    }

    /// Drop the session without a release
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            self.state.send(event_types::DRAG_CANCEL);
            tracing::trace!("drag session cancelled");
        }
    }

    /// Feed one pointer sample
    ///
    /// `current` is the content offset before this sample; axes the sample
    /// does not move keep their value in the returned offset.
    pub fn update(
        &mut self,
        cursor: Point,
        current: Point,
        policy: &ScrollPolicy,
        viewport: Size,
        content: Size,
    ) -> DragUpdate {
        let Some(session) = self.session.as_mut() else {
            return DragUpdate::Ignored;
        };

        let drag = session.start_cursor.delta(cursor);

        if session.drag_distance < policy.min_drag_distance {
            session.drag_distance += drag.x * drag.x + drag.y * drag.y;
            return DragUpdate::Absorbed;
        }

        if self.state.is_in(GestureState::PreThreshold) {
            self.state.send(event_types::DRAG_THRESHOLD);
        }

        // The first sample past the threshold decides the lock for good
        if policy.axis_lock && session.locked_axis.is_none() {
            let axis = if drag.x * drag.x > drag.y * drag.y {
                Axis::X
            } else {
                Axis::Y
            };
            session.locked_axis = Some(axis);
            tracing::trace!(?axis, "drag locked to axis");
        }

        let mut offset = current;
        let mut axes = [false; 2];
        for axis in policy.axes() {
            if session.locked_axis.is_some_and(|locked| locked != axis) {
                continue;
            }

            let travel = drag.get(axis);
            let mut candidate = session.start_offset.get(axis) - travel;
            if !policy.bounce {
                candidate =
                    momentum::clamp_offset(candidate, viewport.extent(axis), content.extent(axis));
            }

            session.effective_drag_distance += travel * travel;
            offset.set(axis, candidate);
            axes[axis_index(axis)] = true;
        }

        session.last_cursor = cursor;
        DragUpdate::Moved { offset, axes }
    }

    /// Close the session at `now` and solve its momentum
    ///
    /// The glide is projected from the offset the drag started at. A locked
    /// session only glides along its locked axis.
    pub fn end(
        &mut self,
        now: f64,
        policy: &ScrollPolicy,
        viewport: Size,
        content: Size,
    ) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::Ignored;
        };
        self.state.send(event_types::POINTER_UP);

        if session.effective_drag_distance < policy.min_drag_distance {
            tracing::trace!(
                travel = session.effective_drag_distance,
                "release below drag threshold, treating as tap"
            );
            return DragOutcome::Tap;
        }

        let elapsed = momentum::drag_time((now - session.start_time) as f32);
        let params = policy.momentum();
        let mut release = Release::default();

        for axis in policy.axes() {
            if session.locked_axis.is_some_and(|locked| locked != axis) {
                continue;
            }
            let solved = momentum::solve(
                &params,
                session.start_cursor.get(axis),
                session.last_cursor.get(axis),
                session.start_offset.get(axis),
                elapsed,
                viewport.extent(axis),
                content.extent(axis),
            );
            match axis {
                Axis::X => release.x = Some(solved),
                Axis::Y => release.y = Some(solved),
            }
        }

        tracing::debug!(
            elapsed,
            duration = release.duration(),
            "drag released"
        );
        DragOutcome::Release(release)
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(400.0, 300.0);
    const CONTENT: Size = Size::new(400.0, 1000.0);

    fn vertical() -> ScrollPolicy {
        ScrollPolicy::vertical().no_bounce()
    }

    #[test]
    fn test_state_transitions() {
        use event_types::*;

        assert_eq!(
            GestureState::Idle.on_event(POINTER_DOWN),
            Some(GestureState::PreThreshold)
        );
        assert_eq!(
            GestureState::PreThreshold.on_event(DRAG_THRESHOLD),
            Some(GestureState::Dragging)
        );
        assert_eq!(
            GestureState::Dragging.on_event(POINTER_UP),
            Some(GestureState::Idle)
        );
        assert_eq!(GestureState::Idle.on_event(POINTER_UP), None);
        assert_eq!(GestureState::Dragging.on_event(DRAG_THRESHOLD), None);
    }

    #[test]
    fn test_threshold_absorbs_first_samples() {
        let mut tracker = GestureTracker::new();
        let policy = vertical();
        tracker.begin(Point::new(100.0, 500.0), Point::ZERO, 0.0);
        assert_eq!(tracker.state(), GestureState::PreThreshold);

        // 3² = 9 stays under 10
        let update = tracker.update(Point::new(100.0, 497.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        assert_eq!(update, DragUpdate::Absorbed);
        // 9 + 16 crosses, but this sample is still absorbed
        let update = tracker.update(Point::new(100.0, 496.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        assert_eq!(update, DragUpdate::Absorbed);
        assert_eq!(tracker.state(), GestureState::PreThreshold);

        let update = tracker.update(Point::new(100.0, 450.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        assert_eq!(
            update,
            DragUpdate::Moved {
                offset: Point::new(0.0, -50.0),
                axes: [false, true]
            }
        );
        assert_eq!(tracker.state(), GestureState::Dragging);
        assert_eq!(tracker.session().unwrap().last_cursor, Point::new(100.0, 450.0));
    }

    #[test]
    fn test_no_bounce_clamps_drag() {
        let mut tracker = GestureTracker::new();
        let policy = ScrollPolicy {
            min_drag_distance: 0.0,
            ..vertical()
        };
        tracker.begin(Point::new(0.0, 100.0), Point::ZERO, 0.0);

        // Pulling down at the top edge does nothing without bounce
        let update = tracker.update(Point::new(0.0, 200.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        assert_eq!(
            update,
            DragUpdate::Moved {
                offset: Point::ZERO,
                axes: [false, true]
            }
        );

        let bouncy = ScrollPolicy {
            bounce: true,
            ..policy
        };
        let update = tracker.update(Point::new(0.0, 200.0), Point::ZERO, &bouncy, VIEWPORT, CONTENT);
        assert!(matches!(update, DragUpdate::Moved { offset, .. } if offset.y == 100.0));
    }

    #[test]
    fn test_axis_lock_is_permanent() {
        let mut tracker = GestureTracker::new();
        let policy = ScrollPolicy {
            min_drag_distance: 0.0,
            ..ScrollPolicy::both()
        };
        tracker.begin(Point::new(200.0, 200.0), Point::ZERO, 0.0);

        // Mostly vertical first sample locks to y
        let update = tracker.update(Point::new(195.0, 180.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        assert!(update.moved(Axis::Y));
        assert!(!update.moved(Axis::X));

        // A later sideways swipe still only moves y
        let update = tracker.update(Point::new(50.0, 175.0), Point::new(0.0, -20.0), &policy, VIEWPORT, CONTENT);
        assert!(!update.moved(Axis::X));
        assert!(matches!(update, DragUpdate::Moved { offset, .. } if offset.x == 0.0 && offset.y == -25.0));
        assert_eq!(tracker.session().unwrap().locked_axis, Some(Axis::Y));
    }

    #[test]
    fn test_unlocked_drag_moves_both_axes() {
        let mut tracker = GestureTracker::new();
        let policy = ScrollPolicy {
            min_drag_distance: 0.0,
            axis_lock: false,
            ..ScrollPolicy::both()
        };
        let content = Size::new(1000.0, 1000.0);
        tracker.begin(Point::new(200.0, 200.0), Point::ZERO, 0.0);
        let update = tracker.update(Point::new(150.0, 170.0), Point::ZERO, &policy, VIEWPORT, content);
        assert_eq!(
            update,
            DragUpdate::Moved {
                offset: Point::new(-50.0, -30.0),
                axes: [true, true]
            }
        );
    }

    #[test]
    fn test_short_drag_is_tap() {
        let mut tracker = GestureTracker::new();
        let policy = vertical();
        tracker.begin(Point::new(0.0, 100.0), Point::ZERO, 0.0);
        tracker.update(Point::new(0.0, 98.0), Point::ZERO, &policy, VIEWPORT, CONTENT);

        let outcome = tracker.end(0.1, &policy, VIEWPORT, CONTENT);
        assert_eq!(outcome, DragOutcome::Tap);
        assert_eq!(tracker.state(), GestureState::Idle);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_release_solves_enabled_axes() {
        let mut tracker = GestureTracker::new();
        let policy = vertical();
        tracker.begin(Point::new(200.0, 500.0), Point::ZERO, 0.0);
        tracker.update(Point::new(200.0, 480.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        let update = tracker.update(Point::new(200.0, 400.0), Point::ZERO, &policy, VIEWPORT, CONTENT);
        let DragUpdate::Moved { offset, .. } = update else {
            panic!("expected content to move, got {update:?}");
        };
        assert_eq!(offset.y, -100.0);

        let DragOutcome::Release(release) = tracker.end(0.2, &policy, VIEWPORT, CONTENT) else {
            panic!("expected a release");
        };
        assert!(release.x.is_none());
        // 500px/s for 1s, projected from the offset the drag started at
        let y = release.y.unwrap();
        assert!((y.final_offset + 500.0).abs() < 1e-2);
        assert!((release.duration() - 1.0).abs() < 1e-4);
        assert_eq!(release.target(offset).x, 0.0);
        assert!((release.resting_position().y - 500.0).abs() < 1e-2);
    }

    #[test]
    fn test_locked_release_leaves_cross_axis_alone() {
        let mut tracker = GestureTracker::new();
        let policy = ScrollPolicy {
            min_drag_distance: 0.0,
            ..ScrollPolicy::both()
        };
        let content = Size::new(1000.0, 1000.0);
        tracker.begin(Point::new(200.0, 200.0), Point::ZERO, 0.0);

        // Locks to y, then the finger wanders far sideways
        tracker.update(Point::new(195.0, 180.0), Point::ZERO, &policy, VIEWPORT, content);
        let update = tracker.update(Point::new(50.0, 100.0), Point::new(0.0, -20.0), &policy, VIEWPORT, content);
        let DragUpdate::Moved { offset, .. } = update else {
            panic!("expected content to move, got {update:?}");
        };
        assert_eq!(offset, Point::new(0.0, -100.0));

        let DragOutcome::Release(release) = tracker.end(0.2, &policy, VIEWPORT, content) else {
            panic!("expected a release");
        };
        assert!(release.x.is_none());
        assert!((release.y.unwrap().final_offset + 500.0).abs() < 1e-2);
        assert_eq!(release.target(offset).x, 0.0);
        assert_eq!(release.resting_position().x, 0.0);
    }

    #[test]
    fn test_end_without_session_is_ignored() {
        let mut tracker = GestureTracker::new();
        let outcome = tracker.end(1.0, &vertical(), VIEWPORT, CONTENT);
        assert_eq!(outcome, DragOutcome::Ignored);
        assert_eq!(
            tracker.update(Point::ZERO, Point::ZERO, &vertical(), VIEWPORT, CONTENT),
            DragUpdate::Ignored
        );
    }

    #[test]
    fn test_begin_replaces_open_session() {
        let mut tracker = GestureTracker::new();
        tracker.begin(Point::new(0.0, 0.0), Point::ZERO, 0.0);
        tracker.begin(Point::new(5.0, 5.0), Point::new(0.0, -40.0), 1.0);

        let session = tracker.session().unwrap();
        assert_eq!(session.start_cursor, Point::new(5.0, 5.0));
        assert_eq!(session.start_offset.y, -40.0);
        assert_eq!(tracker.state(), GestureState::PreThreshold);
    }
}
