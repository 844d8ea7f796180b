//! Scroll runtime
//!
//! Owns every scroll region, routes pointer events to them and steps their
//! release animations. The host drives it from three places:
//!
//! - pointer callbacks: [`ScrollRuntime::pointer_down`], [`ScrollRuntime::pointer_move`]
//!   and [`ScrollRuntime::pointer_up`], whose [`Propagation`] tells the host
//!   whether to suppress the event's default action
//! - frame callbacks: [`ScrollRuntime::on_frame`] after each `request_frame`
//! - layout changes: [`ScrollRuntime::update`] / [`ScrollRuntime::update_all`]
//!
//! Everything runs on the host's UI thread.

use glide_animation::{AnimationScheduler, TaskStatus, Tween};
use glide_core::events::event_types;
use glide_core::{Axis, Event, EventData, EventType, ListenerId, Point, Size};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{Result, ScrollError};
use crate::gesture::{DragOutcome, DragUpdate};
use crate::host::{ElementId, Environment, Host, PointerEvent, Propagation, TransitionRule};
use crate::momentum;
use crate::policy::{MomentumParams, ScrollPolicy};
use crate::region::{RegionId, ScrollRegion};
use crate::release::ReleaseTask;

/// Distance from a region's top or bottom edge that triggers auto-scroll
pub const EDGE_ZONE: f32 = 100.0;

/// Synthetic drag length of one auto-scroll step
pub const EDGE_STEP: f32 = 50.0;

/// Synthetic drag duration and glide cap of one auto-scroll step
pub const EDGE_TIME: f32 = 0.5;

/// Default `scroll_to` duration in seconds
pub const SCROLL_TO_DURATION: f32 = 0.25;

/// Registry and event router for scroll regions
pub struct ScrollRuntime<H: Host> {
    host: H,
    env: Environment,
    regions: SlotMap<RegionId, ScrollRegion>,
    by_element: FxHashMap<ElementId, RegionId>,
    scheduler: AnimationScheduler<ReleaseTask>,
    /// Regions with an open drag session
    dragging: usize,
    /// A pointer is pressed anywhere in the document
    pointer_down: bool,
}

impl<H: Host> ScrollRuntime<H> {
    pub fn new(host: H, env: Environment) -> Self {
        tracing::debug!(input = ?env.input, "scroll runtime created");
        Self {
            host,
            env,
            regions: SlotMap::with_key(),
            by_element: FxHashMap::default(),
            scheduler: AnimationScheduler::new(),
            dragging: 0,
            pointer_down: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    // =========================================================================
    // Region lifecycle
    // =========================================================================

    /// Turn `element` into a scroll region translating its first child
    pub fn create(&mut self, element: ElementId, policy: ScrollPolicy) -> Result<RegionId> {
        policy.validate()?;
        if self.by_element.contains_key(&element) {
            return Err(ScrollError::AlreadyAttached(element));
        }
        let content = self
            .host
            .first_child(element)
            .ok_or(ScrollError::MissingContent(element))?;

        let mut region = ScrollRegion::new(element, content, policy);
        region.measure(&self.host);
        region.sync_scrollbars(Point::ZERO);

        self.host.set_transition(content, None);
        self.host.set_translation(content, Point::ZERO);
        self.host.attach(element, content);
        region.push_thumbs(&mut self.host);

        let id = self.regions.insert(region);
        self.by_element.insert(element, id);
        tracing::debug!(?id, ?element, ?content, "scroll region created");
        Ok(id)
    }

    /// Re-measure one region after an external layout change
    pub fn update(&mut self, id: RegionId) -> Result<()> {
        let region = self.regions.get_mut(id).ok_or(ScrollError::UnknownRegion)?;
        Self::remeasure(region, &mut self.host);
        Ok(())
    }

    /// Re-measure every region, e.g. after an orientation change
    pub fn update_all(&mut self) {
        let Self { regions, host, .. } = self;
        for (_, region) in regions.iter_mut() {
            Self::remeasure(region, host);
        }
        tracing::debug!(count = self.regions.len(), "scroll regions re-measured");
    }

    fn remeasure(region: &mut ScrollRegion, host: &mut H) {
        region.measure(host);
        region.sync_scrollbars(region.offset);
        region.push_thumbs(host);
    }

    /// Detach a region. Its drag, glide and listeners are dropped.
    pub fn destroy(&mut self, id: RegionId) -> Result<()> {
        let mut region = self.regions.remove(id).ok_or(ScrollError::UnknownRegion)?;
        self.by_element.remove(&region.element);

        if region.is_dragging() {
            self.dragging = self.dragging.saturating_sub(1);
        }
        if let Some(handle) = region.release.take() {
            self.scheduler.remove(handle.id());
        }
        region.emitter.clear();
        self.host.detach(region.element);

        if self.scheduler.is_empty() {
            self.host.cancel_frame();
        }
        tracing::debug!(?id, element = ?region.element, "scroll region destroyed");
        Ok(())
    }

    /// Animate to scroll position `(x, y)`, positive down/right
    ///
    /// Only enabled axes move, each clamped into its scrollable range.
    /// `duration` defaults to [`SCROLL_TO_DURATION`].
    pub fn scroll_to(&mut self, id: RegionId, x: f32, y: f32, duration: Option<f32>) -> Result<()> {
        let region = self.regions.get_mut(id).ok_or(ScrollError::UnknownRegion)?;
        let duration = duration.unwrap_or(SCROLL_TO_DURATION).max(0.0);

        let viewport = region.viewport_size();
        let content = region.content_size;
        let mut target = region.offset;
        let mut resting = Point::ZERO;
        for axis in region.policy.axes() {
            let requested = match axis {
                Axis::X => x,
                Axis::Y => y,
            };
            let offset =
                momentum::clamp_offset(-requested, viewport.extent(axis), content.extent(axis));
            target.set(axis, offset);
            resting.set(axis, -offset);
            region.scrollbars.show(axis);
        }

        tracing::debug!(?id, x, y, duration, "scroll to");
        self.start_release(id, target, duration, resting);
        Ok(())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Listen for `event_type` on a region
    pub fn on<F>(&mut self, id: RegionId, event_type: EventType, handler: F) -> Result<ListenerId>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let region = self.regions.get_mut(id).ok_or(ScrollError::UnknownRegion)?;
        Ok(region.emitter.on(event_type, handler))
    }

    /// Remove a listener; false when it was already gone
    pub fn off(&mut self, id: RegionId, listener: ListenerId) -> Result<bool> {
        let region = self.regions.get_mut(id).ok_or(ScrollError::UnknownRegion)?;
        Ok(region.emitter.off(listener))
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Press. Opens a drag session on the region under the pointer.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Propagation {
        if event.source != self.env.input {
            return Propagation::Continue;
        }
        self.pointer_down = true;

        let Some(id) = self.find_region(event.target) else {
            return Propagation::Continue;
        };
        self.begin_drag(id, event.position, event.timestamp);
        Propagation::Continue
    }

    /// Move. Drags the region under the pointer, or auto-scrolls near edges
    /// while something else is being dragged.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Propagation {
        if event.source != self.env.input {
            return Propagation::Continue;
        }
        if !self.pointer_down || self.dragging == 0 {
            self.edge_scroll(event);
            return Propagation::Continue;
        }

        let Some(id) = self
            .find_region(event.target)
            .filter(|id| self.regions[*id].is_dragging())
        else {
            self.edge_scroll(event);
            return Propagation::Continue;
        };

        let Self { regions, host, .. } = self;
        let region = &mut regions[id];
        let viewport = region.viewport_size();
        let update = region.tracker.update(
            event.position,
            region.offset,
            &region.policy,
            viewport,
            region.content_size,
        );

        match update {
            DragUpdate::Ignored => Propagation::Continue,
            DragUpdate::Absorbed => Propagation::PreventDefault,
            DragUpdate::Moved { offset, .. } => {
                tracing::trace!(x = offset.x, y = offset.y, "drag moved content");
                region.offset = offset;
                host.set_translation(region.content, offset);
                for axis in Axis::BOTH {
                    if update.moved(axis) {
                        region.scrollbars.show(axis);
                    }
                }
                region.sync_scrollbars(offset);
                region.push_thumbs(host);
                Propagation::PreventDefault
            }
        }
    }

    /// Release. Starts the momentum glide unless the gesture was a tap.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Propagation {
        if event.source != self.env.input {
            return Propagation::Continue;
        }
        self.pointer_down = false;

        let Some(id) = self
            .find_region(event.target)
            .filter(|id| self.regions[*id].is_dragging())
        else {
            return Propagation::Continue;
        };
        self.dragging = self.dragging.saturating_sub(1);

        let region = &mut self.regions[id];
        let viewport = region.viewport_size();
        let outcome = region.tracker.end(
            event.timestamp,
            &region.policy,
            viewport,
            region.content_size,
        );

        match outcome {
            DragOutcome::Ignored => Propagation::Continue,
            DragOutcome::Tap => {
                // The drag may have crossed the threshold and shown a thumb
                self.start_fade(id);
                Propagation::Continue
            }
            DragOutcome::Release(release) => {
                let target = release.target(region.offset);
                let resting = release.resting_position();
                self.start_release(id, target, release.duration(), resting);
                Propagation::Stop
            }
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Step every release for the frame at `now` (seconds)
    pub fn on_frame(&mut self, now: f64) {
        let Self {
            scheduler,
            regions,
            host,
            ..
        } = self;

        let remaining = scheduler.tick(now, |task_id, task, frame| {
            let Some(region) = regions.get_mut(task.region()) else {
                return TaskStatus::Done;
            };
            let status = task.step(frame, region, host);
            let owns_region = region
                .release
                .as_ref()
                .is_some_and(|handle| handle.id() == task_id);
            if status == TaskStatus::Done && owns_region {
                region.release = None;
            }
            status
        });

        if remaining > 0 {
            self.host.request_frame();
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn region(&self, id: RegionId) -> Option<&ScrollRegion> {
        self.regions.get(id)
    }

    /// Region backed by `element`
    pub fn region_for(&self, element: ElementId) -> Option<RegionId> {
        self.by_element.get(&element).copied()
    }

    /// Content translation of a region
    pub fn offset(&self, id: RegionId) -> Option<Point> {
        self.regions.get(id).map(|region| region.offset)
    }

    /// Where a region's content currently appears, mid-glide included
    pub fn visual_offset(&self, id: RegionId) -> Option<Point> {
        let region = self.regions.get(id)?;
        Some(self.glide_position(region).unwrap_or(region.offset))
    }

    /// Number of regions with an open drag session
    pub fn dragging_count(&self) -> usize {
        self.dragging
    }

    pub fn is_animating(&self, id: RegionId) -> bool {
        self.regions.get(id).is_some_and(ScrollRegion::is_animating)
    }

    /// Any release or fade is scheduled
    pub fn has_animations(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Nearest region at or above `target` that accepts gestures
    fn find_region(&self, target: ElementId) -> Option<RegionId> {
        if self.host.has_skip_marker(target) || self.host.is_form_control(target) {
            return None;
        }

        let mut node = target;
        loop {
            if let Some(&id) = self.by_element.get(&node) {
                return self
                    .regions
                    .get(id)
                    .filter(|region| region.policy.gestures_enabled)
                    .map(|_| id);
            }
            node = self.host.parent(node)?;
            if self.host.has_skip_marker(node) {
                return None;
            }
        }
    }

    fn glide_position(&self, region: &ScrollRegion) -> Option<Point> {
        let handle = region.release.as_ref()?;
        self.scheduler.get(handle.id())?.visual_offset()
    }

    fn begin_drag(&mut self, id: RegionId, cursor: Point, time: f64) {
        // Pin the content where the interrupted glide has carried it
        let pinned = self.regions.get(id).and_then(|r| self.glide_position(r));

        let Self {
            regions,
            host,
            dragging,
            ..
        } = self;
        let Some(region) = regions.get_mut(id) else {
            return;
        };

        if let Some(handle) = region.release.take() {
            handle.cancel();
        }
        host.set_transition(region.content, None);
        if let Some(offset) = pinned {
            region.offset = offset;
            host.set_translation(region.content, offset);
        }

        if region.is_dragging() {
            // A press arrived without a release for the last one
            tracing::debug!(?id, "discarding stale drag session");
            region.tracker.cancel();
        } else {
            *dragging += 1;
        }

        region.measure(host);
        region.tracker.begin(cursor, region.offset, time);
        region.sync_scrollbars(region.offset);
        region.push_thumbs(host);
        tracing::trace!(?id, dragging = *dragging, "drag started");
    }

    /// Install the transition and schedule the glide toward `target`
    fn start_release(&mut self, id: RegionId, target: Point, duration: f32, resting: Point) {
        let from = self
            .regions
            .get(id)
            .and_then(|r| self.glide_position(r));

        let Some(region) = self.regions.get_mut(id) else {
            return;
        };
        // The new glide takes over the thumbs, so the old one needs no cleanup
        if let Some(handle) = region.release.take() {
            self.scheduler.remove(handle.id());
        }
        let from = from.unwrap_or(region.offset);

        if duration <= 0.0 {
            self.host.set_transition(region.content, None);
            self.host.set_translation(region.content, target);
            region.offset = target;
            region.sync_scrollbars(target);
            region.push_thumbs(&mut self.host);
            let mut event = Event::new(
                event_types::SCROLL_END,
                EventData::ScrollEnd {
                    x: resting.x,
                    y: resting.y,
                },
            );
            region.emitter.fire(&mut event);
            self.start_fade(id);
            return;
        }

        let easing = region.policy.timing_function;
        self.host
            .set_transition(region.content, Some(TransitionRule { duration, easing }));

        let glide = Tween::new(from, target, duration, easing);
        let task = ReleaseTask::new(id, glide, resting, region.policy.fade_out_duration);
        region.release = Some(self.scheduler.spawn(task));
        self.host.request_frame();
        tracing::debug!(?id, x = target.x, y = target.y, duration, "release started");
    }

    /// Fade out thumbs left visible by a release that schedules no glide
    fn start_fade(&mut self, id: RegionId) {
        let Some(region) = self.regions.get_mut(id) else {
            return;
        };
        if !region.scrollbars.is_visible() {
            return;
        }
        let task = ReleaseTask::fade(
            id,
            region.scrollbars.opacity(),
            region.policy.fade_out_duration,
        );
        region.release = Some(self.scheduler.spawn(task));
        self.host.request_frame();
        tracing::trace!(?id, "scrollbar fade started");
    }

    /// Auto-scroll a vertical region when the pressed pointer nears its edge
    fn edge_scroll(&mut self, event: &PointerEvent) {
        if !self.pointer_down {
            return;
        }
        let Some(id) = self.find_region(event.target) else {
            return;
        };

        let region = &mut self.regions[id];
        if !region.policy.scroll_y {
            return;
        }
        region.measure(&self.host);

        let rect = region.viewport_rect();
        let y = event.position.y;
        let step = if y - rect.top <= EDGE_ZONE {
            EDGE_STEP
        } else if rect.top + rect.height - y <= EDGE_ZONE {
            -EDGE_STEP
        } else {
            return;
        };

        let params = MomentumParams {
            friction: region.policy.friction,
            total_max_time: EDGE_TIME,
            paging: false,
            snap: 0.0,
        };
        let Size { height, .. } = region.viewport_size();
        let solved = momentum::solve(
            &params,
            0.0,
            step,
            region.offset.y,
            EDGE_TIME,
            height,
            region.content_size.height,
        );

        if solved.final_offset == region.offset.y {
            // Already pinned against the edge it is heading for
            return;
        }
        let target = Point::new(region.offset.x, solved.final_offset);
        let resting = Point::new(0.0, -solved.final_offset);
        tracing::trace!(?id, step, y = solved.final_offset, "edge auto-scroll");
        self.start_release(id, target, solved.duration, resting);
    }
}
