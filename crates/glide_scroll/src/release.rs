//! Release glide and scrollbar fade
//!
//! A release runs as one scheduler task in three phases:
//!
//! 1. `Pending`: on its first frame the task writes the final translation.
//!    The host's transition animates the content toward it.
//! 2. `Glide`: a tween with the same duration and easing mirrors that
//!    transition so thumbs can follow the visual position every frame. When
//!    it finishes the region fires `SCROLL_END`.
//! 3. `Fade`: visible thumbs fade linearly to transparent, then are hidden
//!    and restored to full opacity.
//!
//! Releases that move the content without a glide, and taps that nudged it,
//! start directly in `Fade`.
//!
//! A new press cancels the task: it skips `SCROLL_END` and on its last frame
//! leaves the thumbs as the drag expects them. A new release replaces the
//! task outright.

use glide_animation::{Easing, Frame, TaskStatus, Tween};
use glide_core::events::event_types;
use glide_core::{Event, EventData, Point};

use crate::host::StyleSink;
use crate::region::{RegionId, ScrollRegion};
use crate::scrollbar::FULL_OPACITY;

enum ReleasePhase {
    Pending(Tween<Point>),
    Glide(Tween<Point>),
    Fade(Tween<f32>),
}

/// Scheduler payload driving one region's release
pub(crate) struct ReleaseTask {
    region: RegionId,
    phase: ReleasePhase,
    /// Reported with `SCROLL_END`
    resting: Point,
    fade_out: f32,
}

impl ReleaseTask {
    pub(crate) fn new(
        region: RegionId,
        glide: Tween<Point>,
        resting: Point,
        fade_out: f32,
    ) -> Self {
        Self {
            region,
            phase: ReleasePhase::Pending(glide),
            resting,
            fade_out,
        }
    }

    /// A task that only fades out the region's visible thumbs
    pub(crate) fn fade(region: RegionId, opacity: f32, fade_out: f32) -> Self {
        Self {
            region,
            phase: ReleasePhase::Fade(fade_tween(opacity, fade_out)),
            resting: Point::ZERO,
            fade_out,
        }
    }

    pub(crate) fn region(&self) -> RegionId {
        self.region
    }

    /// Where the content currently appears, while it is still moving
    pub(crate) fn visual_offset(&self) -> Option<Point> {
        match &self.phase {
            ReleasePhase::Pending(tween) => Some(tween.start_value()),
            ReleasePhase::Glide(tween) => Some(tween.value()),
            ReleasePhase::Fade(_) => None,
        }
    }

    /// Advance one frame
    pub(crate) fn step<H: StyleSink + ?Sized>(
        &mut self,
        frame: Frame,
        region: &mut ScrollRegion,
        host: &mut H,
    ) -> TaskStatus {
        if frame.cancelled {
            // A newer release already owns the thumbs
            if region.release.is_some() {
                return TaskStatus::Done;
            }
            if region.is_dragging() {
                region.scrollbars.set_opacity(FULL_OPACITY);
            } else {
                region.scrollbars.hide();
            }
            region.push_thumbs(host);
            return TaskStatus::Done;
        }

        let next = match &mut self.phase {
            ReleasePhase::Pending(tween) => {
                let target = tween.end_value();
                host.set_translation(region.content, target);
                region.offset = target;
                Some(ReleasePhase::Glide(tween.clone()))
            }
            ReleasePhase::Glide(tween) => {
                tween.tick(frame.dt);
                let sample = tween.value();
                let viewport = region.viewport_size();
                let content = region.content_size;
                region.scrollbars.reposition(sample, viewport, content);
                region.push_thumbs(host);

                if !tween.is_finished() {
                    None
                } else {
                    settle(self.resting, frame, region);
                    if !region.scrollbars.is_visible() {
                        return TaskStatus::Done;
                    }
                    Some(ReleasePhase::Fade(fade_tween(
                        region.scrollbars.opacity(),
                        self.fade_out,
                    )))
                }
            }
            ReleasePhase::Fade(tween) => {
                tween.tick(frame.dt);
                if tween.is_finished() {
                    region.scrollbars.hide();
                    region.push_thumbs(host);
                    return TaskStatus::Done;
                }
                region.scrollbars.set_opacity(tween.value());
                region.push_thumbs(host);
                None
            }
        };

        if let Some(next) = next {
            self.phase = next;
        }
        TaskStatus::Continue
    }
}

fn fade_tween(opacity: f32, fade_out: f32) -> Tween<f32> {
    Tween::new(opacity, 0.0, fade_out, Easing::Linear)
}

/// Fire `SCROLL_END` with the resting scroll position
fn settle(resting: Point, frame: Frame, region: &ScrollRegion) {
    tracing::debug!(x = resting.x, y = resting.y, "glide settled");
    let mut event = Event::new(
        event_types::SCROLL_END,
        EventData::ScrollEnd {
            x: resting.x,
            y: resting.y,
        },
    )
    .at(frame.now);
    region.emitter.fire(&mut event);
}
