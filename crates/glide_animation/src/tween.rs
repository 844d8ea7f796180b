//! Fixed-duration tweens
//!
//! A tween interpolates between two values over a duration in seconds,
//! shaped by an [`Easing`]. It is advanced by frame deltas and sampled on
//! demand, so the same tween can mirror a transition the host renders on its
//! own.

use glide_core::Point;

use crate::easing::Easing;

/// Values a [`Tween`] can interpolate
pub trait Interpolate: Copy {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Interpolate for Point {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Point::new(f32::lerp(from.x, to.x, t), f32::lerp(from.y, to.y, t))
    }
}

/// A time-based interpolation between two values
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    /// Seconds
    duration: f32,
    elapsed: f32,
    easing: Easing,
    playing: bool,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween, already playing
    pub fn new(from: T, to: T, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
            playing: true,
        }
    }

    /// Restart from the beginning
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once the full duration has elapsed
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Get the current interpolated value
    pub fn value(&self) -> T {
        T::lerp(self.from, self.to, self.easing.apply(self.progress()))
    }

    /// Advance by delta time in seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        self.elapsed += dt.max(0.0);

        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.playing = false;
        }
    }

    pub fn start_value(&self) -> T {
        self.from
    }

    pub fn end_value(&self) -> T {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }
}
