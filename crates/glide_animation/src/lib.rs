//! Glide Animation System
//!
//! Timing functions, time-based tweens and the cooperative frame-task
//! scheduler that drives post-release glides and scrollbar fades.
//!
//! # Features
//!
//! - **Timing Functions**: CSS keyword and `cubic-bezier()` easing curves
//! - **Tweens**: fixed-duration interpolation advanced by frame deltas
//! - **Frame Tasks**: self-rescheduling work with explicit cancellation

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::{Easing, ParseEasingError};
pub use scheduler::{AnimationScheduler, Frame, TaskHandle, TaskId, TaskStatus};
pub use tween::Tween;
