//! Glide Core
//!
//! Foundational primitives shared by the Glide crates:
//!
//! - **Geometry**: points, sizes, rects and the scroll [`Axis`]
//! - **Event Emission**: named events fired by a scroll region to its listeners
//! - **State Machines**: enum-driven transitions for gesture states
//!
//! # Example
//!
//! ```rust
//! use glide_core::events::{event_types, Event, EventData, EventEmitter};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let mut emitter = EventEmitter::new();
//! let fired = Arc::new(AtomicU32::new(0));
//! let counter = fired.clone();
//!
//! emitter.on(event_types::SCROLL_END, move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! emitter.fire(&mut Event::new(
//!     event_types::SCROLL_END,
//!     EventData::ScrollEnd { x: 0.0, y: 500.0 },
//! ));
//! assert_eq!(fired.load(Ordering::SeqCst), 1);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventEmitter, EventType, ListenerId};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Axis, Point, Rect, Size};
