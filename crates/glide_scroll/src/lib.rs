//! Glide Scroll
//!
//! Momentum scrolling for any host UI tree. A scroll region is a viewport
//! element whose first child is translated as the user drags; on release the
//! content glides on with momentum and the scrollbars fade out.
//!
//! # Features
//!
//! - **Momentum Solver**: landing offset and glide duration from drag velocity,
//!   with friction, paging, snapping and edge clamping
//! - **Gesture Tracking**: drag threshold, axis lock, optional bounce
//! - **Scrollbars**: proportional thumbs that follow the glide and fade out
//! - **Policies**: per-region configuration, loadable from TOML
//! - **Host Traits**: plug in any element tree, layout and style backend
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Point, Rect};
//! use glide_scroll::{
//!     Environment, HeadlessHost, InputSource, PointerEvent, ScrollPolicy, ScrollRuntime,
//! };
//!
//! let mut host = HeadlessHost::new();
//! let viewport = host.add_root(Rect::new(0.0, 0.0, 400.0, 300.0));
//! let content = host.add_child(viewport, Rect::new(0.0, 0.0, 400.0, 1000.0));
//!
//! let mut runtime = ScrollRuntime::new(host, Environment::touch());
//! let region = runtime.create(viewport, ScrollPolicy::vertical().no_bounce()).unwrap();
//!
//! let at = |y: f32, t: f64| PointerEvent::new(InputSource::Touch, content, Point::new(200.0, y), t);
//! runtime.pointer_down(&at(500.0, 0.0));
//! runtime.pointer_move(&at(480.0, 0.05));
//! runtime.pointer_move(&at(400.0, 0.2));
//! runtime.pointer_up(&at(400.0, 0.2));
//!
//! // Drive frames until the glide and fade are over
//! let mut now = 0.2;
//! while runtime.host_mut().take_frame_request() {
//!     runtime.on_frame(now);
//!     now += 0.1;
//! }
//! assert!((runtime.offset(region).unwrap().y + 500.0).abs() < 1e-2);
//! ```

pub mod error;
pub mod gesture;
pub mod headless;
pub mod host;
pub mod momentum;
pub mod policy;
pub mod region;
mod release;
pub mod runtime;
pub mod scrollbar;

pub use error::{Result, ScrollError};
pub use gesture::{DragOutcome, DragSession, DragUpdate, GestureState, GestureTracker, Release};
pub use headless::HeadlessHost;
pub use host::{
    ElementId, ElementTree, Environment, FrameRequester, Host, InputCapabilities, InputSource,
    LayoutQuery, PointerEvent, Propagation, StyleSink, TransitionRule,
};
pub use momentum::{solve, Momentum};
pub use policy::{MomentumParams, ScrollPolicy};
pub use region::{RegionId, ScrollRegion};
pub use runtime::ScrollRuntime;
pub use scrollbar::{ScrollbarGeometry, Thumb};
