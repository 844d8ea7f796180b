//! Headless Fling Demo
//!
//! Drives a scroll region through a press, a fast drag and a release on the
//! in-memory host, then steps frames at 60 Hz until the glide and the
//! scrollbar fade have finished:
//! - Policy loaded from TOML, optionally from a file given as the first argument
//! - `SCROLL_END` reported through a region listener
//! - Thumb geometry printed as the glide progresses
//!
//! Run with: RUST_LOG=glide_scroll=debug cargo run -p glide_scroll --example headless_fling

use std::path::Path;

use glide_core::events::{event_types, EventData};
use glide_core::{Axis, Point, Rect};
use glide_scroll::{
    Environment, HeadlessHost, InputCapabilities, InputSource, PointerEvent, Result,
    ScrollPolicy, ScrollRuntime,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_POLICY: &str = r#"
friction = 0.2
total_max_time = 1.0
bounce = false
timing_function = "ease-out"
fade_out_duration = 0.5
"#;

const FRAME: f64 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let policy = match std::env::args().nth(1) {
        Some(path) => ScrollPolicy::load(Path::new(&path))?,
        None => ScrollPolicy::from_toml_str(DEFAULT_POLICY)?,
    };

    let mut host = HeadlessHost::new();
    let viewport = host.add_root(Rect::new(0.0, 0.0, 400.0, 300.0));
    let content = host.add_child(viewport, Rect::new(0.0, 0.0, 400.0, 2400.0));

    let env = Environment::resolve(InputCapabilities {
        touch: true,
        mouse: false,
    })?;
    let mut runtime = ScrollRuntime::new(host, env);
    let region = runtime.create(viewport, policy)?;

    runtime.on(region, event_types::SCROLL_END, |event| {
        if let EventData::ScrollEnd { x, y } = event.data {
            tracing::info!(x, y, at = event.timestamp, "scroll end");
        }
    })?;

    // A quick upward flick: 240px in 0.15s
    let samples = [(520.0, 0.0), (505.0, 0.03), (440.0, 0.08), (330.0, 0.12), (280.0, 0.15)];
    let touch = |y: f32, t: f64| PointerEvent::new(InputSource::Touch, content, Point::new(200.0, y), t);

    let (y, t) = samples[0];
    runtime.pointer_down(&touch(y, t));
    for &(y, t) in &samples[1..] {
        let propagation = runtime.pointer_move(&touch(y, t));
        tracing::debug!(y, ?propagation, "pointer move");
    }
    let (y, t) = samples[samples.len() - 1];
    let propagation = runtime.pointer_up(&touch(y, t));
    tracing::info!(?propagation, "released");

    let mut now = t;
    let mut frame = 0;
    while runtime.host_mut().take_frame_request() {
        runtime.on_frame(now);
        if frame % 10 == 0 {
            if let Some(thumb) = runtime.host().thumb(viewport, Axis::Y) {
                tracing::info!(
                    frame,
                    offset = runtime.visual_offset(region).map_or(0.0, |p| p.y),
                    thumb_position = thumb.position,
                    thumb_opacity = thumb.opacity,
                    "frame"
                );
            }
        }
        now += FRAME;
        frame += 1;
    }

    let offset = runtime.offset(region).unwrap_or(Point::ZERO);
    tracing::info!(frames = frame, y = offset.y, "settled");
    Ok(())
}
