//! Browser front end
//!
//! Binds the renderer to `<canvas id="constellation-canvas">`, sized to the
//! window, repainting on every animation frame and regenerating the field
//! whenever the window is resized. Pages without the canvas stay idle.

mod canvas;
mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use crate::core::{FieldConfig, FieldRenderer, FpsCounter, ParticleField};
use crate::time::now_seconds;

pub use canvas::CanvasSurface;
pub use scheduler::AnimationFrameScheduler;

/// Element id of the canvas the constellation paints
pub const CANVAS_ID: &str = "constellation-canvas";

/// Seconds between FPS log lines
const FPS_LOG_INTERVAL: f64 = 5.0;

type WebRenderer = FieldRenderer<CanvasSurface, AnimationFrameScheduler>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let Some(element) = document.get_element_by_id(CANVAS_ID) else {
        info!(id = CANVAS_ID, "No canvas on this page, constellation idle");
        return Ok(());
    };
    let canvas = element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(JsValue::from)?;

    let config = read_config(&canvas);
    let (width, height) = viewport_size(&window);
    info!(width, height, link_strategy = ?config.link_strategy, "Starting constellation");

    let scheduler = AnimationFrameScheduler::new(window.clone());
    let renderer: Rc<RefCell<WebRenderer>> = Rc::new(RefCell::new(FieldRenderer::new(
        ParticleField::new(config, width, height),
        CanvasSurface::new(canvas)?,
        scheduler.clone(),
    )));

    let frame_renderer = renderer.clone();
    let mut fps = FpsCounter::new(60);
    let mut last_fps_log = now_seconds();
    scheduler.install(move || {
        let report = frame_renderer.borrow_mut().tick();

        let now = now_seconds();
        fps.tick(now * 1000.0);
        if now - last_fps_log >= FPS_LOG_INTERVAL {
            last_fps_log = now;
            debug!(
                fps = format!("{:.0}", fps.fps()),
                particles = report.particles,
                links = report.links,
                "frame stats"
            );
        }
    });

    let resize_renderer = renderer.clone();
    let resize_window = window.clone();
    let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let (width, height) = viewport_size(&resize_window);
        resize_renderer.borrow_mut().resize(width, height);
    }) as Box<dyn FnMut(web_sys::Event)>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    // First frame paints immediately; each frame schedules the next
    renderer.borrow_mut().tick();
    Ok(())
}

/// Optional JSON overrides from the canvas `data-config` attribute
fn read_config(canvas: &HtmlCanvasElement) -> FieldConfig {
    let Some(json) = canvas.get_attribute("data-config") else {
        return FieldConfig::default();
    };
    FieldConfig::from_json(&json).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring invalid data-config");
        FieldConfig::default()
    })
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}
